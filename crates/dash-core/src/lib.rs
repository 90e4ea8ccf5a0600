// File: crates/dash-core/src/lib.rs
// Summary: Core library entry point; exports the query layer, figure model, and rendering API.

pub mod axis;
pub mod error;
pub mod figure;
pub mod geo;
pub mod geometry;
pub mod grid;
pub mod listing;
pub mod page;
pub mod query;
pub mod selection;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::Axis;
pub use error::QueryError;
pub use figure::{render_text_panel, Figure, FigureKind, RenderOptions};
pub use listing::{Listing, ListingsTable};
pub use page::{pages, AnalysisPage, HomePage, Page, StatisticsPage};
pub use query::{filter_and_group, Aggregate, DerivedTable, Dimension, GroupRow, NumericField};
pub use selection::Selection;
pub use text::TextShaper;
pub use theme::{find_scale, find_theme, ColorScale, Theme};
