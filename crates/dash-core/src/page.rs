// File: crates/dash-core/src/page.rs
// Summary: Page trait and the three dashboard views (HOME, STATISTICS, ANALYSIS).

use crate::error::QueryError;
use crate::figure::{Figure, FigureKind};
use crate::listing::ListingsTable;
use crate::query::{filter_and_group, Aggregate, Dimension, NumericField};
use crate::selection::Selection;
use crate::theme::ColorScale;

/// One named view. A page turns the table plus the live selection into the
/// figures it displays; the shells only navigate and render.
pub trait Page {
    fn id(&self) -> &'static str;
    fn title(&self) -> &str;
    /// Intro text shown when a page has no figures.
    fn intro(&self) -> &[&'static str] { &[] }
    fn build(&self, table: &ListingsTable, selection: &Selection) -> Result<Vec<Figure>, QueryError>;
}

/// The pages in navigation order.
pub fn pages() -> Vec<Box<dyn Page>> {
    vec![Box::new(HomePage), Box::new(StatisticsPage), Box::new(AnalysisPage)]
}

pub struct HomePage;

impl Page for HomePage {
    fn id(&self) -> &'static str { "home" }

    fn title(&self) -> &str { "HOME" }

    fn intro(&self) -> &[&'static str] {
        &[
            "Stayscope explores a table of short-term-rental listings.",
            "",
            "Filter by country, property type, room type, and price range;",
            "every chart recomputes from the filtered rows on each change.",
            "",
            "STATISTICS ranks property types, hosts, and countries by listing",
            "counts; ANALYSIS maps mean price and availability per country.",
        ]
    }

    fn build(&self, _table: &ListingsTable, _selection: &Selection) -> Result<Vec<Figure>, QueryError> {
        Ok(Vec::new())
    }
}

pub struct StatisticsPage;

impl Page for StatisticsPage {
    fn id(&self) -> &'static str { "statistics" }

    fn title(&self) -> &str { "STATISTICS" }

    fn build(&self, table: &ListingsTable, selection: &Selection) -> Result<Vec<Figure>, QueryError> {
        let top_properties = filter_and_group(table, selection, Dimension::PropertyType, Aggregate::Count)?
            .top_n(10);
        let top_hosts = filter_and_group(table, selection, Dimension::HostName, Aggregate::Count)?
            .top_n(10);
        let room_counts = filter_and_group(table, selection, Dimension::RoomType, Aggregate::Count)?;
        let country_counts = filter_and_group(table, selection, Dimension::Country, Aggregate::Count)?;
        let room_reviews = filter_and_group(
            table,
            selection,
            Dimension::RoomType,
            Aggregate::Mean(NumericField::ReviewScores),
        )?
        .sorted_by_value(true);
        let room_prices = filter_and_group(
            table,
            selection,
            Dimension::RoomType,
            Aggregate::Mean(NumericField::Price),
        )?
        .sorted_by_value(true);

        Ok(vec![
            Figure::new(
                "Top 10 Property Types",
                FigureKind::Bar { horizontal: true },
                top_properties,
                ColorScale::sunset(),
            ),
            Figure::new(
                "Top 10 Hosts by Listings",
                FigureKind::Bar { horizontal: true },
                top_hosts,
                ColorScale::sunset(),
            ),
            Figure::new(
                "Listings per Room Type",
                FigureKind::Pie,
                room_counts,
                ColorScale::rainbow(),
            ),
            Figure::new(
                "Listings per Country",
                FigureKind::Choropleth,
                country_counts,
                ColorScale::plasma(),
            ),
            Figure::new(
                "Mean Review Score per Room Type",
                FigureKind::Bar { horizontal: false },
                room_reviews,
                ColorScale::viridis(),
            ),
            Figure::new(
                "Mean Price per Room Type",
                FigureKind::Bar { horizontal: false },
                room_prices,
                ColorScale::viridis(),
            ),
        ])
    }
}

pub struct AnalysisPage;

impl Page for AnalysisPage {
    fn id(&self) -> &'static str { "analysis" }

    fn title(&self) -> &str { "ANALYSIS" }

    fn build(&self, table: &ListingsTable, selection: &Selection) -> Result<Vec<Figure>, QueryError> {
        let room_prices = filter_and_group(
            table,
            selection,
            Dimension::RoomType,
            Aggregate::Mean(NumericField::Price),
        )?
        .sorted_by_value(true);
        let country_prices = filter_and_group(
            table,
            selection,
            Dimension::Country,
            Aggregate::Mean(NumericField::Price),
        )?;
        let country_availability = filter_and_group(
            table,
            selection,
            Dimension::Country,
            Aggregate::Mean(NumericField::Availability365),
        )?;
        let room_availability = filter_and_group(
            table,
            selection,
            Dimension::RoomType,
            Aggregate::Mean(NumericField::Availability365),
        )?;

        Ok(vec![
            Figure::new(
                "Mean Price per Room Type",
                FigureKind::Bar { horizontal: false },
                room_prices,
                ColorScale::sunset(),
            ),
            Figure::new(
                "Mean Price per Country",
                FigureKind::ScatterGeo,
                country_prices,
                ColorScale::sunset(),
            ),
            Figure::new(
                "Mean Availability per Country",
                FigureKind::ScatterGeo,
                country_availability,
                ColorScale::sunset(),
            ),
            Figure::new(
                "Mean Availability per Room Type",
                FigureKind::Pie,
                room_availability,
                ColorScale::set1(),
            ),
        ])
    }
}
