// File: crates/dash-core/src/axis.rs
// Summary: Value-axis model with label and range.

use crate::query::DerivedTable;

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    /// Value axis covering a derived table: zero up to the largest aggregate
    /// with a little headroom. An empty table gets a unit range.
    pub fn for_table(table: &DerivedTable) -> Self {
        let max = table.max_value();
        let max = if max > 0.0 { max * 1.05 } else { 1.0 };
        Self::new(table.metric.clone(), 0.0, max)
    }
}
