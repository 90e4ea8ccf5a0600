// File: crates/dash-core/src/query.rs
// Summary: Filter-and-aggregate query layer (grouping dimensions, aggregates, derived tables).

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::QueryError;
use crate::listing::{Listing, ListingsTable};
use crate::selection::Selection;

/// Categorical column used to bucket rows before aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Country,
    PropertyType,
    RoomType,
    HostName,
}

impl Dimension {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Dimension::Country => "country",
            Dimension::PropertyType => "property_type",
            Dimension::RoomType => "room_type",
            Dimension::HostName => "host_name",
        }
    }

    /// Human-readable axis label.
    pub const fn label(&self) -> &'static str {
        match self {
            Dimension::Country => "Country",
            Dimension::PropertyType => "Property Type",
            Dimension::RoomType => "Room Type",
            Dimension::HostName => "Host",
        }
    }

    fn key_of<'a>(&self, l: &'a Listing) -> &'a str {
        match self {
            Dimension::Country => &l.country,
            Dimension::PropertyType => &l.property_type,
            Dimension::RoomType => &l.room_type,
            Dimension::HostName => &l.host_name,
        }
    }
}

impl FromStr for Dimension {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "country" => Ok(Dimension::Country),
            "property_type" => Ok(Dimension::PropertyType),
            "room_type" => Ok(Dimension::RoomType),
            "host_name" => Ok(Dimension::HostName),
            _ => Err(QueryError::UnknownDimension(s.to_string())),
        }
    }
}

/// Numeric column a mean can be taken over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericField {
    Price,
    Availability365,
    ReviewScores,
}

impl NumericField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            NumericField::Price => "price",
            NumericField::Availability365 => "availability_365",
            NumericField::ReviewScores => "review_scores",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            NumericField::Price => "Price",
            NumericField::Availability365 => "Availability (days)",
            NumericField::ReviewScores => "Review Score",
        }
    }

    /// Value of this field on a row; `None` counts as missing and is
    /// excluded from mean denominators.
    fn value_of(&self, l: &Listing) -> Option<f64> {
        match self {
            NumericField::Price => Some(l.price),
            NumericField::Availability365 => Some(f64::from(l.availability_365)),
            NumericField::ReviewScores => l.review_scores,
        }
    }
}

impl FromStr for NumericField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(NumericField::Price),
            "availability_365" => Ok(NumericField::Availability365),
            "review_scores" => Ok(NumericField::ReviewScores),
            _ => Err(QueryError::UnknownAggregation(s.to_string())),
        }
    }
}

/// Aggregation applied per group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregate {
    /// Row count; the metric is labeled "Listings".
    Count,
    /// Arithmetic mean of a numeric column over its non-missing values.
    Mean(NumericField),
}

impl Aggregate {
    pub fn metric_label(&self) -> String {
        match self {
            Aggregate::Count => "Listings".to_string(),
            Aggregate::Mean(f) => format!("Mean {}", f.label()),
        }
    }
}

/// One bucket of a derived table.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupRow {
    pub key: String,
    pub value: f64,
}

/// Grouped/aggregated result feeding exactly one figure. Recomputed from
/// scratch on every selection change; never cached or mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedTable {
    pub dimension: Dimension,
    pub metric: String,
    pub groups: Vec<GroupRow>,
}

impl DerivedTable {
    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    /// Largest aggregate value, 0.0 for an empty table.
    pub fn max_value(&self) -> f64 {
        self.groups.iter().fold(0.0_f64, |m, g| m.max(g.value))
    }

    /// Aggregate value for `key`, if the group exists.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.groups.iter().find(|g| g.key == key).map(|g| g.value)
    }

    /// Rank by aggregate value descending and keep the first `n` groups.
    /// Ties break on the key's lexicographic order. Fewer than `n` groups
    /// are returned as-is; truncation is idempotent.
    pub fn top_n(mut self, n: usize) -> Self {
        self.groups.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.key.cmp(&b.key))
        });
        self.groups.truncate(n);
        self
    }

    /// Order groups by aggregate value for presentation. Ties break on the
    /// key's lexicographic order.
    pub fn sorted_by_value(mut self, ascending: bool) -> Self {
        self.groups.sort_by(|a, b| {
            let ord = a
                .value
                .partial_cmp(&b.value)
                .unwrap_or(std::cmp::Ordering::Equal);
            let ord = if ascending { ord } else { ord.reverse() };
            ord.then_with(|| a.key.cmp(&b.key))
        });
        self
    }
}

/// Filter `table` by `selection`, bucket the surviving rows by `dimension`,
/// and aggregate each bucket.
///
/// Pure and deterministic: identical inputs yield identical output, with
/// groups in lexicographic key order. An empty filter result produces an
/// empty table, not an error. The range invariant is checked defensively
/// even though `Selection` maintains it by construction.
pub fn filter_and_group(
    table: &ListingsTable,
    selection: &Selection,
    dimension: Dimension,
    agg: Aggregate,
) -> Result<DerivedTable, QueryError> {
    let (min, max) = selection.price_range();
    if min > max {
        return Err(QueryError::InvalidRange { min, max });
    }

    // (count, sum of present values, count of present values) per key.
    let mut buckets: BTreeMap<&str, (usize, f64, usize)> = BTreeMap::new();
    for l in table.rows() {
        if !selection.matches(l) {
            continue;
        }
        let entry = buckets.entry(dimension.key_of(l)).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Aggregate::Mean(field) = agg {
            if let Some(v) = field.value_of(l) {
                entry.1 += v;
                entry.2 += 1;
            }
        }
    }

    let groups = buckets
        .into_iter()
        .filter_map(|(key, (count, sum, present))| {
            let value = match agg {
                Aggregate::Count => count as f64,
                // A group whose every contribution is missing is omitted.
                Aggregate::Mean(_) => {
                    if present == 0 {
                        return None;
                    }
                    sum / present as f64
                }
            };
            Some(GroupRow { key: key.to_string(), value })
        })
        .collect();

    Ok(DerivedTable {
        dimension,
        metric: agg.metric_label(),
        groups,
    })
}
