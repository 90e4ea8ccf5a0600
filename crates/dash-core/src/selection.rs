// File: crates/dash-core/src/selection.rs
// First-class selection state: the four filter dimensions and helpers to
// update them from widgets while keeping the price-range invariant.

use std::collections::BTreeSet;

use crate::listing::{Listing, ListingsTable};

/// Current user-chosen filter values. Initialized to "everything selected,
/// full observed price range"; mutated only by the interaction handler;
/// never persisted beyond the session.
///
/// `price_range` keeps `min <= max` with both ends clamped to the table's
/// observed bounds, maintained by construction through the mutators.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub countries: BTreeSet<String>,
    pub property_types: BTreeSet<String>,
    pub room_types: BTreeSet<String>,
    price_range: (f64, f64),
    bounds: (f64, f64),
}

impl Selection {
    /// Selection over the whole table: all observed values of each dimension
    /// and the full observed price range.
    pub fn from_table(table: &ListingsTable) -> Self {
        let bounds = table.price_bounds();
        Self {
            countries: table.countries().into_iter().collect(),
            property_types: table.property_types().into_iter().collect(),
            room_types: table.room_types().into_iter().collect(),
            price_range: bounds,
            bounds,
        }
    }

    /// Reset to the full selection for `table`.
    pub fn reset(&mut self, table: &ListingsTable) {
        *self = Self::from_table(table);
    }

    pub fn price_range(&self) -> (f64, f64) { self.price_range }

    /// Observed price bounds captured at construction.
    pub fn price_bounds(&self) -> (f64, f64) { self.bounds }

    /// True when the range equals the full observed bounds.
    pub fn is_full_price_range(&self) -> bool {
        (self.price_range.0 - self.bounds.0).abs() < 1e-9
            && (self.price_range.1 - self.bounds.1).abs() < 1e-9
    }

    /// Set the range, clamping both ends to the observed bounds and swapping
    /// them if given out of order.
    pub fn set_price_range(&mut self, min: f64, max: f64) {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let lo = lo.clamp(self.bounds.0, self.bounds.1);
        let hi = hi.clamp(self.bounds.0, self.bounds.1);
        self.price_range = (lo, hi);
    }

    /// Shift the lower bound by `delta`, keeping `min <= max`.
    pub fn nudge_min(&mut self, delta: f64) {
        let lo = (self.price_range.0 + delta).clamp(self.bounds.0, self.price_range.1);
        self.price_range.0 = lo;
    }

    /// Shift the upper bound by `delta`, keeping `min <= max`.
    pub fn nudge_max(&mut self, delta: f64) {
        let hi = (self.price_range.1 + delta).clamp(self.price_range.0, self.bounds.1);
        self.price_range.1 = hi;
    }

    pub fn set_countries(&mut self, values: impl IntoIterator<Item = String>) {
        self.countries = values.into_iter().collect();
    }

    pub fn set_property_types(&mut self, values: impl IntoIterator<Item = String>) {
        self.property_types = values.into_iter().collect();
    }

    pub fn set_room_types(&mut self, values: impl IntoIterator<Item = String>) {
        self.room_types = values.into_iter().collect();
    }

    pub fn toggle_country(&mut self, value: &str) {
        Self::toggle(&mut self.countries, value);
    }

    pub fn toggle_property_type(&mut self, value: &str) {
        Self::toggle(&mut self.property_types, value);
    }

    pub fn toggle_room_type(&mut self, value: &str) {
        Self::toggle(&mut self.room_types, value);
    }

    /// The conjunctive filter predicate. An empty category set matches no
    /// rows; that is the documented multi-select behavior.
    pub fn matches(&self, l: &Listing) -> bool {
        self.countries.contains(&l.country)
            && self.property_types.contains(&l.property_type)
            && self.room_types.contains(&l.room_type)
            && l.price >= self.price_range.0
            && l.price <= self.price_range.1
    }

    /// One-line summary for status bars: "3 countries, 5 types, 2 rooms, $40-$980".
    pub fn summary(&self) -> String {
        format!(
            "{} countries, {} property types, {} room types, {:.0}-{:.0}",
            self.countries.len(),
            self.property_types.len(),
            self.room_types.len(),
            self.price_range.0,
            self.price_range.1,
        )
    }

    fn toggle(set: &mut BTreeSet<String>, value: &str) {
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }
}
