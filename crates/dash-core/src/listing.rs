// File: crates/dash-core/src/listing.rs
// Summary: Listing row model and the immutable listings table with observed-domain accessors.

/// One rentable property record. Each listing belongs to exactly one country,
/// one property type, and one room type.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub country: String,
    pub property_type: String,
    pub room_type: String,
    pub host_name: String,
    pub name: String,
    pub price: f64,
    pub availability_365: u16,
    pub review_scores: Option<f64>,
}

impl Listing {
    /// Try to construct a listing enforcing row invariants:
    /// non-empty categorical fields, finite non-negative price,
    /// availability within 0..=365, finite review score when present.
    pub fn try_new(
        country: impl Into<String>,
        property_type: impl Into<String>,
        room_type: impl Into<String>,
        host_name: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        availability_365: u16,
        review_scores: Option<f64>,
    ) -> Result<Self, &'static str> {
        let country = country.into();
        let property_type = property_type.into();
        let room_type = room_type.into();
        if country.trim().is_empty() { return Err("empty country"); }
        if property_type.trim().is_empty() { return Err("empty property_type"); }
        if room_type.trim().is_empty() { return Err("empty room_type"); }
        if !price.is_finite() || price < 0.0 { return Err("price not a non-negative number"); }
        if availability_365 > 365 { return Err("availability above 365"); }
        if let Some(r) = review_scores {
            if !r.is_finite() { return Err("review score not finite"); }
        }
        Ok(Self {
            country,
            property_type,
            room_type,
            host_name: host_name.into(),
            name: name.into(),
            price,
            availability_365,
            review_scores,
        })
    }
}

/// Immutable table of listings, built once per session. Rows are never
/// mutated after construction; widgets are populated from the observed
/// domains exposed here.
#[derive(Clone, Debug)]
pub struct ListingsTable {
    rows: Vec<Listing>,
}

impl ListingsTable {
    pub fn new(rows: Vec<Listing>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Listing] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Distinct countries, sorted.
    pub fn countries(&self) -> Vec<String> {
        Self::distinct(self.rows.iter().map(|l| l.country.as_str()))
    }

    /// Distinct property types, sorted.
    pub fn property_types(&self) -> Vec<String> {
        Self::distinct(self.rows.iter().map(|l| l.property_type.as_str()))
    }

    /// Distinct room types, sorted.
    pub fn room_types(&self) -> Vec<String> {
        Self::distinct(self.rows.iter().map(|l| l.room_type.as_str()))
    }

    /// Observed (min, max) price across all rows; (0.0, 0.0) for an empty table.
    pub fn price_bounds(&self) -> (f64, f64) {
        let mut min_p = f64::INFINITY;
        let mut max_p = f64::NEG_INFINITY;
        for l in &self.rows {
            min_p = min_p.min(l.price);
            max_p = max_p.max(l.price);
        }
        if !min_p.is_finite() || !max_p.is_finite() {
            return (0.0, 0.0);
        }
        (min_p, max_p)
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut v: Vec<String> = values.map(|s| s.to_string()).collect();
        v.sort();
        v.dedup();
        v
    }
}
