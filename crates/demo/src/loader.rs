// File: crates/demo/src/loader.rs
// Summary: Listings CSV loader with header aliasing and per-row validation.

use anyhow::{Context, Result};
use dash_core::{Listing, ListingsTable};
use std::path::Path;

pub struct LoadSummary {
    pub rows: usize,
    pub skipped: usize,
}

/// Load a listings CSV into a validated table. Rows missing a required field
/// or failing `Listing::try_new` are skipped and counted, not fatal.
pub fn load_listings_csv(path: &Path) -> Result<(ListingsTable, LoadSummary)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();

    let idx = |names: &[&str]| -> Option<usize> {
        for (i, h) in headers.iter().enumerate() {
            for want in names {
                if h == want {
                    return Some(i);
                }
            }
        }
        None
    };

    let i_country = idx(&["country", "country_name"]);
    let i_prop = idx(&["property_type", "property"]);
    let i_room = idx(&["room_type", "room"]);
    let i_host = idx(&["host_name", "host"]);
    let i_name = idx(&["name", "listing_name", "title"]);
    let i_price = idx(&["price", "price_usd"]);
    let i_avail = idx(&["availability_365", "availability"]);
    let i_review = idx(&["review_scores", "review_score", "review_scores_rating"]);

    let (Some(i_country), Some(i_prop), Some(i_room), Some(i_price)) =
        (i_country, i_prop, i_room, i_price)
    else {
        anyhow::bail!(
            "missing one of the required columns country/property_type/room_type/price; headers were {:?}",
            headers
        );
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).map(str::trim).unwrap_or("");
        let opt_field = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).map(str::trim).unwrap_or("");

        let Some(price) = parse_price(field(i_price)) else {
            skipped += 1;
            continue;
        };
        let availability = opt_field(i_avail).parse::<u16>().unwrap_or(0);
        let review = parse_optional_f64(opt_field(i_review));

        match Listing::try_new(
            field(i_country),
            field(i_prop),
            field(i_room),
            opt_field(i_host),
            opt_field(i_name),
            price,
            availability.min(365),
            review,
        ) {
            Ok(listing) => rows.push(listing),
            Err(_) => skipped += 1,
        }
    }

    let summary = LoadSummary { rows: rows.len(), skipped };
    Ok((ListingsTable::new(rows), summary))
}

/// Prices sometimes carry a currency sign or thousands separators.
fn parse_price(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Empty fields mean "no value", not zero.
fn parse_optional_f64(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_csv(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("stayscope_loader_{name}.csv"));
        std::fs::write(&path, content).expect("write temp csv");
        path
    }

    #[test]
    fn loads_rows_with_aliased_headers() {
        let path = write_temp_csv(
            "alias",
            "Country,Property,Room,Host,Title,Price_USD,Availability,Review_Score\n\
             US,House,Entire home,Ana,Sea loft,\"$1,200\",120,4.5\n\
             FR,Apartment,Private room,Bob,Flat,80,300,\n",
        );
        let (table, summary) = load_listings_csv(&path).expect("load");
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(table.rows()[0].price, 1200.0);
        assert_eq!(table.rows()[1].review_scores, None);
    }

    #[test]
    fn skips_invalid_rows_and_counts_them() {
        let path = write_temp_csv(
            "skips",
            "country,property_type,room_type,host_name,name,price,availability_365,review_scores\n\
             US,House,Entire home,Ana,a,100,120,4.5\n\
             ,House,Entire home,Bob,b,100,120,4.5\n\
             US,House,Entire home,Cid,c,not-a-price,120,4.5\n",
        );
        let (table, summary) = load_listings_csv(&path).expect("load");
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let path = write_temp_csv("missing", "country,room_type,price\nUS,Entire home,100\n");
        assert!(load_listings_csv(&path).is_err());
    }
}
