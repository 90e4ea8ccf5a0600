// File: crates/dash-core/src/geo.rs
// Summary: Country centroid lookup and equirectangular projection for the map figures.

use crate::geometry::RectI32;

/// Approximate (latitude, longitude) centroids, keyed by the country names
/// that appear in listings data. Lookup is case-insensitive.
const COUNTRY_CENTROIDS: &[(&str, f64, f64)] = &[
    ("Australia", -25.3, 133.8),
    ("Austria", 47.5, 14.6),
    ("Belgium", 50.6, 4.7),
    ("Brazil", -10.8, -52.9),
    ("Canada", 56.1, -106.3),
    ("China", 35.9, 104.2),
    ("Denmark", 56.0, 10.0),
    ("France", 46.6, 2.5),
    ("Germany", 51.1, 10.4),
    ("Greece", 39.3, 22.9),
    ("Hong Kong", 22.3, 114.2),
    ("India", 21.1, 78.7),
    ("Ireland", 53.4, -8.1),
    ("Italy", 42.8, 12.8),
    ("Japan", 36.6, 138.0),
    ("Mexico", 23.9, -102.5),
    ("Netherlands", 52.2, 5.5),
    ("New Zealand", -41.8, 172.8),
    ("Norway", 64.6, 12.7),
    ("Portugal", 39.6, -8.0),
    ("Singapore", 1.35, 103.8),
    ("Spain", 40.2, -3.6),
    ("Sweden", 62.8, 16.7),
    ("Switzerland", 46.8, 8.2),
    ("Turkey", 39.1, 35.2),
    ("United Kingdom", 54.2, -2.9),
    ("United States", 39.8, -98.6),
];

/// Centroid for `country`, if known.
pub fn centroid(country: &str) -> Option<(f64, f64)> {
    let want = country.trim();
    COUNTRY_CENTROIDS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(want))
        .map(|&(_, lat, lon)| (lat, lon))
}

/// Map (lat, lon) onto `rect` with a plain equirectangular projection:
/// lon -180..180 spans left..right, lat 90..-90 spans top..bottom.
pub fn project(lat: f64, lon: f64, rect: RectI32) -> (f32, f32) {
    let x = rect.left as f64 + (lon + 180.0) / 360.0 * rect.width() as f64;
    let y = rect.top as f64 + (90.0 - lat) / 180.0 * rect.height() as f64;
    (x as f32, y as f32)
}
