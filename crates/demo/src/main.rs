// File: crates/demo/src/main.rs
// Summary: Demo loads a listings CSV and renders every page's figures to PNGs.

mod loader;

use anyhow::{Context, Result};
use dash_core::{pages, RenderOptions, Selection};
use std::path::PathBuf;

fn main() -> Result<()> {
    // Accept path from CLI or fall back to the sample filename.
    let raw = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "airbnb_listings.csv".to_string());
    let path = PathBuf::from(&raw);
    println!("Using input file: {}", path.display());

    let (table, summary) = loader::load_listings_csv(&path)
        .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    println!("Loaded {} listings ({} rows skipped)", summary.rows, summary.skipped);

    if table.is_empty() {
        anyhow::bail!("no listings loaded — check headers/delimiter.");
    }

    let (min_p, max_p) = table.price_bounds();
    println!(
        "Observed: {} countries, {} property types, {} room types, price [{:.2}, {:.2}]",
        table.countries().len(),
        table.property_types().len(),
        table.room_types().len(),
        min_p,
        max_p
    );

    // Full selection: everything observed, full price range.
    let selection = Selection::from_table(&table);
    let opts = RenderOptions::default();

    for page in pages() {
        for line in page.intro() {
            println!("{line}");
        }
        let figures = match page.build(&table, &selection) {
            Ok(f) => f,
            // Query errors are user-visible messages, never a crash.
            Err(e) => {
                eprintln!("{}: {}", page.title(), e);
                continue;
            }
        };
        for figure in figures {
            let out = out_name_with(page.id(), &figure.title);
            figure.render_to_png(&opts, &out)?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

/// Produce output file name like target/out/statistics_top_10_property_types.png
fn out_name_with(page_id: &str, title: &str) -> PathBuf {
    let slug: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = slug.trim_matches('_').to_string();
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("{page_id}_{slug}.png"));
    out
}
