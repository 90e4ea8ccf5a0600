use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dash_core::{filter_and_group, Aggregate, ColorScale, Dimension, Figure, FigureKind, Listing, ListingsTable, RenderOptions, Selection};

fn sample_figure(kind: FigureKind) -> Figure {
    const PROPS: &[&str] = &["House", "Apartment", "Loft", "Condominium", "Boat", "Cabin", "Villa", "Hut"];
    let mut rows = Vec::new();
    for i in 0..2_000usize {
        rows.push(
            Listing::try_new(
                "United States",
                PROPS[i % PROPS.len()],
                "Entire home",
                "Ana",
                format!("listing-{i}"),
                20.0 + (i % 300) as f64,
                (i % 366) as u16,
                None,
            )
            .expect("valid synthetic row"),
        );
    }
    let table = ListingsTable::new(rows);
    let sel = Selection::from_table(&table);
    let counts = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count).expect("query");
    Figure::new("bench", kind, counts, ColorScale::sunset())
}

fn bench_render(c: &mut Criterion) {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // isolate raster cost from font lookup

    let bar = sample_figure(FigureKind::Bar { horizontal: true });
    c.bench_function("render_bar_png_bytes", |b| {
        b.iter(|| {
            let bytes = bar.render_to_png_bytes(&opts).expect("render");
            let _ = black_box(bytes);
        });
    });

    let pie = sample_figure(FigureKind::Pie);
    c.bench_function("render_pie_rgba8", |b| {
        b.iter(|| {
            let px = pie.render_to_rgba8(&opts).expect("render");
            let _ = black_box(px);
        });
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
