use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use dash_core::{filter_and_group, Aggregate, Dimension, Listing, ListingsTable, NumericField, Selection};

fn gen_table(n: usize) -> ListingsTable {
    const COUNTRIES: &[&str] = &["United States", "Portugal", "Brazil", "Turkey", "Canada", "Spain"];
    const PROPS: &[&str] = &["House", "Apartment", "Loft", "Condominium", "Boat", "Cabin", "Villa"];
    const ROOMS: &[&str] = &["Entire home", "Private room", "Shared room"];
    const HOSTS: &[&str] = &["Ana", "Bob", "Cid", "Dee", "Eli", "Fay", "Gus", "Hal"];

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        // deterministic spread across the categorical domains
        let price = 20.0 + (i % 480) as f64;
        let review = if i % 7 == 0 { None } else { Some(3.0 + (i % 20) as f64 * 0.1) };
        rows.push(
            Listing::try_new(
                COUNTRIES[i % COUNTRIES.len()],
                PROPS[i % PROPS.len()],
                ROOMS[i % ROOMS.len()],
                HOSTS[i % HOSTS.len()],
                format!("listing-{i}"),
                price,
                (i % 366) as u16,
                review,
            )
            .expect("valid synthetic row"),
        );
    }
    ListingsTable::new(rows)
}

fn bench_filter_and_group(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_group");
    for &n in &[10_000usize, 100_000usize] {
        let table = gen_table(n);
        let full = Selection::from_table(&table);
        let mut narrow = Selection::from_table(&table);
        narrow.set_countries(["Portugal".to_string(), "Brazil".to_string()]);
        narrow.set_price_range(40.0, 160.0);

        for (name, sel) in [("full", &full), ("narrow", &narrow)] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{name}_count")), sel, |b, s| {
                b.iter(|| {
                    let out = filter_and_group(&table, s, Dimension::PropertyType, Aggregate::Count);
                    let _ = black_box(out);
                });
            });
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_{name}_mean")), sel, |b, s| {
                b.iter(|| {
                    let out = filter_and_group(
                        &table,
                        s,
                        Dimension::Country,
                        Aggregate::Mean(NumericField::Price),
                    );
                    let _ = black_box(out);
                });
            });
        }
    }
    group.finish();
}

fn bench_top_n(c: &mut Criterion) {
    let table = gen_table(100_000);
    let sel = Selection::from_table(&table);
    let ranked_input = filter_and_group(&table, &sel, Dimension::HostName, Aggregate::Count).expect("query");

    c.bench_function("top_n_10", |b| {
        b.iter_batched(
            || ranked_input.clone(),
            |t| { let _ = black_box(t.top_n(10)); },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_filter_and_group, bench_top_n);
criterion_main!(benches);
