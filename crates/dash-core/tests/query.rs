// File: crates/dash-core/tests/query.rs
// Purpose: Validate the filter-and-aggregate layer: predicates, grouping,
// mean semantics, ordering, ranking, and the documented edge cases.

use dash_core::{filter_and_group, Aggregate, Dimension, Listing, ListingsTable, NumericField, QueryError, Selection};

fn listing(country: &str, prop: &str, room: &str, price: f64) -> Listing {
    Listing::try_new(country, prop, room, "Ana", "listing", price, 180, Some(4.5)).expect("valid row")
}

fn sample_table() -> ListingsTable {
    ListingsTable::new(vec![
        listing("US", "House", "Entire home", 100.0),
        listing("US", "Apartment", "Entire home", 200.0),
        listing("FR", "House", "Private room", 50.0),
    ])
}

#[test]
fn counts_by_property_type() {
    let table = sample_table();
    let mut sel = Selection::from_table(&table);
    sel.set_price_range(0.0, 1000.0);

    let out = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count)
        .expect("query succeeds");
    assert_eq!(out.metric, "Listings");
    assert_eq!(out.len(), 2);
    assert_eq!(out.get("House"), Some(2.0));
    assert_eq!(out.get("Apartment"), Some(1.0));
    // Lexicographic key order.
    assert_eq!(out.groups[0].key, "Apartment");
    assert_eq!(out.groups[1].key, "House");
}

#[test]
fn price_filter_excludes_rows_from_mean() {
    let table = sample_table();
    let mut sel = Selection::from_table(&table);
    sel.set_price_range(60.0, 1000.0);

    let out = filter_and_group(&table, &sel, Dimension::RoomType, Aggregate::Mean(NumericField::Price))
        .expect("query succeeds");
    // The FR row at 50 is filtered out, so only "Entire home" remains.
    assert_eq!(out.len(), 1);
    assert_eq!(out.get("Entire home"), Some(150.0));
    assert_eq!(out.get("Private room"), None);
}

#[test]
fn soundness_and_completeness_against_manual_scan() {
    let table = sample_table();
    let mut sel = Selection::from_table(&table);
    sel.set_room_types(["Entire home".to_string()]);

    let out = filter_and_group(&table, &sel, Dimension::Country, Aggregate::Count).expect("query");

    // Every output group is backed only by rows passing the predicate, and
    // every passing row is reflected in its group's count.
    let mut expected = std::collections::BTreeMap::new();
    for row in table.rows() {
        if sel.matches(row) {
            *expected.entry(row.country.clone()).or_insert(0usize) += 1;
        }
    }
    assert_eq!(out.len(), expected.len());
    for (key, count) in expected {
        assert_eq!(out.get(&key), Some(count as f64));
    }
}

#[test]
fn deterministic_for_identical_inputs() {
    let table = sample_table();
    let sel = Selection::from_table(&table);

    let a = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count).expect("first");
    let b = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count).expect("second");
    assert_eq!(a, b);
}

#[test]
fn empty_country_set_yields_empty_table_not_error() {
    let table = sample_table();
    let mut sel = Selection::from_table(&table);
    sel.set_countries(Vec::new());

    let out = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count)
        .expect("empty result is not an error");
    assert!(out.is_empty());
}

#[test]
fn full_observed_price_range_matches_unfiltered_counts() {
    let table = sample_table();
    let sel = Selection::from_table(&table);
    assert!(sel.is_full_price_range());

    let out = filter_and_group(&table, &sel, Dimension::Country, Aggregate::Count).expect("query");
    assert_eq!(out.get("US"), Some(2.0));
    assert_eq!(out.get("FR"), Some(1.0));
}

#[test]
fn top_n_ranks_descending_and_is_idempotent() {
    let rows = vec![
        listing("US", "House", "Entire home", 10.0),
        listing("US", "House", "Entire home", 10.0),
        listing("US", "House", "Entire home", 10.0),
        listing("US", "Apartment", "Entire home", 10.0),
        listing("US", "Apartment", "Entire home", 10.0),
        listing("US", "Cabin", "Entire home", 10.0),
        listing("US", "Boat", "Entire home", 10.0),
    ];
    let table = ListingsTable::new(rows);
    let sel = Selection::from_table(&table);

    let ranked = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count)
        .expect("query")
        .top_n(2);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked.groups[0].key, "House");
    assert_eq!(ranked.groups[1].key, "Apartment");

    let again = ranked.clone().top_n(2);
    assert_eq!(again, ranked);

    // Ties break lexicographically: Boat and Cabin both count 1.
    let ranked3 = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Count)
        .expect("query")
        .top_n(3);
    assert_eq!(ranked3.groups[2].key, "Boat");
}

#[test]
fn top_n_with_fewer_groups_returns_all() {
    let table = sample_table();
    let sel = Selection::from_table(&table);
    let ranked = filter_and_group(&table, &sel, Dimension::RoomType, Aggregate::Count)
        .expect("query")
        .top_n(10);
    assert_eq!(ranked.len(), 2);
}

#[test]
fn mean_ignores_missing_review_scores() {
    let rows = vec![
        Listing::try_new("US", "House", "Entire home", "Ana", "a", 100.0, 100, Some(4.0)).unwrap(),
        Listing::try_new("US", "House", "Entire home", "Bob", "b", 100.0, 100, None).unwrap(),
        Listing::try_new("US", "House", "Entire home", "Cid", "c", 100.0, 100, Some(5.0)).unwrap(),
        // A group where every score is missing is omitted from the output.
        Listing::try_new("US", "Tent", "Shared room", "Dee", "d", 20.0, 100, None).unwrap(),
    ];
    let table = ListingsTable::new(rows);
    let sel = Selection::from_table(&table);

    let out = filter_and_group(
        &table,
        &sel,
        Dimension::PropertyType,
        Aggregate::Mean(NumericField::ReviewScores),
    )
    .expect("query");
    assert_eq!(out.get("House"), Some(4.5));
    assert_eq!(out.get("Tent"), None);
}

#[test]
fn sorted_by_value_orders_for_presentation() {
    let table = sample_table();
    let sel = Selection::from_table(&table);
    let out = filter_and_group(&table, &sel, Dimension::PropertyType, Aggregate::Mean(NumericField::Price))
        .expect("query")
        .sorted_by_value(true);
    assert_eq!(out.groups[0].key, "House"); // mean 75
    assert_eq!(out.groups[1].key, "Apartment"); // mean 200
}

#[test]
fn dimension_and_field_parsing() {
    assert_eq!("room_type".parse::<Dimension>().expect("known"), Dimension::RoomType);
    assert_eq!("PRICE".parse::<NumericField>().expect("known"), NumericField::Price);

    let err = "bedrooms".parse::<Dimension>().unwrap_err();
    assert_eq!(err, QueryError::UnknownDimension("bedrooms".to_string()));

    // A categorical column is not a valid mean target.
    let err = "country".parse::<NumericField>().unwrap_err();
    assert_eq!(err, QueryError::UnknownAggregation("country".to_string()));
}
