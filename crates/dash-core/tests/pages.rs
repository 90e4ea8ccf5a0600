// File: crates/dash-core/tests/pages.rs
// Purpose: Validate that each page builds its expected figure set from the
// live selection.

use dash_core::{pages, FigureKind, Listing, ListingsTable, Selection};

fn table() -> ListingsTable {
    ListingsTable::new(vec![
        Listing::try_new("United States", "House", "Entire home", "Ana", "a", 120.0, 200, Some(4.6)).unwrap(),
        Listing::try_new("United States", "Apartment", "Entire home", "Bob", "b", 90.0, 150, Some(4.1)).unwrap(),
        Listing::try_new("Portugal", "Apartment", "Private room", "Bob", "c", 35.0, 320, None).unwrap(),
        Listing::try_new("Brazil", "Loft", "Shared room", "Cid", "d", 20.0, 300, Some(3.9)).unwrap(),
    ])
}

#[test]
fn navigation_order_and_ids() {
    let all = pages();
    let ids: Vec<&str> = all.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["home", "statistics", "analysis"]);
}

#[test]
fn home_has_intro_but_no_figures() {
    let t = table();
    let sel = Selection::from_table(&t);
    let all = pages();
    let home = &all[0];
    assert!(!home.intro().is_empty());
    assert!(home.build(&t, &sel).expect("build").is_empty());
}

#[test]
fn statistics_builds_six_figures() {
    let t = table();
    let sel = Selection::from_table(&t);
    let figures = pages()[1].build(&t, &sel).expect("build");
    assert_eq!(figures.len(), 6);
    assert_eq!(figures[0].kind, FigureKind::Bar { horizontal: true });
    assert_eq!(figures[2].kind, FigureKind::Pie);
    assert_eq!(figures[3].kind, FigureKind::Choropleth);
    // Ranked tables never exceed ten groups.
    assert!(figures[0].table.len() <= 10);
    assert!(figures[1].table.len() <= 10);
}

#[test]
fn analysis_builds_four_figures() {
    let t = table();
    let sel = Selection::from_table(&t);
    let figures = pages()[2].build(&t, &sel).expect("build");
    assert_eq!(figures.len(), 4);
    assert_eq!(figures[1].kind, FigureKind::ScatterGeo);
    assert_eq!(figures[3].kind, FigureKind::Pie);

    // Mean price per room type is presented in ascending value order.
    let prices = &figures[0].table;
    for pair in prices.groups.windows(2) {
        assert!(pair[0].value <= pair[1].value);
    }
}

#[test]
fn narrowed_selection_flows_into_every_figure() {
    let t = table();
    let mut sel = Selection::from_table(&t);
    sel.set_countries(["Portugal".to_string()]);

    for page in pages() {
        for figure in page.build(&t, &sel).expect("build") {
            for group in &figure.table.groups {
                // Only values reachable from the Portugal row may appear.
                assert_ne!(group.key, "House");
                assert_ne!(group.key, "United States");
            }
        }
    }
}

#[test]
fn empty_selection_builds_empty_figures_without_error() {
    let t = table();
    let mut sel = Selection::from_table(&t);
    sel.set_room_types(Vec::new());

    let figures = pages()[1].build(&t, &sel).expect("empty result is not an error");
    assert!(figures.iter().all(|f| f.table.is_empty()));
}
