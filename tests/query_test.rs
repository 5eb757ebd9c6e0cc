mod common;

use common::{artist, location};
use groupie_tracker::merge::merge;
use groupie_tracker::query::{SearchError, get_by_id, list_all, normalize_query, search};
use groupie_tracker::types::{
    Catalog, CatalogOrigin, Locations, MergedView, RawCollections, Relations,
};

fn queen_view() -> MergedView {
    let artists = vec![artist(1, "Queen", &["Freddie Mercury"], "Queen", 1970)];
    let locations = Locations {
        index: vec![location(1, &["london"])],
    };
    merge(&artists, &locations, &Relations::default())
}

fn ids(found: &[groupie_tracker::types::Artist]) -> Vec<u32> {
    found.iter().map(|a| a.id).collect()
}

#[test]
fn test_search_member_case_insensitive() {
    let view = queen_view();

    let found = search(&view, "freddie").unwrap();

    assert_eq!(ids(&found), vec![1]);
}

#[test]
fn test_search_no_match() {
    let view = queen_view();

    assert_eq!(
        search(&view, "berlin"),
        Err(SearchError::NoMatch("berlin".to_string()))
    );
}

#[test]
fn test_search_first_album_exact_match_only() {
    let artists = vec![
        artist(1, "Queen", &["Freddie Mercury"], "Queen", 1970),
        artist(2, "Tribute Act", &["Someone Else"], "queen", 1999),
        artist(3, "Another Band", &["Nobody"], "Queen II", 1974),
    ];
    let view = merge(&artists, &Locations::default(), &Relations::default());

    let found = search(&view, "Queen").unwrap();

    assert_eq!(ids(&found), vec![1, 2]);
}

#[test]
fn test_search_creation_year() {
    let artists = vec![
        artist(1, "Queen", &[], "Queen", 1970),
        artist(2, "Nirvana", &[], "Bleach", 1987),
    ];
    let view = merge(&artists, &Locations::default(), &Relations::default());

    assert_eq!(ids(&search(&view, "1987").unwrap()), vec![2]);
}

#[test]
fn test_search_locations_only_as_fallback() {
    let artists = vec![
        artist(1, "Paris Combo", &["Belle du Berry"], "Paris Combo", 1995),
        artist(2, "Queen", &["Freddie Mercury"], "Queen", 1970),
    ];
    let locations = Locations {
        index: vec![location(1, &["lyon-france"]), location(2, &["paris-france"])],
    };
    let view = merge(&artists, &locations, &Relations::default());

    // a direct name match hides location matches
    assert_eq!(ids(&search(&view, "paris").unwrap()), vec![1]);
    // nothing matches directly, so locations are consulted
    assert_eq!(ids(&search(&view, "lyon").unwrap()), vec![1]);
    assert_eq!(ids(&search(&view, "France").unwrap()), vec![1, 2]);
}

#[test]
fn test_search_strips_suggestion_labels() {
    let view = queen_view();

    assert_eq!(ids(&search(&view, "Member: Freddie Mercury").unwrap()), vec![1]);
    assert_eq!(ids(&search(&view, "Location: london").unwrap()), vec![1]);
    assert_eq!(normalize_query("  Name: Queen "), "queen");
}

#[test]
fn test_search_empty_query() {
    let view = queen_view();

    assert_eq!(search(&view, ""), Err(SearchError::EmptyQuery));
    assert_eq!(search(&view, "   "), Err(SearchError::EmptyQuery));
    assert_eq!(search(&view, "Name: "), Err(SearchError::EmptyQuery));
}

#[test]
fn test_search_on_empty_view() {
    let view = MergedView::default();

    assert!(matches!(search(&view, "queen"), Err(SearchError::NoMatch(_))));
}

#[test]
fn test_get_by_id() {
    let view = queen_view();

    assert_eq!(get_by_id(&view, 1).map(|a| a.name.as_str()), Some("Queen"));
    assert!(get_by_id(&view, 2).is_none());
    assert!(get_by_id(&view, 0).is_none());
}

#[test]
fn test_list_all_returns_whole_view() {
    let catalog = Catalog::build(
        RawCollections {
            artists: vec![artist(1, "Queen", &[], "Queen", 1970)],
            ..RawCollections::default()
        },
        CatalogOrigin::Snapshot,
    );

    let view = list_all(&catalog);

    assert_eq!(view.artists.len(), 1);
    assert_eq!(view.search.names, vec!["Queen"]);
}
