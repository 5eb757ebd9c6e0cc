mod common;

use common::{artist, location, relation, sample_raw};
use groupie_tracker::merge::{build_search_index, merge, merge_raw, merge_stats};
use groupie_tracker::types::{Artist, Locations, RawCollections, Relations};

#[test]
fn test_merge_equal_lengths_enriches_every_artist() {
    let raw = sample_raw();
    let view = merge_raw(&raw);

    assert_eq!(view.artists.len(), raw.artists.len());
    for (i, artist) in view.artists.iter().enumerate() {
        assert_eq!(artist.id, raw.artists[i].id);
        assert_eq!(artist.locations, raw.locations.index[i].locations);
        assert_eq!(artist.relations, raw.relations.index[i].dates_locations);
    }
}

#[test]
fn test_merge_keeps_record_fields() {
    let raw = sample_raw();
    let view = merge_raw(&raw);

    let queen = &view.artists[0];
    assert_eq!(queen.name, "Queen");
    assert_eq!(queen.members, vec!["Freddie Mercury", "Brian May"]);
    assert_eq!(queen.creation_date, 1970);
    assert_eq!(queen.first_album, "14-12-1973");
    assert_eq!(queen.image, raw.artists[0].image);
    assert_eq!(queen.concert_dates, raw.artists[0].concert_dates);
}

#[test]
fn test_merge_joins_on_id_not_position() {
    let artists = vec![
        artist(1, "Queen", &["Freddie Mercury"], "Queen", 1970),
        artist(2, "Pink Floyd", &["Roger Waters"], "The Piper", 1965),
    ];
    let locations = Locations {
        index: vec![location(2, &["paris-france"]), location(1, &["london-uk"])],
    };
    let relations = Relations {
        index: vec![
            relation(2, "paris-france", &["02-02-1977"]),
            relation(1, "london-uk", &["01-01-1975"]),
        ],
    };

    let view = merge(&artists, &locations, &relations);

    assert_eq!(view.artists[0].locations, vec!["london-uk"]);
    assert_eq!(view.artists[1].locations, vec!["paris-france"]);
    assert!(view.artists[0].relations.contains_key("london-uk"));
    assert!(view.artists[1].relations.contains_key("paris-france"));
}

#[test]
fn test_merge_skips_enrichment_for_missing_ids() {
    let artists = vec![
        artist(1, "Queen", &["Freddie Mercury"], "Queen", 1970),
        artist(2, "Pink Floyd", &["Roger Waters"], "The Piper", 1965),
        artist(3, "Nirvana", &["Kurt Cobain"], "Bleach", 1987),
    ];
    let locations = Locations {
        index: vec![location(1, &["london-uk"])],
    };
    let relations = Relations::default();

    let view = merge(&artists, &locations, &relations);

    assert_eq!(view.artists.len(), 3);
    assert_eq!(view.artists[0].locations, vec!["london-uk"]);
    assert!(view.artists[1].locations.is_empty());
    assert!(view.artists[2].locations.is_empty());
    assert!(view.artists.iter().all(|a| a.relations.is_empty()));
}

#[test]
fn test_merge_first_duplicate_id_wins() {
    let artists = vec![artist(1, "Queen", &[], "Queen", 1970)];
    let locations = Locations {
        index: vec![location(1, &["london-uk"]), location(1, &["tokyo-japan"])],
    };

    let view = merge(&artists, &locations, &Relations::default());

    assert_eq!(view.artists[0].locations, vec!["london-uk"]);
}

#[test]
fn test_merge_stats_reports_mismatch() {
    let mut raw = sample_raw();
    raw.artists.push(artist(3, "Nirvana", &["Kurt Cobain"], "Bleach", 1987));

    let stats = merge_stats(&raw);

    assert!(!stats.is_consistent());
    assert_eq!(stats.artists, 3);
    assert_eq!(stats.relations, 2);
    assert_eq!(stats.locations, 2);
    assert_eq!(stats.missing_relations, vec![3]);
    assert_eq!(stats.missing_locations, vec![3]);

    assert!(merge_stats(&sample_raw()).is_consistent());
}

#[test]
fn test_merge_empty_input() {
    let view = merge_raw(&RawCollections::default());

    assert!(view.artists.is_empty());
    assert!(view.search.locations.is_empty());
    assert!(view.search.names.is_empty());
}

#[test]
fn test_unique_locations_first_seen_order() {
    let view = merge_raw(&sample_raw());

    assert_eq!(view.search.locations, vec!["london-uk", "paris-france"]);
}

#[test]
fn test_unique_locations_dedup_is_case_sensitive() {
    let artists = vec![
        Artist {
            locations: vec!["london".into(), "paris".into()],
            ..Artist::default()
        },
        Artist {
            locations: vec!["paris".into(), "London".into()],
            ..Artist::default()
        },
    ];

    let index = build_search_index(&artists);

    assert_eq!(index.locations, vec!["london", "paris", "London"]);
}

#[test]
fn test_search_index_lists() {
    let artists: Vec<Artist> = vec![
        artist(1, "Queen", &["Freddie Mercury", "Brian May"], "Queen", 1970).into(),
        artist(2, "Queen", &["Adam Lambert"], "The Cosmos Rocks", 2004).into(),
        artist(3, "Bee Gees", &["Barry Gibb"], "The Bee Gees Sing", 1970).into(),
    ];

    let index = build_search_index(&artists);

    // names and albums keep duplicates, years do not
    assert_eq!(index.names, vec!["Queen", "Queen", "Bee Gees"]);
    assert_eq!(index.creation_dates, vec![1970, 2004]);
    assert_eq!(
        index.first_albums,
        vec!["Queen", "The Cosmos Rocks", "The Bee Gees Sing"]
    );
    assert_eq!(
        index.members,
        vec!["Freddie Mercury", "Brian May", "Adam Lambert", "Barry Gibb"]
    );
}
