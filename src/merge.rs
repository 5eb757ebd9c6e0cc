//! Joins the three raw collections into the denormalized [`MergedView`].
//!
//! The upstream serves artists, relations and locations from independent
//! endpoints. Entries are matched on their `id` field; list position is not
//! trusted since nothing guarantees the three collections stay in lockstep.
//! An artist with no matching relation or location entry is kept, just
//! without that enrichment.

use std::collections::{HashMap, HashSet};

use crate::types::{
    Artist, ArtistRecord, DatesLocations, Locations, MergedView, RawCollections, Relations,
    SearchIndex,
};

/// Lengths and join misses of one merge, for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub artists: usize,
    pub relations: usize,
    pub locations: usize,
    pub missing_relations: Vec<u32>,
    pub missing_locations: Vec<u32>,
}

impl MergeStats {
    pub fn is_consistent(&self) -> bool {
        self.missing_relations.is_empty()
            && self.missing_locations.is_empty()
            && self.artists == self.relations
            && self.artists == self.locations
    }
}

/// Enriches every artist with its locations and relations and derives the
/// search index.
///
/// # Arguments
///
/// * `artists` - Artist records as decoded from upstream or a snapshot
/// * `locations` - Location entries, joined on `id`
/// * `relations` - Relation entries, joined on `id`
///
/// # Returns
///
/// The merged view. Artists keep their input order. When an id appears more
/// than once in `locations` or `relations` the first entry is used.
pub fn merge(artists: &[ArtistRecord], locations: &Locations, relations: &Relations) -> MergedView {
    let mut locations_by_id: HashMap<u32, &Vec<String>> = HashMap::new();
    for entry in &locations.index {
        locations_by_id.entry(entry.id).or_insert(&entry.locations);
    }

    let mut relations_by_id: HashMap<u32, &DatesLocations> = HashMap::new();
    for entry in &relations.index {
        relations_by_id
            .entry(entry.id)
            .or_insert(&entry.dates_locations);
    }

    let artists: Vec<Artist> = artists
        .iter()
        .cloned()
        .map(|record| {
            let mut artist = Artist::from(record);
            if let Some(locations) = locations_by_id.get(&artist.id) {
                artist.locations = (*locations).clone();
            }
            if let Some(relations) = relations_by_id.get(&artist.id) {
                artist.relations = (*relations).clone();
            }
            artist
        })
        .collect();

    let search = build_search_index(&artists);
    MergedView { artists, search }
}

pub fn merge_raw(raw: &RawCollections) -> MergedView {
    merge(&raw.artists, &raw.locations, &raw.relations)
}

pub fn merge_stats(raw: &RawCollections) -> MergeStats {
    let relation_ids: HashSet<u32> = raw.relations.index.iter().map(|e| e.id).collect();
    let location_ids: HashSet<u32> = raw.locations.index.iter().map(|e| e.id).collect();

    MergeStats {
        artists: raw.artists.len(),
        relations: raw.relations.index.len(),
        locations: raw.locations.index.len(),
        missing_relations: raw
            .artists
            .iter()
            .map(|a| a.id)
            .filter(|id| !relation_ids.contains(id))
            .collect(),
        missing_locations: raw
            .artists
            .iter()
            .map(|a| a.id)
            .filter(|id| !location_ids.contains(id))
            .collect(),
    }
}

pub fn build_search_index(artists: &[Artist]) -> SearchIndex {
    SearchIndex {
        locations: unique_locations(artists),
        names: artists.iter().map(|a| a.name.clone()).collect(),
        creation_dates: unique_creation_dates(artists),
        first_albums: artists.iter().map(|a| a.first_album.clone()).collect(),
        members: artists
            .iter()
            .flat_map(|a| a.members.iter().cloned())
            .collect(),
    }
}

fn unique_locations(artists: &[Artist]) -> Vec<String> {
    let mut seen = HashSet::new();
    artists
        .iter()
        .flat_map(|a| a.locations.iter())
        .filter(|location| seen.insert(*location))
        .cloned()
        .collect()
}

fn unique_creation_dates(artists: &[Artist]) -> Vec<i32> {
    let mut seen = HashSet::new();
    artists
        .iter()
        .map(|a| a.creation_date)
        .filter(|date| seen.insert(*date))
        .collect()
}
