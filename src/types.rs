use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Map from concert date (or location, as the upstream names it) to the
/// places played on it.
pub type DatesLocations = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Artists,
    Relations,
    Locations,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Artists,
        Collection::Relations,
        Collection::Locations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Artists => "artists",
            Collection::Relations => "relations",
            Collection::Locations => "locations",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub id: u32,
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    pub creation_date: i32,
    pub first_album: String,
    #[serde(default)]
    pub concert_dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: u32,
    pub image: String,
    pub name: String,
    pub members: Vec<String>,
    pub creation_date: i32,
    pub first_album: String,
    pub concert_dates: String,
    pub locations: Vec<String>,
    pub relations: DatesLocations,
}

impl From<ArtistRecord> for Artist {
    fn from(record: ArtistRecord) -> Self {
        Self {
            id: record.id,
            image: record.image,
            name: record.name,
            members: record.members,
            creation_date: record.creation_date,
            first_album: record.first_album,
            concert_dates: record.concert_dates,
            locations: Vec::new(),
            relations: DatesLocations::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relations {
    pub index: Vec<RelationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEntry {
    pub id: u32,
    pub dates_locations: DatesLocations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locations {
    pub index: Vec<LocationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: u32,
    pub locations: Vec<String>,
    #[serde(default)]
    pub dates: String,
}

/// The three collections exactly as fetched from upstream or read back from
/// a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCollections {
    pub artists: Vec<ArtistRecord>,
    pub relations: Relations,
    pub locations: Locations,
}

impl RawCollections {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
            && self.relations.index.is_empty()
            && self.locations.index.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchIndex {
    pub locations: Vec<String>,
    pub names: Vec<String>,
    pub creation_dates: Vec<i32>,
    pub first_albums: Vec<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergedView {
    pub artists: Vec<Artist>,
    pub search: SearchIndex,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogOrigin {
    Upstream,
    Snapshot,
    #[default]
    Empty,
}

/// Everything the cache hands out to readers in one consistent piece.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub raw: RawCollections,
    pub view: MergedView,
    pub origin: CatalogOrigin,
    pub built_at: Option<DateTime<Utc>>,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub id: u32,
    pub name: String,
    pub members: String,
    pub created: i32,
    pub first_album: String,
}

impl From<&Artist> for ArtistTableRow {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            members: artist
                .members
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
            created: artist.creation_date,
            first_album: artist.first_album.clone(),
        }
    }
}
