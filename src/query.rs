//! Read-side operations over a cached catalog: list everything, look one
//! artist up, and free-text search.

use thiserror::Error;

use crate::types::{Artist, Catalog, MergedView};

/// Labels the front end puts in front of search suggestions, e.g.
/// `"Member: Freddie Mercury"`. They are not part of the data.
const SUGGESTION_LABELS: [&str; 7] = [
    "Name: ",
    "Image: ",
    "Member: ",
    "Creation Date: ",
    "First Album: ",
    "Location: ",
    "Concert Date: ",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("empty search query")]
    EmptyQuery,

    #[error("no results for {0:?}")]
    NoMatch(String),
}

pub fn list_all(catalog: &Catalog) -> &MergedView {
    &catalog.view
}

pub fn get_by_id(view: &MergedView, id: u32) -> Option<&Artist> {
    view.artists.iter().find(|a| a.id == id)
}

/// Case-insensitive search across the merged artists.
///
/// A record matches directly when its name contains the query, one of its
/// members contains it, its first album equals it, or its creation year
/// contains it. Locations are only consulted when nothing matched directly.
///
/// # Arguments
///
/// * `view` - The merged view to search
/// * `query` - Raw user input, suggestion labels included
///
/// # Returns
///
/// Returns the matching artists in catalog order, [`SearchError::EmptyQuery`]
/// for a blank query or [`SearchError::NoMatch`] when nothing matched.
///
/// # Example
///
/// ```
/// let found = search(&catalog.view, "Member: freddie")?;
/// ```
pub fn search(view: &MergedView, query: &str) -> Result<Vec<Artist>, SearchError> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let direct: Vec<Artist> = view
        .artists
        .iter()
        .filter(|a| matches_directly(a, &needle))
        .cloned()
        .collect();
    if !direct.is_empty() {
        return Ok(direct);
    }

    let by_location: Vec<Artist> = view
        .artists
        .iter()
        .filter(|a| contains_any(&a.locations, &needle))
        .cloned()
        .collect();
    if !by_location.is_empty() {
        return Ok(by_location);
    }

    Err(SearchError::NoMatch(needle))
}

/// Strips suggestion labels and surrounding whitespace, then lowercases.
pub fn normalize_query(query: &str) -> String {
    let mut stripped = query.to_string();
    for label in SUGGESTION_LABELS {
        stripped = stripped.replace(label, "");
    }
    stripped.trim().to_lowercase()
}

fn matches_directly(artist: &Artist, needle: &str) -> bool {
    artist.name.to_lowercase().contains(needle)
        || contains_any(&artist.members, needle)
        || artist.first_album.to_lowercase() == needle
        || artist.creation_date.to_string().contains(needle)
}

fn contains_any(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v.to_lowercase().contains(needle))
}
