#![allow(dead_code)]

use std::{collections::BTreeMap, net::SocketAddr};

use axum::Router;
use groupie_tracker::types::{
    ArtistRecord, Catalog, CatalogOrigin, LocationEntry, Locations, RawCollections, RelationEntry,
    Relations,
};
use tokio::net::TcpListener;

pub fn artist(id: u32, name: &str, members: &[&str], first_album: &str, year: i32) -> ArtistRecord {
    ArtistRecord {
        id,
        image: format!("https://example.test/images/{}.jpeg", id),
        name: name.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        creation_date: year,
        first_album: first_album.to_string(),
        concert_dates: format!("https://example.test/api/dates/{}", id),
    }
}

pub fn location(id: u32, places: &[&str]) -> LocationEntry {
    LocationEntry {
        id,
        locations: places.iter().map(|p| p.to_string()).collect(),
        dates: format!("https://example.test/api/dates/{}", id),
    }
}

pub fn relation(id: u32, key: &str, values: &[&str]) -> RelationEntry {
    let mut dates_locations = BTreeMap::new();
    dates_locations.insert(
        key.to_string(),
        values.iter().map(|v| v.to_string()).collect(),
    );
    RelationEntry {
        id,
        dates_locations,
    }
}

/// Two bands with overlapping tour locations.
pub fn sample_raw() -> RawCollections {
    RawCollections {
        artists: vec![
            artist(1, "Queen", &["Freddie Mercury", "Brian May"], "14-12-1973", 1970),
            artist(2, "Pink Floyd", &["Roger Waters", "David Gilmour"], "05-08-1967", 1965),
        ],
        relations: Relations {
            index: vec![
                relation(1, "london-uk", &["01-01-1975"]),
                relation(2, "paris-france", &["02-02-1977"]),
            ],
        },
        locations: Locations {
            index: vec![
                location(1, &["london-uk", "paris-france"]),
                location(2, &["paris-france"]),
            ],
        },
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog::build(sample_raw(), CatalogOrigin::Upstream)
}

/// Serves `router` on an ephemeral local port.
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
