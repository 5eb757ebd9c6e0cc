use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::types::{ArtistRecord, Collection, Locations, RawCollections, Relations};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {collection}: {source}")]
    Network {
        collection: Collection,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {collection}: {source}")]
    Decode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn collection(&self) -> Collection {
        match self {
            FetchError::Network { collection, .. } | FetchError::Decode { collection, .. } => {
                *collection
            }
        }
    }
}

/// URLs of the three upstream collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub artists: String,
    pub relations: String,
    pub locations: String,
}

/// Builds the HTTP client used for every upstream fetch.
///
/// # Arguments
///
/// * `timeout` - Upper bound for a whole request, connect to last body byte
///
/// # Returns
///
/// Returns the configured client or the builder error from reqwest.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    collection: Collection,
) -> Result<T, FetchError> {
    let network = |source| FetchError::Network { collection, source };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(network)?
        .error_for_status()
        .map_err(network)?;
    let body = response.bytes().await.map_err(network)?;

    debug!(collection = %collection, bytes = body.len(), "upstream response received");
    serde_json::from_slice(&body).map_err(|source| FetchError::Decode { collection, source })
}

pub async fn fetch_artists(client: &Client, url: &str) -> Result<Vec<ArtistRecord>, FetchError> {
    get_json(client, url, Collection::Artists).await
}

pub async fn fetch_relations(client: &Client, url: &str) -> Result<Relations, FetchError> {
    get_json(client, url, Collection::Relations).await
}

pub async fn fetch_locations(client: &Client, url: &str) -> Result<Locations, FetchError> {
    get_json(client, url, Collection::Locations).await
}

/// Fetches all three collections concurrently.
///
/// The first failure wins and the other requests are dropped; a partial
/// result is never returned.
pub async fn fetch_all(
    client: &Client,
    endpoints: &Endpoints,
) -> Result<RawCollections, FetchError> {
    let (artists, relations, locations) = tokio::try_join!(
        fetch_artists(client, &endpoints.artists),
        fetch_relations(client, &endpoints.relations),
        fetch_locations(client, &endpoints.locations),
    )?;

    Ok(RawCollections {
        artists,
        relations,
        locations,
    })
}
