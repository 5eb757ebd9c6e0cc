use std::{sync::Arc, time::Duration};

use reqwest::Client;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    cache::CacheStore,
    merge,
    types::{Catalog, CatalogOrigin},
    upstream::{self, Endpoints, FetchError},
};

pub struct Refresher {
    client: Client,
    endpoints: Endpoints,
    cache: Arc<CacheStore>,
}

impl Refresher {
    pub fn new(client: Client, endpoints: Endpoints, cache: Arc<CacheStore>) -> Self {
        Self {
            client,
            endpoints,
            cache,
        }
    }

    /// Runs one full refresh cycle.
    ///
    /// Fetches the three collections, merges them outside the cache lock and
    /// replaces the cached catalog. On any fetch failure the cache is left
    /// untouched.
    ///
    /// # Returns
    ///
    /// The number of artists in the new catalog.
    pub async fn refresh_once(&self) -> Result<usize, FetchError> {
        let raw = upstream::fetch_all(&self.client, &self.endpoints).await?;

        let stats = merge::merge_stats(&raw);
        if !stats.is_consistent() {
            warn!(
                artists = stats.artists,
                relations = stats.relations,
                locations = stats.locations,
                missing_relations = ?stats.missing_relations,
                missing_locations = ?stats.missing_locations,
                "upstream collections disagree, unmatched artists keep no enrichment"
            );
        }

        let catalog = Catalog::build(raw, CatalogOrigin::Upstream);
        let count = catalog.artist_count();
        self.cache.replace(catalog);
        Ok(count)
    }

    /// Refreshes immediately and then once per `every` until `cancel` fires.
    pub async fn run(self, every: Duration, cancel: CancellationToken) {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                result = self.refresh_once() => match result {
                    Ok(artists) => info!(artists, "cache refreshed"),
                    Err(e) => warn!(
                        collection = %e.collection(),
                        error = %e,
                        "refresh failed, keeping cached catalog"
                    ),
                },
            }
        }

        debug!("refresh loop stopped");
    }
}
