use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{cache::CacheStore, snapshot::SnapshotStore, types::Collection};

/// Tells the watchdog whether the outside world is reachable.
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> impl Future<Output = bool> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveFlag {
    #[default]
    NotSaved,
    Saved,
}

/// Per-outage bookkeeping of the watchdog.
///
/// Each collection moves `NotSaved -> Saved` once it has been written during
/// the current outage and back to `NotSaved` when connectivity returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogState {
    artists: SaveFlag,
    relations: SaveFlag,
    locations: SaveFlag,
    offline_cycles: u64,
    snapshot_every: u64,
}

impl WatchdogState {
    pub fn new(snapshot_every: u64) -> Self {
        Self {
            artists: SaveFlag::NotSaved,
            relations: SaveFlag::NotSaved,
            locations: SaveFlag::NotSaved,
            offline_cycles: 0,
            snapshot_every: snapshot_every.max(1),
        }
    }

    pub fn flag(&self, collection: Collection) -> SaveFlag {
        match collection {
            Collection::Artists => self.artists,
            Collection::Relations => self.relations,
            Collection::Locations => self.locations,
        }
    }

    pub fn mark_saved(&mut self, collection: Collection) {
        *self.flag_mut(collection) = SaveFlag::Saved;
    }

    pub fn offline_cycles(&self) -> u64 {
        self.offline_cycles
    }

    pub fn is_offline(&self) -> bool {
        self.offline_cycles > 0
    }

    /// Records one probe result and returns the collections due for saving.
    ///
    /// Offline cycles 0, N, 2N, ... of an outage are save triggers, where N
    /// is `snapshot_every`; on a trigger every collection not yet saved in
    /// this outage is due. Coming back online clears the flags and the
    /// counter.
    pub fn observe(&mut self, online: bool) -> Vec<Collection> {
        if online {
            self.artists = SaveFlag::NotSaved;
            self.relations = SaveFlag::NotSaved;
            self.locations = SaveFlag::NotSaved;
            self.offline_cycles = 0;
            return Vec::new();
        }

        let trigger = self.offline_cycles % self.snapshot_every == 0;
        self.offline_cycles += 1;
        if !trigger {
            return Vec::new();
        }

        Collection::ALL
            .into_iter()
            .filter(|c| self.flag(*c) == SaveFlag::NotSaved)
            .collect()
    }

    fn flag_mut(&mut self, collection: Collection) -> &mut SaveFlag {
        match collection {
            Collection::Artists => &mut self.artists,
            Collection::Relations => &mut self.relations,
            Collection::Locations => &mut self.locations,
        }
    }
}

pub struct Watchdog<P> {
    probe: P,
    store: SnapshotStore,
    cache: Arc<CacheStore>,
    state: WatchdogState,
}

impl<P: ConnectivityProbe> Watchdog<P> {
    pub fn new(
        probe: P,
        store: SnapshotStore,
        cache: Arc<CacheStore>,
        snapshot_every: u64,
    ) -> Self {
        Self {
            probe,
            store,
            cache,
            state: WatchdogState::new(snapshot_every),
        }
    }

    pub fn state(&self) -> &WatchdogState {
        &self.state
    }

    /// Probes once and snapshots whatever the state machine says is due.
    ///
    /// # Returns
    ///
    /// The collections written during this cycle. A collection whose save
    /// failed stays `NotSaved` and is retried on the next trigger.
    pub async fn cycle(&mut self) -> Vec<Collection> {
        let was_offline = self.state.is_offline();
        let online = self.probe.is_online().await;

        if online && was_offline {
            info!("connectivity restored");
        } else if !online && !was_offline {
            warn!("connectivity lost");
        }

        let due = self.state.observe(online);
        if due.is_empty() {
            return Vec::new();
        }

        let catalog = self.cache.read();
        if catalog.is_empty() {
            debug!("nothing cached yet, skipping offline snapshot");
            return Vec::new();
        }

        let mut saved = Vec::with_capacity(due.len());
        for collection in due {
            match self.store.save_collection(collection, &catalog.raw).await {
                Ok(()) => {
                    self.state.mark_saved(collection);
                    info!(collection = %collection, "offline snapshot written");
                    saved.push(collection);
                }
                Err(e) => warn!(collection = %collection, error = %e, "offline snapshot failed"),
            }
        }
        saved
    }

    /// Writes every collection regardless of the flags.
    pub async fn flush(&self) {
        let catalog = self.cache.read();
        if catalog.is_empty() {
            info!("nothing cached, final snapshot skipped");
            return;
        }

        let report = self.store.save_all(&catalog.raw).await;
        if report.is_complete() {
            info!(dir = %self.store.dir().display(), "final snapshot written");
        } else {
            warn!(
                saved = report.saved.len(),
                failed = report.failed.len(),
                "final snapshot incomplete"
            );
        }
    }

    /// Probes every `every` until `cancel` fires, then flushes.
    pub async fn run(mut self, every: Duration, cancel: CancellationToken) {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = self.cycle() => {}
            }
        }

        self.flush().await;
        debug!("watchdog stopped");
    }
}
