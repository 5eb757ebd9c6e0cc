//! # Scheduler Module
//!
//! The two background loops that keep the cache current and the on-disk
//! snapshot useful:
//!
//! - [`Refresher`] - every refresh interval, fetches all three upstream
//!   collections, merges them and swaps the result into the
//!   [`CacheStore`](crate::cache::CacheStore). A failed refresh keeps the
//!   previous catalog and is logged; it never stops the loop.
//! - [`Watchdog`] - every probe interval, checks connectivity through a
//!   [`ConnectivityProbe`]. While offline it snapshots the cached collections
//!   to disk, at most once per collection per outage, and on shutdown it
//!   writes one final snapshot unconditionally.
//!
//! The loops share nothing but the cache and the snapshot store. Both stop
//! within one tick when their [`CancellationToken`](tokio_util::sync::CancellationToken)
//! is cancelled.

mod refresh;
mod watchdog;

pub use refresh::Refresher;
pub use watchdog::{ConnectivityProbe, SaveFlag, Watchdog, WatchdogState};
