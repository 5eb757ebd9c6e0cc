//! # CLI Module
//!
//! Entry points behind the `groupie-tracker` subcommands:
//!
//! - [`serve`] - runs the caching HTTP service with its background refresh
//!   loop and connectivity watchdog
//! - [`refresh`] - fetches the upstream collections once and writes them to
//!   the snapshot directory
//! - [`search`] - searches the on-disk snapshot and prints a table
//!
//! Fatal problems are reported with the console `error!` macro, which exits
//! the process. Service events go through `tracing`.
//!
//! ## Usage Patterns
//!
//! ```bash
//! groupie-tracker refresh                 # seed the snapshot
//! groupie-tracker serve --addr 127.0.0.1:8080
//! groupie-tracker search "freddie"        # query the snapshot offline
//! ```

mod refresh;
mod search;
mod serve;

pub use refresh::refresh;
pub use search::search;
pub use serve::serve;
