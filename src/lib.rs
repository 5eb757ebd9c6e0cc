//! Groupie Tracker Library
//!
//! A caching read-only service over the groupie tracker API. Artist, relation
//! and location collections are fetched periodically, merged into one
//! denormalized view held in memory, snapshotted to disk for when the API or
//! the network is down, and served over HTTP.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for listing, detail, search and health
//! - `cache` - The shared, atomically replaced catalog
//! - `cli` - Entry points for the command-line subcommands
//! - `config` - Environment based settings
//! - `merge` - Joins the raw collections and derives the search index
//! - `query` - List, lookup and search over a merged view
//! - `scheduler` - Background refresh loop and connectivity watchdog
//! - `server` - Router assembly, graceful shutdown and signal handling
//! - `snapshot` - On-disk JSON snapshots of the raw collections
//! - `types` - Data structures shared by every module
//! - `upstream` - HTTP client for the remote API and the connectivity probe
//!
//! # Example
//!
//! ```
//! use groupie_tracker::{cli, config};
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = config::Settings::from_env().unwrap_or_default();
//!     cli::serve(settings).await;
//! }
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod merge;
pub mod query;
pub mod scheduler;
pub mod server;
pub mod snapshot;
pub mod types;
pub mod upstream;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loading snapshot from {}", dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Server started: http://{}", addr);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors of the CLI entry points; the process terminates with
/// exit code 1 right after printing.
///
/// # Example
///
/// ```
/// error!("Failed to bind {}. Err: {}", addr, e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No snapshot found, serving empty until the first refresh");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
