//! # Upstream Module
//!
//! Read-only client for the remote artist API. The API exposes three
//! independent collections, each behind its own endpoint:
//!
//! - **artists** - a JSON array of artist records
//! - **relation** - `{ "index": [...] }` of concert dates mapped to locations
//! - **locations** - `{ "index": [...] }` of locations played per artist
//!
//! ## Behaviour
//!
//! Every fetch is a single GET with no retries. Transport errors and
//! non-success statuses surface as [`FetchError::Network`], bodies that do not
//! decode as [`FetchError::Decode`]. Timeouts come from the
//! [`reqwest::Client`] the caller builds (see [`build_client`]); retrying is
//! left to the refresh loop's polling interval.
//!
//! The [`probe`] submodule holds the HTTP connectivity probe used by the
//! watchdog to tell "network down" apart from "API down".
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = upstream::build_client(Duration::from_secs(30))?;
//! let raw = upstream::fetch_all(&client, &settings.endpoints).await?;
//! ```

mod fetch;
pub mod probe;

pub use fetch::{
    Endpoints, FetchError, build_client, fetch_all, fetch_artists, fetch_locations, fetch_relations,
};
pub use probe::HttpProbe;
