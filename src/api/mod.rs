//! # API Module
//!
//! HTTP endpoints of the groupie tracker. Every handler is read-only: it takes
//! one consistent catalog from the shared [`CacheStore`](crate::cache::CacheStore)
//! and answers from it, so requests never wait on the upstream API.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`, every artist plus the search suggestion index
//! - [`band`] - `GET /band?id=N`, a single artist with locations and relations
//! - [`search`] - `GET /search?query=q`, case-insensitive free-text search
//! - [`health`] - `GET /health`, version and catalog provenance
//!
//! ## Errors
//!
//! Failures are reported through [`ApiError`] as a JSON body carrying
//! `status_code` and `status_msg`. "Nothing found" is a 404 and is kept apart
//! from internal failures, which answer 500 with a generic message.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use groupie_tracker::api;
//!
//! let app = Router::new()
//!     .route("/", get(api::home))
//!     .route("/health", get(api::health))
//!     .layer(Extension(cache));
//! ```

mod band;
mod error;
mod health;
mod home;
mod search;

pub use band::band;
pub use error::{ApiError, ErrorBody, method_not_allowed, not_found};
pub use health::health;
pub use home::home;
pub use search::search;
