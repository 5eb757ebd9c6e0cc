use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::cache::CacheStore;

pub async fn health(Extension(cache): Extension<Arc<CacheStore>>) -> Json<Value> {
    let catalog = cache.read();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "origin": catalog.origin,
        "artists": catalog.artist_count(),
        "built_at": catalog.built_at,
    }))
}
