use std::sync::Arc;

use axum::{Extension, Json};

use crate::{cache::CacheStore, query, types::MergedView};

pub async fn home(Extension(cache): Extension<Arc<CacheStore>>) -> Json<MergedView> {
    let catalog = cache.read();
    Json(query::list_all(&catalog).clone())
}
