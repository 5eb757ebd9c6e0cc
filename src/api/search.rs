use std::{collections::HashMap, sync::Arc};

use axum::{Extension, Json, extract::Query};
use tracing::debug;

use crate::{cache::CacheStore, query, types::Artist};

use super::ApiError;

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    Extension(cache): Extension<Arc<CacheStore>>,
) -> Result<Json<Vec<Artist>>, ApiError> {
    let q = params.get("query").map(String::as_str).unwrap_or_default();

    let catalog = cache.read();
    match query::search(&catalog.view, q) {
        Ok(found) => Ok(Json(found)),
        Err(e) => {
            debug!(error = %e, "search without results");
            Err(ApiError::NotFound(e.to_string()))
        }
    }
}
