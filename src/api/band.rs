use std::{collections::HashMap, sync::Arc};

use axum::{Extension, Json, extract::Query};

use crate::{cache::CacheStore, query, types::Artist};

use super::ApiError;

pub async fn band(
    Query(params): Query<HashMap<String, String>>,
    Extension(cache): Extension<Arc<CacheStore>>,
) -> Result<Json<Artist>, ApiError> {
    let Some(raw_id) = params.get("id") else {
        return Err(ApiError::BadRequest("missing id parameter".to_string()));
    };
    let id: u32 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid id {:?}", raw_id)))?;

    let catalog = cache.read();
    query::get_by_id(&catalog.view, id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("artist {}", id)))
}
