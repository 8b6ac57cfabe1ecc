//! The three read routes: versions, checkout, store inventory.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, header},
};
use serde::Deserialize;
use serde_json::Value;

use crate::AppState;
use crate::auth::credentials_from_header;
use crate::error::ApiErr;

#[derive(Debug, Deserialize)]
pub struct StoreQuery {
    store: Option<String>,
}

fn store_url(query: StoreQuery) -> Result<String, ApiErr> {
    query
        .store
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiErr::bad_request("missing 'store' query parameter"))
}

fn credentials(headers: &HeaderMap) -> Result<store_git::Credentials, ApiErr> {
    let header = headers
        .get(header::AUTHORIZATION)
        .map(|v| {
            v.to_str()
                .map_err(|_| ApiErr::bad_request("invalid Authorization header"))
        })
        .transpose()?;
    credentials_from_header(header)
}

/// GET /versions/{extension}?store=<url> — published versions, newest first.
pub async fn get_versions(
    State(state): State<AppState>,
    Path(extension): Path<String>,
    Query(query): Query<StoreQuery>,
) -> Result<Json<Vec<String>>, ApiErr> {
    let store = store_url(query)?;
    let versions =
        tokio::task::spawn_blocking(move || state.resolver.list_versions(&store, &extension))
            .await
            .map_err(|e| ApiErr::internal(format!("task failed: {e}")))??;
    Ok(Json(versions))
}

/// GET /checkout/{extension}/{version}?store=<url> — one version as a
/// metadata+code document.
pub async fn get_checkout(
    State(state): State<AppState>,
    Path((extension, version)): Path<(String, String)>,
    Query(query): Query<StoreQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiErr> {
    let store = store_url(query)?;
    let creds = credentials(&headers)?;
    let doc = tokio::task::spawn_blocking(move || {
        state.resolver.checkout(&store, &extension, &version, &creds)
    })
    .await
    .map_err(|e| ApiErr::internal(format!("task failed: {e}")))??;
    Ok(Json(doc))
}

/// GET /extensions?store=<url> — every extension's metadata document.
pub async fn get_store(
    State(state): State<AppState>,
    Query(query): Query<StoreQuery>,
    headers: HeaderMap,
) -> Result<Json<HashMap<String, Value>>, ApiErr> {
    let store = store_url(query)?;
    let creds = credentials(&headers)?;
    let inventory =
        tokio::task::spawn_blocking(move || state.resolver.list_store(&store, &creds))
            .await
            .map_err(|e| ApiErr::internal(format!("task failed: {e}")))??;
    Ok(Json(inventory))
}
