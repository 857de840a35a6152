//! Item CRUD handlers.
//!
//! Every handler holds a [`StoreSession`] for its whole run; the session is
//! closed when the handler returns, including on 404.

use axum::{extract::State, http::StatusCode, Json};

use crate::dependencies::{Scoped, StoreSession};
use crate::http::error::ApiError;
use crate::http::extract::{ValidJson, ValidPath, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Item, ListParams};

pub async fn create_item(
    session: Scoped<StoreSession>,
    ValidJson(item): ValidJson<Item>,
) -> Json<Item> {
    Json(session.create(item))
}

pub async fn list_items(
    State(state): State<AppState>,
    session: Scoped<StoreSession>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> Json<Vec<Item>> {
    let limit = params
        .limit
        .unwrap_or(state.config.items.default_list_limit);
    Json(session.list(limit))
}

pub async fn get_item(
    session: Scoped<StoreSession>,
    ValidPath(item_id): ValidPath<i64>,
) -> Result<Json<Item>, ApiError> {
    session
        .get(item_id)
        .map(Json)
        .ok_or_else(ApiError::item_not_found)
}

/// Answers 202 with the item as currently stored; the payload is validated
/// but not applied.
pub async fn update_item(
    session: Scoped<StoreSession>,
    ValidPath(item_id): ValidPath<i64>,
    ValidJson(item): ValidJson<Item>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    session
        .update(item_id, item)
        .map(|stored| (StatusCode::ACCEPTED, Json(stored)))
        .ok_or_else(ApiError::item_not_found)
}

/// The body must be a valid item; it is not compared with the stored one.
pub async fn delete_item(
    session: Scoped<StoreSession>,
    ValidPath(item_id): ValidPath<i64>,
    ValidJson(_item): ValidJson<Item>,
) -> Result<StatusCode, ApiError> {
    session
        .delete(item_id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(ApiError::item_not_found)
}
