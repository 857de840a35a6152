//! Parameter-binding demos: query models, headers and dependencies.

use axum::{http::HeaderMap, Json};
use serde_json::{json, Value};

use crate::dependencies::Depends;
use crate::http::extract::QueryModel;
use crate::models::{CommonQueryParams, FilterQuery};

/// Header read by `GET /pops/`.
pub const CUSTOM_NAME_HEADER: &str = "custom-name";

pub async fn read_products(QueryModel(filter): QueryModel<FilterQuery>) -> Json<FilterQuery> {
    Json(filter)
}

pub async fn read_custom_header(headers: HeaderMap) -> Json<Value> {
    let custom_name = headers
        .get(CUSTOM_NAME_HEADER)
        .and_then(|v| v.to_str().ok());
    Json(json!({ "strange_header": custom_name }))
}

pub async fn echo_depends(Depends(commons): Depends<CommonQueryParams>) -> Json<CommonQueryParams> {
    Json(commons)
}
