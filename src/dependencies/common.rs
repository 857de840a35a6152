//! The shared `q` / `skip` / `limit` provider, in struct and function form.

use axum::{extract::Query, http::request::Parts};
use serde_json::{Map, Value};

use crate::dependencies::Dependency;
use crate::http::error::ApiError;
use crate::models::CommonQueryParams;

impl Dependency for CommonQueryParams {
    fn resolve(parts: &Parts) -> Result<Self, ApiError> {
        let Query(params) = Query::<CommonQueryParams>::try_from_uri(&parts.uri)?;
        Ok(params)
    }
}

/// Function-form provider: the same parameters as a plain JSON map.
pub fn common_parameters(parts: &Parts) -> Result<Map<String, Value>, ApiError> {
    let params = CommonQueryParams::resolve(parts)?;
    let mut map = Map::new();
    map.insert("q".into(), params.q.map(Value::String).unwrap_or(Value::Null));
    map.insert("skip".into(), params.skip.into());
    map.insert("limit".into(), params.limit.into());
    Ok(map)
}

/// Adapts [`common_parameters`] to the [`Dependency`] contract.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonParameters(pub Map<String, Value>);

impl Dependency for CommonParameters {
    fn resolve(parts: &Parts) -> Result<Self, ApiError> {
        common_parameters(parts).map(CommonParameters)
    }
}
