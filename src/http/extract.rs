//! Validating extractors.
//!
//! Thin wrappers around axum's `Json`, `Query` and `Path` that turn every
//! rejection into [`ApiError::Validation`] (422) and run [`Validate`] on the
//! decoded value.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::http::error::ApiError;
use crate::http::validation::{FieldError, Validate};

/// JSON body, decoded and validated.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string decoded through serde, then validated.
#[derive(Debug, Clone)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Typed path parameters.
#[derive(Debug, Clone)]
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Models built from raw `(key, value)` query pairs.
///
/// Used where serde's urlencoded support falls short: repeated keys that
/// collect into a set, and rejecting keys the model does not declare.
pub trait FromQueryPairs: Sized {
    fn from_query_pairs(pairs: Vec<(String, String)>) -> Result<Self, Vec<FieldError>>;
}

/// Query model decoded from raw pairs.
#[derive(Debug, Clone)]
pub struct QueryModel<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryModel<T>
where
    T: FromQueryPairs + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = query_pairs(parts);
        let value = T::from_query_pairs(pairs)?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Percent-decoded query pairs in request order.
pub fn query_pairs(parts: &Parts) -> Vec<(String, String)> {
    parts
        .uri
        .query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
