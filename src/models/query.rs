//! Query parameter models.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::http::extract::FromQueryPairs;
use crate::http::validation::{FieldError, Validate, Violations};

/// Reusable `q` / `skip` / `limit` bundle shared by several endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonQueryParams {
    pub q: Option<String>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_common_limit")]
    pub limit: i64,
}

fn default_common_limit() -> i64 {
    100
}

impl CommonQueryParams {
    pub fn new(q: Option<String>, skip: i64, limit: i64) -> Self {
        Self { q, skip, limit }
    }
}

impl Default for CommonQueryParams {
    fn default() -> Self {
        Self::new(None, 0, default_common_limit())
    }
}

impl Validate for CommonQueryParams {}

/// Sort key accepted by `GET /products`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderBy {
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl OrderBy {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(OrderBy::CreatedAt),
            "updated_at" => Some(OrderBy::UpdatedAt),
            _ => None,
        }
    }
}

pub const FILTER_LIMIT_MAX: i64 = 1000;

/// Product filter. Unknown query keys fail the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterQuery {
    pub limit: i64,
    pub offset: i64,
    pub order_by: OrderBy,
    pub tags: BTreeSet<String>,
}

impl Default for FilterQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
            order_by: OrderBy::default(),
            tags: BTreeSet::new(),
        }
    }
}

impl FromQueryPairs for FilterQuery {
    fn from_query_pairs(pairs: Vec<(String, String)>) -> Result<Self, Vec<FieldError>> {
        let mut filter = FilterQuery::default();
        let mut violations = Violations::new();

        for (key, value) in pairs {
            match key.as_str() {
                "limit" => match value.parse() {
                    Ok(limit) => filter.limit = limit,
                    Err(_) => violations.push(FieldError::int_parsing("limit")),
                },
                "offset" => match value.parse() {
                    Ok(offset) => filter.offset = offset,
                    Err(_) => violations.push(FieldError::int_parsing("offset")),
                },
                "order_by" => match OrderBy::parse(&value) {
                    Some(order_by) => filter.order_by = order_by,
                    None => violations.push(FieldError::new(
                        ["query", "order_by"],
                        "Input should be 'created_at' or 'updated_at'",
                        "literal_error",
                    )),
                },
                "tags" => {
                    filter.tags.insert(value);
                }
                other => violations.push(FieldError::extra_forbidden(other)),
            }
        }

        violations.into_result().map(|()| filter)
    }
}

impl Validate for FilterQuery {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut violations = Violations::new();
        violations.check(self.limit > 0, || {
            FieldError::new(["query", "limit"], "Input should be greater than 0", "greater_than")
        });
        violations.check(self.limit <= FILTER_LIMIT_MAX, || {
            FieldError::new(
                ["query", "limit"],
                format!("Input should be less than or equal to {FILTER_LIMIT_MAX}"),
                "less_than_equal",
            )
        });
        violations.check(self.offset >= 0, || {
            FieldError::new(
                ["query", "offset"],
                "Input should be greater than or equal to 0",
                "greater_than_equal",
            )
        });
        violations.into_result()
    }
}
