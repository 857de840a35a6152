//! Item model.

use serde::{Deserialize, Serialize};

use crate::http::validation::Validate;

/// A to-do style item.
///
/// Identity is the item's position in the store; there is no id field on the
/// wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_done: bool,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            is_done: false,
        }
    }
}

impl Validate for Item {}

/// Query parameters for listing items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Falls back to `items.default_list_limit` from config.
    pub limit: Option<i64>,
}

impl Validate for ListParams {}
