//! Request and response models.
//!
//! Every model derives serde traits; request models also implement
//! [`Validate`](crate::http::validation::Validate) so the extractors in
//! [`crate::http::extract`] can enforce field constraints.

pub mod item;
pub mod query;
pub mod stock;
pub mod user;

pub use item::{Item, ListParams};
pub use query::{CommonQueryParams, FilterQuery, OrderBy};
pub use stock::{Stock, StockPrices};
pub use user::{EmailBody, User, UserDetails, UserIn, UserTypeQuery};
