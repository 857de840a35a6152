//! Main route table.
//!
//! Static segments take priority over parameters, and stock routes are
//! registered once per [`Stock`] variant, so `/items/...` never collides with
//! `/{stock_name}/prices` and unknown stock names fall through to 404.

pub mod items;
pub mod params;
pub mod root;

use axum::{
    http::Uri,
    response::Redirect,
    routing::{any, get},
    Router,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Stock;

pub fn setup_api_router() -> Router<AppState> {
    let mut router = Router::new()
        .route("/", get(root::read_root))
        .route("/health", get(root::health))
        .route("/ages", get(root::read_ages))
        .route("/prices", get(root::read_prices))
        .route("/items", any(redirect_to_items))
        .route("/items/", get(items::list_items).post(items::create_item))
        .route(
            "/items/{item_id}",
            get(items::get_item)
                .patch(items::update_item)
                .delete(items::delete_item),
        )
        .route("/products", get(params::read_products))
        .route("/pops/", get(params::read_custom_header))
        .route("/echo_depends/", get(params::echo_depends));

    for stock in Stock::ALL {
        router = router.route(
            &format!("/{stock}/prices"),
            get(move || root::stock_prices(stock)),
        );
    }

    router
}

/// `/items` without the trailing slash: 307 to `/items/`, keeping the method,
/// body and query string.
pub async fn redirect_to_items(uri: Uri) -> Redirect {
    match uri.query() {
        Some(query) => Redirect::temporary(&format!("/items/?{query}")),
        None => Redirect::temporary("/items/"),
    }
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::route_not_found()
}
