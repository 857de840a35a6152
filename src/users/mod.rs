//! User endpoints, mounted as a separate router.

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;
use self::handlers::*;

pub fn setup_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/profile", get(profile))
        .route("/users/email", post(send_email))
        .route("/users/secret", get(tell_secret))
}
