//! Fixed-value endpoints and stock quotes.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::server::AppState;
use crate::models::{Stock, StockPrices};

pub const PRICE_GRID: [[u32; 6]; 6] = [[1, 2, 3, 4, 5, 6]; 6];

pub async fn read_root() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}

/// The fixed set of ages; each value appears once.
pub async fn read_ages() -> Json<Value> {
    Json(json!([3.123, 23.45, 232.53, 23]))
}

pub async fn read_prices() -> Json<[[u32; 6]; 6]> {
    Json(PRICE_GRID)
}

/// Bound once per [`Stock`] variant, so unknown names never reach it.
pub async fn stock_prices(stock: Stock) -> Json<StockPrices> {
    Json(StockPrices::random(stock, &mut rand::thread_rng()))
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub title: String,
    pub version: String,
    pub items: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        title: state.config.app.title.clone(),
        version: state.config.app.version.clone(),
        items: state.store.len(),
    })
}
