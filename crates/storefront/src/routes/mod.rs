//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog grid (?tag= filter)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalog/grid           - Grid fragment (?tag= filter)
//!
//! # Quick order (session-backed sheet)
//! GET  /order/{id}             - Open the order sheet for a product
//! POST /order/update           - Apply fields, re-render with subtotal
//! POST /order/submit           - Apply fields, hand off to the order channel
//! POST /order/close            - Discard the sheet, redirect to /
//! ```

pub mod catalog;
pub mod order;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/grid", get(catalog::grid))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(order::show))
        .route("/update", post(order::update))
        .route("/submit", post(order::submit))
        .route("/close", post(order::close))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .nest("/catalog", catalog_routes())
        .nest("/order", order_routes())
}
