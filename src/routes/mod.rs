pub mod autofill;
pub mod bids;
pub mod dossiers;
pub mod estimates;
pub mod health;
mod upload;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Form normalization
        .route("/autofill", post(autofill::autofill))
        // Documents
        .route("/bids/pdf", post(bids::generate_bid_pdf))
        .route("/dossiers/pdf", post(dossiers::generate_dossier_pdf))
        // Estimator sessions
        .route("/estimates", post(estimates::create_estimate))
        .route(
            "/estimates/:id",
            get(estimates::get_estimate).delete(estimates::end_estimate),
        )
        .route(
            "/estimates/:id/items",
            post(estimates::add_item).delete(estimates::remove_all_items),
        )
        .route(
            "/estimates/:id/items/:index",
            put(estimates::update_item).delete(estimates::remove_item),
        )
        .route("/estimates/:id/csv", get(estimates::export_estimate_csv))
}
