//! HTTP routes for the USSD endpoint.

use axum::{routing::post, Router};

use super::handlers::{answer_callback, UssdAppState};

/// Creates the USSD router.
pub fn ussd_routes(state: UssdAppState) -> Router {
    Router::new()
        .route("/ussd", post(answer_callback))
        .with_state(state)
}
