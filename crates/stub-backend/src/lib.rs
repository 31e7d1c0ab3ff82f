//! In-process rendition of the business services under verification.
//!
//! Serves the consumer, accounting, restaurant and order HTTP surface with
//! simulated eventual consistency: every mutation is acknowledged
//! synchronously, but its effect only becomes observable after a
//! configurable propagation delay. Failure injection hooks let tests force
//! action failures and rejected orders.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;

pub use state::StubState;

/// Creates the stub application router with all business routes.
pub fn create_app(state: StubState) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/consumers", post(routes::consumers::create))
        .route("/accounts/{consumer_id}", get(routes::accounts::get))
        .route("/restaurants", post(routes::restaurants::create))
        .route("/restaurants/{id}", get(routes::restaurants::get))
        .route("/orders", post(routes::orders::create))
        .route("/orders/{id}", get(routes::orders::get))
        .route("/orders/{id}/revise", post(routes::orders::revise))
        .route("/orders/{id}/cancel", post(routes::orders::cancel))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Creates the stub application router with a `/metrics` endpoint attached.
pub fn create_app_with_metrics(state: StubState, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    create_app(state).merge(metrics_router)
}
