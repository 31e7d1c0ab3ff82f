//! Order service endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CreateOrderRequest, CreateOrderResponse, EntityRef, GetOrderResponse, ReviseOrderRequest};

use crate::error::StubError;
use crate::state::StubState;

/// POST /orders — creates an order priced from the restaurant menu. The
/// authorization outcome propagates asynchronously; a fresh order reads as
/// PENDING.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<StubState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<CreateOrderResponse>, StubError> {
    let id = state.create_order(&req.restaurant_id, req.line_items)?;
    Ok(Json(CreateOrderResponse {
        order_id: EntityRef::Int(id),
    }))
}

/// GET /orders/{id} — returns the currently observable state and total.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> Result<Json<GetOrderResponse>, StubError> {
    match state.get_order(&id) {
        Some((order_state, order_total)) => Ok(Json(GetOrderResponse {
            state: order_state,
            order_total,
        })),
        None => Err(StubError::NotFound(format!("order {id} not found"))),
    }
}

/// POST /orders/{id}/revise — acknowledges a revision synchronously; the
/// new total becomes observable after the propagation delay.
#[tracing::instrument(skip(state, req))]
pub async fn revise(
    State(state): State<StubState>,
    Path(id): Path<String>,
    Json(req): Json<ReviseOrderRequest>,
) -> Result<StatusCode, StubError> {
    state.revise_order(&id, &req.revised_line_item_quantities)?;
    Ok(StatusCode::OK)
}

/// POST /orders/{id}/cancel — acknowledges a cancellation synchronously;
/// the CANCELLED state becomes observable after the propagation delay.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StubError> {
    state.cancel_order(&id)?;
    Ok(StatusCode::OK)
}
