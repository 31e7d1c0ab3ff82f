//! Consumer service endpoints.

use axum::Json;
use axum::extract::State;
use common::{CreateConsumerRequest, CreateConsumerResponse, EntityRef};

use crate::state::StubState;

/// POST /consumers — registers a consumer and returns its id. The account
/// record becomes visible to the accounting service only after the
/// propagation delay.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<StubState>,
    Json(req): Json<CreateConsumerRequest>,
) -> Json<CreateConsumerResponse> {
    let id = state.create_consumer(req.name);
    Json(CreateConsumerResponse {
        consumer_id: EntityRef::Int(id),
    })
}
