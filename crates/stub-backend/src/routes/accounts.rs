//! Accounting service endpoints.

use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::error::StubError;
use crate::state::StubState;

/// GET /accounts/{consumerId} — answers 200 once the account created for
/// the consumer has propagated, 404 before that.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<StubState>,
    Path(consumer_id): Path<String>,
) -> Result<Json<Value>, StubError> {
    if !state.account_exists(&consumer_id) {
        return Err(StubError::NotFound(format!(
            "no account for consumer {consumer_id}"
        )));
    }

    let name = state.consumer_name(&consumer_id);
    Ok(Json(json!({
        "consumerId": consumer_id,
        "name": name,
    })))
}
