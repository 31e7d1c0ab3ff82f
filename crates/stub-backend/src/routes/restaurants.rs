//! Restaurant service endpoints.

use axum::Json;
use axum::extract::{Path, State};
use common::{CreateRestaurantRequest, CreateRestaurantResponse, EntityRef};
use serde_json::{Value, json};

use crate::error::StubError;
use crate::state::StubState;

/// POST /restaurants — registers a restaurant with its menu and returns
/// its id.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<StubState>,
    Json(req): Json<CreateRestaurantRequest>,
) -> Json<CreateRestaurantResponse> {
    let id = state.create_restaurant(req.name, req.menu);
    Json(CreateRestaurantResponse {
        id: EntityRef::Int(id),
    })
}

/// GET /restaurants/{id} — answers 200 once the restaurant has propagated,
/// 404 before that.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StubError> {
    match state.get_restaurant(&id) {
        Some((name, menu)) => Ok(Json(json!({
            "id": id,
            "name": name,
            "menu": menu,
        }))),
        None => Err(StubError::NotFound(format!("restaurant {id} not found"))),
    }
}
