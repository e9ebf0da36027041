use std::sync::Arc;

use axum::{Json, extract::State};
use routeops_optimizer::{
    dispatch::pipeline::dispatch,
    json::types::{JsonSolveRequest, JsonSolveResponse},
};

use crate::{error::ApiError, state::AppState};

pub async fn solve_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonSolveRequest>,
) -> Result<Json<JsonSolveResponse>, ApiError> {
    let response = dispatch(
        &request,
        &state.matrix_client,
        &state.geometry_client,
        &state.dispatch_params,
    )
    .await?;

    Ok(Json(response))
}
