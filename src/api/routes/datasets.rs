//! Dataset Routes
//!
//! - GET /api/v1/datasets - Summaries of the tables loaded at startup

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::DatasetListResponse;
use crate::api::state::AppState;

/// GET /api/v1/datasets
pub async fn list_datasets(State(state): State<Arc<AppState>>) -> Json<DatasetListResponse> {
    let datasets = state.datasets.as_ref().clone();
    Json(DatasetListResponse {
        total: datasets.len(),
        datasets,
    })
}
