//! Dashboard Routes
//!
//! - GET /api/v1/dashboards - List dashboards
//! - GET /api/v1/dashboards/:id - Layout, binding and defaults
//! - POST /api/v1/dashboards/:id/update - Recompute outputs for new inputs

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{DashboardListResponse, DashboardResponse, UpdateRequest, UpdateResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/dashboards
pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> Json<DashboardListResponse> {
    let dashboards = state.registry.list();
    Json(DashboardListResponse {
        total: dashboards.len(),
        dashboards,
    })
}

/// GET /api/v1/dashboards/:id
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DashboardResponse>> {
    let dashboard = state.registry.get(&id)?;

    Ok(Json(DashboardResponse {
        id: dashboard.id().to_string(),
        title: dashboard.title().to_string(),
        layout: dashboard.layout(),
        binding: dashboard.binding(),
        defaults: dashboard.defaults(),
    }))
}

/// POST /api/v1/dashboards/:id/update
///
/// Stateless: the given inputs are layered over the dashboard defaults.
pub async fn update_dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    let outputs = state.registry.update(&id, &req.inputs)?;

    Ok(Json(UpdateResponse {
        dashboard: id,
        outputs,
    }))
}
