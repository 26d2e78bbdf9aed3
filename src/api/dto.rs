//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::dashboard::{Binding, Component, DashboardSummary, InputValues, Output};
use crate::table::TableInfo;

// ============================================
// DASHBOARD DTOs
// ============================================

/// Dashboard list response
#[derive(Debug, Serialize)]
pub struct DashboardListResponse {
    pub dashboards: Vec<DashboardSummary>,
    pub total: usize,
}

/// Full description of one dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub id: String,
    pub title: String,
    pub layout: Component,
    pub binding: Binding,
    /// Initial input values
    pub defaults: InputValues,
}

/// Input update request; missing inputs keep their defaults
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub inputs: InputValues,
}

/// Recomputed outputs
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub dashboard: String,
    pub outputs: Vec<Output>,
}

// ============================================
// DATASET DTOs
// ============================================

/// Loaded dataset summaries
#[derive(Debug, Serialize)]
pub struct DatasetListResponse {
    pub datasets: Vec<TableInfo>,
    pub total: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, unhealthy
    pub status: String,
    /// Number of registered dashboards
    pub dashboards: usize,
    /// Number of loaded datasets
    pub datasets: usize,
    /// Open WebSocket connections
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
