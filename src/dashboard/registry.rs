//! Dashboard registry
//!
//! Holds every dashboard the server exposes, in registration order, and
//! validates input updates against each dashboard's binding before the
//! handler runs.

use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::binding::{Binding, Dashboard, Output};
use super::error::{DashboardError, DashboardResult};
use super::input::InputValues;

/// Summary of a registered dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub id: String,
    pub title: String,
    pub binding: Binding,
}

/// Registered dashboards keyed by id
#[derive(Default, Clone)]
pub struct DashboardRegistry {
    dashboards: IndexMap<String, Arc<dyn Dashboard>>,
}

impl DashboardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dashboard; ids must be unique
    pub fn register(&mut self, dashboard: Arc<dyn Dashboard>) -> DashboardResult<()> {
        let id = dashboard.id().to_string();
        if self.dashboards.contains_key(&id) {
            return Err(DashboardError::DuplicateDashboard(id));
        }
        self.dashboards.insert(id, dashboard);
        Ok(())
    }

    /// Get a dashboard by id
    pub fn get(&self, id: &str) -> DashboardResult<&Arc<dyn Dashboard>> {
        self.dashboards
            .get(id)
            .ok_or_else(|| DashboardError::UnknownDashboard(id.to_string()))
    }

    pub fn ids(&self) -> Vec<&str> {
        self.dashboards.keys().map(|k| k.as_str()).collect()
    }

    pub fn list(&self) -> Vec<DashboardSummary> {
        self.dashboards
            .values()
            .map(|d| DashboardSummary {
                id: d.id().to_string(),
                title: d.title().to_string(),
                binding: d.binding(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.dashboards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dashboards.is_empty()
    }

    /// Layer `changes` over `current`, rejecting ids the handler is not
    /// bound to. `current` is left untouched on error.
    pub fn merge_inputs(
        &self,
        id: &str,
        current: &InputValues,
        changes: &InputValues,
    ) -> DashboardResult<InputValues> {
        let binding = self.get(id)?.binding();
        if let Some(unknown) = changes.keys().find(|k| !binding.has_input(k)) {
            return Err(DashboardError::UnknownInput {
                dashboard: id.to_string(),
                input: unknown.clone(),
            });
        }

        let mut merged = current.clone();
        for (key, value) in changes {
            merged.insert(key.clone(), value.clone());
        }
        Ok(merged)
    }

    /// Recompute all outputs from a full set of input values
    pub fn recompute(&self, id: &str, values: &InputValues) -> DashboardResult<Vec<Output>> {
        let dashboard = self.get(id)?;
        let start = Instant::now();
        let outputs = dashboard.recompute(values)?;
        debug!(
            dashboard = id,
            outputs = outputs.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Recomputed dashboard"
        );
        Ok(outputs)
    }

    /// Stateless update: apply `changes` over the defaults and recompute
    pub fn update(&self, id: &str, changes: &InputValues) -> DashboardResult<Vec<Output>> {
        let defaults = self.get(id)?.defaults();
        let values = self.merge_inputs(id, &defaults, changes)?;
        self.recompute(id, &values)
    }
}

impl std::fmt::Debug for DashboardRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardRegistry")
            .field("dashboards", &self.ids())
            .finish()
    }
}
