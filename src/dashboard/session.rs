//! Per-client dashboard session
//!
//! A session remembers the current input values of every dashboard a
//! client has opened, so a single changed input can be layered over the
//! rest before recomputing.

use std::collections::HashMap;
use std::sync::Arc;

use super::binding::Output;
use super::error::{DashboardError, DashboardResult};
use super::input::InputValues;
use super::layout::Component;
use super::registry::DashboardRegistry;

/// Input state for the dashboards one client has open
#[derive(Debug)]
pub struct Session {
    registry: Arc<DashboardRegistry>,
    open: HashMap<String, InputValues>,
    sequence: u64,
}

impl Session {
    pub fn new(registry: Arc<DashboardRegistry>) -> Self {
        Self {
            registry,
            open: HashMap::new(),
            sequence: 0,
        }
    }

    /// Open (or reopen) a dashboard at its defaults.
    ///
    /// Returns the layout and the initial outputs.
    pub fn open(&mut self, id: &str) -> DashboardResult<(Component, Vec<Output>)> {
        let dashboard = self.registry.get(id)?;
        let values = dashboard.defaults();
        let outputs = self.registry.recompute(id, &values)?;
        let layout = dashboard.layout();
        self.open.insert(id.to_string(), values);
        Ok((layout, outputs))
    }

    /// Change one input and recompute every bound output
    pub fn set_input(
        &mut self,
        id: &str,
        input: &str,
        value: serde_json::Value,
    ) -> DashboardResult<Vec<Output>> {
        let current = self
            .open
            .get(id)
            .ok_or_else(|| DashboardError::NotOpen(id.to_string()))?;

        let mut change = InputValues::new();
        change.insert(input.to_string(), value);
        let values = self.registry.merge_inputs(id, current, &change)?;

        let outputs = self.registry.recompute(id, &values)?;
        self.open.insert(id.to_string(), values);
        Ok(outputs)
    }

    /// Forget a dashboard's input state
    pub fn close(&mut self, id: &str) -> DashboardResult<()> {
        self.open
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DashboardError::NotOpen(id.to_string()))
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains_key(id)
    }

    /// Current input values of an open dashboard
    pub fn values(&self, id: &str) -> Option<&InputValues> {
        self.open.get(id)
    }

    /// Next sequence number for an outputs message
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::registry::tests::echo_registry;
    use crate::dashboard::OutputValue;
    use serde_json::json;

    fn session() -> Session {
        Session::new(Arc::new(echo_registry()))
    }

    #[test]
    fn test_open_returns_layout_and_defaults() {
        let mut session = session();
        let (layout, outputs) = session.open("echo").unwrap();
        assert_eq!(layout.graph_ids(), vec!["out"]);
        assert_eq!(outputs.len(), 1);
        assert_eq!(session.values("echo").unwrap()["in"], json!("hello"));
    }

    #[test]
    fn test_set_input_requires_open() {
        let mut session = session();
        let err = session.set_input("echo", "in", json!("x")).unwrap_err();
        assert!(matches!(err, DashboardError::NotOpen(_)));
    }

    #[test]
    fn test_set_input_updates_state() {
        let mut session = session();
        session.open("echo").unwrap();
        let outputs = session.set_input("echo", "in", json!("clear")).unwrap();
        assert_eq!(outputs[0].value, OutputValue::Nothing);
        assert_eq!(session.values("echo").unwrap()["in"], json!("clear"));
    }

    #[test]
    fn test_rejected_input_leaves_state() {
        let mut session = session();
        session.open("echo").unwrap();
        assert!(session.set_input("echo", "bogus", json!(1)).is_err());
        assert_eq!(session.values("echo").unwrap().len(), 1);
    }

    #[test]
    fn test_close() {
        let mut session = session();
        session.open("echo").unwrap();
        session.close("echo").unwrap();
        assert!(!session.is_open("echo"));
        assert!(session.close("echo").is_err());
    }

    #[test]
    fn test_sequence_increments() {
        let mut session = session();
        assert_eq!(session.next_sequence(), 1);
        assert_eq!(session.next_sequence(), 2);
    }
}
