//! Input → output binding
//!
//! A dashboard registers one recompute handler against named input and
//! output ids. Dispatch rule: a change to any bound input recomputes every
//! bound output. There is no partial update.

use serde::{Deserialize, Serialize};

use super::error::DashboardResult;
use super::input::InputValues;
use super::layout::Component;
use crate::chart::ChartDescriptor;

/// Input and output ids a handler is registered against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Binding {
    pub fn new(inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check if an input id is bound
    pub fn has_input(&self, id: &str) -> bool {
        self.inputs.iter().any(|i| i == id)
    }
}

/// One cell of a chart grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Slot {
    Chart { chart: ChartDescriptor },
    /// Reserved slot with no computation behind it
    Placeholder,
}

impl Slot {
    pub fn chart(&self) -> Option<&ChartDescriptor> {
        match self {
            Slot::Chart { chart } => Some(chart),
            Slot::Placeholder => None,
        }
    }
}

/// Value delivered to a bound output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputValue {
    /// A single chart
    Figure { figure: ChartDescriptor },
    /// Rows of chart slots
    Grid { rows: Vec<Vec<Slot>> },
    /// Output cleared
    Nothing,
}

/// Recomputed value for one output id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub id: String,
    pub value: OutputValue,
}

impl Output {
    pub fn figure(id: &str, figure: ChartDescriptor) -> Self {
        Self {
            id: id.to_string(),
            value: OutputValue::Figure { figure },
        }
    }

    pub fn grid(id: &str, rows: Vec<Vec<Slot>>) -> Self {
        Self {
            id: id.to_string(),
            value: OutputValue::Grid { rows },
        }
    }

    pub fn nothing(id: &str) -> Self {
        Self {
            id: id.to_string(),
            value: OutputValue::Nothing,
        }
    }
}

/// A dashboard: a view template plus a pure recompute handler.
///
/// Implementations own their data (`Arc<RowTable>`) and keep no other
/// state, so identical inputs always produce identical outputs.
pub trait Dashboard: Send + Sync {
    /// Stable identifier used in URLs and messages
    fn id(&self) -> &str;

    /// Human-readable name
    fn title(&self) -> &str;

    /// Page structure
    fn layout(&self) -> Component;

    /// Ids the handler is registered against
    fn binding(&self) -> Binding;

    /// Recompute every bound output, in `binding().outputs` order
    fn recompute(&self, inputs: &InputValues) -> DashboardResult<Vec<Output>>;

    /// Initial input values, read from the layout
    fn defaults(&self) -> InputValues {
        self.layout().input_defaults()
    }
}
