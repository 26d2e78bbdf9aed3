//! Dashboards
//!
//! A dashboard is a static view template plus one recompute handler bound
//! to a set of input ids and output ids. Changing any bound input
//! recomputes every bound output from the dashboard's table.
//!
//! Two dashboards are provided:
//! - [`FlightDelayDashboard`]: five per-airline monthly delay charts for a year
//! - [`AutomobileSalesDashboard`]: yearly or recession statistics in a chart grid
//!
//! # Example
//!
//! ```ignore
//! use statboard::dashboard::{DashboardRegistry, FlightDelayDashboard};
//!
//! let mut registry = DashboardRegistry::new();
//! registry.register(Arc::new(FlightDelayDashboard::new(table)?))?;
//! let outputs = registry.update("flight-delays", &InputValues::new())?;
//! ```

pub mod autos;
pub mod binding;
pub mod error;
pub mod flight;
pub mod input;
pub mod layout;
pub mod registry;
pub mod session;

pub use autos::{AutomobileSalesDashboard, StatisticsMode};
pub use binding::{Binding, Dashboard, Output, OutputValue, Slot};
pub use error::{DashboardError, DashboardResult};
pub use flight::FlightDelayDashboard;
pub use input::{as_text, parse_year, InputValues};
pub use layout::{Component, DropdownOption, InputType};
pub use registry::{DashboardRegistry, DashboardSummary};
pub use session::Session;
