//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboards;
pub mod datasets;
pub mod health;
