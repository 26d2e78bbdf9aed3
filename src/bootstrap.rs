//! Startup wiring
//!
//! Loads the configured datasets and registers the dashboards built on
//! them. Shared by the server and the CLI.

use std::sync::Arc;

use crate::config::{DatasetConfig, DatasetsConfig};
use crate::dashboard::{
    AutomobileSalesDashboard, Dashboard, DashboardError, DashboardRegistry, DashboardResult,
    FlightDelayDashboard,
};
use crate::table::{load_table, LoadOptions, RowTable, TableInfo};

async fn load(dataset: &DatasetConfig, options: LoadOptions) -> DashboardResult<RowTable> {
    let options = match dataset.encoding {
        Some(encoding) => options.with_encoding(encoding),
        None => options,
    };
    Ok(load_table(&dataset.data_source(), &options).await?)
}

/// Load the airline table and build the flight delay dashboard
pub async fn flight_dashboard(
    datasets: &DatasetsConfig,
) -> DashboardResult<(FlightDelayDashboard, TableInfo)> {
    let table = load(&datasets.flights, FlightDelayDashboard::load_options()).await?;
    let info = table.info();
    Ok((FlightDelayDashboard::new(Arc::new(table))?, info))
}

/// Load the sales table and build the automobile dashboard
pub async fn autos_dashboard(
    datasets: &DatasetsConfig,
) -> DashboardResult<(AutomobileSalesDashboard, TableInfo)> {
    let table = load(&datasets.autos, AutomobileSalesDashboard::load_options()).await?;
    let info = table.info();
    Ok((AutomobileSalesDashboard::new(Arc::new(table))?, info))
}

/// Load one dashboard by id
pub async fn dashboard_by_id(
    datasets: &DatasetsConfig,
    id: &str,
) -> DashboardResult<Arc<dyn Dashboard>> {
    let dashboard: Arc<dyn Dashboard> = match id {
        FlightDelayDashboard::ID => Arc::new(flight_dashboard(datasets).await?.0),
        AutomobileSalesDashboard::ID => Arc::new(autos_dashboard(datasets).await?.0),
        other => return Err(DashboardError::UnknownDashboard(other.to_string())),
    };
    Ok(dashboard)
}

/// Load every dataset and register both dashboards
pub async fn build_registry(
    datasets: &DatasetsConfig,
) -> DashboardResult<(DashboardRegistry, Vec<TableInfo>)> {
    let (flights, flights_info) = flight_dashboard(datasets).await?;
    let (autos, autos_info) = autos_dashboard(datasets).await?;

    let mut registry = DashboardRegistry::new();
    registry.register(Arc::new(flights))?;
    registry.register(Arc::new(autos))?;

    Ok((registry, vec![flights_info, autos_info]))
}
