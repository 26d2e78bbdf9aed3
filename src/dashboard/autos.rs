//! Automobile Statistics
//!
//! A statistics dropdown switches between two mutually exclusive modes;
//! each fills a grid of two rows of two chart slots.
//!
//! | mode      | slot 1             | slot 2                   | slot 3                   | slot 4                 |
//! |-----------|--------------------|--------------------------|--------------------------|------------------------|
//! | yearly    | mean sales by year | placeholder              | mean sales by type (bar) | ad spend by type (pie) |
//! | recession | mean sales by year | mean sales by type (bar) | ad spend by type (pie)   | placeholder            |
//!
//! Recession mode only reads rows with `Recession == 1` and ignores the
//! year; yearly mode filters slots 3 and 4 on the selected year and shows
//! nothing until a year is chosen.

use serde_json::json;
use std::sync::Arc;

use super::binding::{Binding, Dashboard, Output, Slot};
use super::error::DashboardResult;
use super::input::{as_text, parse_year, InputValues};
use super::layout::{Component, DropdownOption};
use crate::aggregate::{aggregate, AggregateQuery, AggregateResult, AggregationFunc, Filter};
use crate::chart::ChartDescriptor;
use crate::table::{LoadOptions, RowTable};

pub const INPUT_STATISTICS: &str = "select-statistics";
pub const INPUT_YEAR: &str = "select-year";
pub const OUTPUT_CONTAINER: &str = "output-container";

pub const YEARLY_STATISTICS: &str = "Yearly Statistics";
pub const RECESSION_STATISTICS: &str = "Recession Period Statistics";

/// Years offered by the year dropdown
pub const FIRST_YEAR: i64 = 1980;
pub const LAST_YEAR: i64 = 2023;

const YEAR: &str = "Year";
const RECESSION: &str = "Recession";
const VEHICLE_TYPE: &str = "Vehicle_Type";
const SALES: &str = "Automobile_Sales";
const AD_SPEND: &str = "Advertising_Expenditure";

/// Columns the automobile dataset must provide
pub const REQUIRED_COLUMNS: &[&str] = &[YEAR, RECESSION, VEHICLE_TYPE, SALES, AD_SPEND];

/// Statistics mode picked in the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticsMode {
    Yearly,
    Recession,
}

impl StatisticsMode {
    /// Parse the dropdown value; anything else selects no mode
    pub fn from_input(value: Option<&serde_json::Value>) -> Option<Self> {
        match value?.as_str()? {
            YEARLY_STATISTICS => Some(Self::Yearly),
            RECESSION_STATISTICS => Some(Self::Recession),
            _ => None,
        }
    }
}

/// Historical automobile sales dashboard
pub struct AutomobileSalesDashboard {
    table: Arc<RowTable>,
}

impl AutomobileSalesDashboard {
    pub const ID: &'static str = "automobile-sales";

    /// Wrap a loaded table; fails if a required column is missing
    pub fn new(table: Arc<RowTable>) -> DashboardResult<Self> {
        table.require(REQUIRED_COLUMNS)?;
        Ok(Self { table })
    }

    /// How the sales CSV must be read
    pub fn load_options() -> LoadOptions {
        LoadOptions::new().with_required_columns(REQUIRED_COLUMNS)
    }

    fn run(&self, query: AggregateQuery) -> DashboardResult<AggregateResult> {
        Ok(aggregate(&self.table, &query)?)
    }

    /// Mean sales per year, optionally restricted to recession rows
    fn sales_by_year(&self, recession_only: bool) -> DashboardResult<AggregateResult> {
        let mut builder = AggregateQuery::measure(SALES, AggregationFunc::Mean).group_by(&[YEAR]);
        if recession_only {
            builder = builder.filter(Filter::eq(RECESSION, 1));
        }
        self.run(builder.build())
    }

    /// Aggregate of `measure` per vehicle type under `filter`.
    ///
    /// `None` filter means the year did not parse: the result is empty.
    fn by_vehicle_type(
        &self,
        measure: &str,
        func: AggregationFunc,
        filter: Option<Filter>,
    ) -> DashboardResult<AggregateResult> {
        let builder = AggregateQuery::measure(measure, func).group_by(&[VEHICLE_TYPE]);
        match filter {
            Some(filter) => self.run(builder.filter(filter).build()),
            None => Ok(AggregateResult::empty(&builder.build())),
        }
    }

    fn recession_grid(&self) -> DashboardResult<Vec<Vec<Slot>>> {
        let recession = || Some(Filter::eq(RECESSION, 1));

        let yearly = ChartDescriptor::line(
            &self.sales_by_year(true)?,
            YEAR,
            SALES,
            None,
            "Average Automobile Sales fluctuation over Recession Period",
        )?;
        let by_type = ChartDescriptor::bar(
            &self.by_vehicle_type(SALES, AggregationFunc::Mean, recession())?,
            VEHICLE_TYPE,
            SALES,
            "Average Number of Vehicles Sold by Vehicle Type during Recession",
        )?;
        let spend = ChartDescriptor::pie(
            &self.by_vehicle_type(AD_SPEND, AggregationFunc::Sum, recession())?,
            VEHICLE_TYPE,
            AD_SPEND,
            "Total Expenditure Share by Vehicle Type during Recession",
        )?;

        Ok(vec![
            vec![Slot::Chart { chart: yearly }, Slot::Chart { chart: by_type }],
            // Unemployment effect chart: placeholder
            vec![Slot::Chart { chart: spend }, Slot::Placeholder],
        ])
    }

    fn yearly_grid(&self, year_input: Option<&serde_json::Value>) -> DashboardResult<Vec<Vec<Slot>>> {
        let year_filter = || parse_year(year_input).map(|y| Filter::eq(YEAR, y));
        let year_text = as_text(year_input).unwrap_or_default();

        let yearly = ChartDescriptor::line(
            &self.sales_by_year(false)?,
            YEAR,
            SALES,
            None,
            "Yearly Automobile Sales",
        )?;
        let by_type = ChartDescriptor::bar(
            &self.by_vehicle_type(SALES, AggregationFunc::Mean, year_filter())?,
            VEHICLE_TYPE,
            SALES,
            format!("Average Vehicles Sold by Vehicle Type in {}", year_text),
        )?;
        let spend = ChartDescriptor::pie(
            &self.by_vehicle_type(AD_SPEND, AggregationFunc::Sum, year_filter())?,
            VEHICLE_TYPE,
            AD_SPEND,
            format!("Total Advertisement Expenditure by Vehicle Type in {}", year_text),
        )?;

        Ok(vec![
            // Monthly sales trend: placeholder
            vec![Slot::Chart { chart: yearly }, Slot::Placeholder],
            vec![Slot::Chart { chart: by_type }, Slot::Chart { chart: spend }],
        ])
    }
}

impl Dashboard for AutomobileSalesDashboard {
    fn id(&self) -> &str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Automobile Statistics Dashboard"
    }

    fn layout(&self) -> Component {
        let statistics = vec![
            DropdownOption::text(YEARLY_STATISTICS),
            DropdownOption::text(RECESSION_STATISTICS),
        ];
        let years = (FIRST_YEAR..=LAST_YEAR)
            .map(|y| DropdownOption::text(y.to_string()))
            .collect();

        Component::container(vec![
            Component::heading(1, self.title()),
            Component::container(vec![
                Component::label("Select Statistics:"),
                Component::Dropdown {
                    id: INPUT_STATISTICS.to_string(),
                    options: statistics,
                    value: json!(YEARLY_STATISTICS),
                    placeholder: Some("Select Statistics".to_string()),
                },
            ]),
            Component::container(vec![Component::Dropdown {
                id: INPUT_YEAR.to_string(),
                options: years,
                value: json!(FIRST_YEAR.to_string()),
                placeholder: None,
            }]),
            Component::container(vec![]).with_id(OUTPUT_CONTAINER),
        ])
    }

    fn binding(&self) -> Binding {
        Binding::new(&[INPUT_STATISTICS, INPUT_YEAR], &[OUTPUT_CONTAINER])
    }

    fn recompute(&self, inputs: &InputValues) -> DashboardResult<Vec<Output>> {
        let output = match StatisticsMode::from_input(inputs.get(INPUT_STATISTICS)) {
            Some(StatisticsMode::Recession) => {
                Output::grid(OUTPUT_CONTAINER, self.recession_grid()?)
            }
            Some(StatisticsMode::Yearly) => {
                let year = inputs.get(INPUT_YEAR);
                match as_text(year) {
                    Some(text) if !text.is_empty() => {
                        Output::grid(OUTPUT_CONTAINER, self.yearly_grid(year)?)
                    }
                    // No year chosen yet
                    _ => Output::nothing(OUTPUT_CONTAINER),
                }
            }
            None => Output::nothing(OUTPUT_CONTAINER),
        };
        Ok(vec![output])
    }
}
