//! Flight Delay Time Statistics
//!
//! One numeric year input drives five line charts: the mean carrier,
//! weather, NAS, security and late-aircraft delay per month, one line per
//! reporting airline.

use serde_json::json;
use std::sync::Arc;

use super::binding::{Binding, Dashboard, Output};
use super::error::DashboardResult;
use super::input::{parse_year, InputValues};
use super::layout::{Component, InputType};
use crate::aggregate::{aggregate, AggregateQuery, AggregateResult, AggregationFunc, Filter};
use crate::chart::ChartDescriptor;
use crate::table::{ColumnType, LoadOptions, RowTable, TextEncoding};

pub const INPUT_YEAR: &str = "input-year";

const YEAR: &str = "Year";
const MONTH: &str = "Month";
const AIRLINE: &str = "Reporting_Airline";

const DESCRIPTION: &str = "Welcome to the Flight Delay Time Statistics Dashboard! This interactive \
dashboard provides insights into the average delay times experienced by airlines, categorized by \
different types of delays. Explore the visualizations below to understand how various factors such \
as carrier delays, weather conditions, NAS delays, security-related issues, and late aircraft \
arrivals impact flight schedules. Simply input a specific year using the field below, and the \
dashboard will dynamically update to display the delay statistics for that year. Gain valuable \
insights into airline performance trends and factors influencing flight delays.";

/// One delay chart: output id, measure column, title
struct DelayPlot {
    output: &'static str,
    measure: &'static str,
    title: &'static str,
}

const PLOTS: [DelayPlot; 5] = [
    DelayPlot {
        output: "carrier-plot",
        measure: "CarrierDelay",
        title: "Average Carrier Delay Time (minutes) by Airline",
    },
    DelayPlot {
        output: "weather-plot",
        measure: "WeatherDelay",
        title: "Average Weather Delay Time (minutes) by Airline",
    },
    DelayPlot {
        output: "nas-plot",
        measure: "NASDelay",
        title: "Average NAS Delay Time (minutes) by Airline",
    },
    DelayPlot {
        output: "security-plot",
        measure: "SecurityDelay",
        title: "Average Security Delay Time (minutes) by Airline",
    },
    DelayPlot {
        output: "late-plot",
        measure: "LateAircraftDelay",
        title: "Average Late Aircraft Delay Time (minutes) by Airline",
    },
];

/// Columns the flight dataset must provide
pub const REQUIRED_COLUMNS: &[&str] = &[
    YEAR,
    MONTH,
    AIRLINE,
    "CarrierDelay",
    "WeatherDelay",
    "NASDelay",
    "SecurityDelay",
    "LateAircraftDelay",
];

/// Flight delay dashboard over the airline on-time dataset
pub struct FlightDelayDashboard {
    table: Arc<RowTable>,
}

impl FlightDelayDashboard {
    pub const ID: &'static str = "flight-delays";

    /// Wrap a loaded table; fails if a required column is missing
    pub fn new(table: Arc<RowTable>) -> DashboardResult<Self> {
        table.require(REQUIRED_COLUMNS)?;
        Ok(Self { table })
    }

    /// How the airline CSV must be read
    pub fn load_options() -> LoadOptions {
        LoadOptions::new()
            .with_encoding(TextEncoding::Latin1)
            .with_type_hint("Div1Airport", ColumnType::Text)
            .with_type_hint("Div1TailNum", ColumnType::Text)
            .with_type_hint("Div2Airport", ColumnType::Text)
            .with_type_hint("Div2TailNum", ColumnType::Text)
            .with_required_columns(REQUIRED_COLUMNS)
    }

    fn delay_chart(&self, year: Option<i64>, plot: &DelayPlot) -> DashboardResult<ChartDescriptor> {
        let mut builder = AggregateQuery::measure(plot.measure, AggregationFunc::Mean)
            .group_by(&[MONTH, AIRLINE]);
        if let Some(year) = year {
            builder = builder.filter(Filter::eq(YEAR, year));
        }
        let query = builder.build();

        let result = match year {
            Some(_) => aggregate(&self.table, &query)?,
            None => AggregateResult::empty(&query),
        };

        Ok(ChartDescriptor::line(
            &result,
            MONTH,
            plot.measure,
            Some(AIRLINE),
            plot.title,
        )?)
    }
}

impl Dashboard for FlightDelayDashboard {
    fn id(&self) -> &str {
        Self::ID
    }

    fn title(&self) -> &str {
        "Flight Delay Time Statistics"
    }

    fn layout(&self) -> Component {
        Component::container(vec![
            Component::container(vec![
                Component::heading(1, self.title()),
                Component::paragraph(DESCRIPTION),
                Component::Break,
                Component::Break,
                Component::container(vec![
                    Component::label("Input Year: "),
                    Component::Input {
                        id: INPUT_YEAR.to_string(),
                        input_type: InputType::Number,
                        value: json!("2010"),
                    },
                ]),
                Component::Break,
                Component::Break,
            ]),
            Component::container(vec![
                Component::container(vec![
                    Component::graph(PLOTS[0].output),
                    Component::graph(PLOTS[1].output),
                ]),
                Component::container(vec![
                    Component::graph(PLOTS[2].output),
                    Component::graph(PLOTS[3].output),
                ]),
                Component::graph(PLOTS[4].output),
            ]),
        ])
    }

    fn binding(&self) -> Binding {
        let outputs: Vec<&str> = PLOTS.iter().map(|p| p.output).collect();
        Binding::new(&[INPUT_YEAR], &outputs)
    }

    fn recompute(&self, inputs: &InputValues) -> DashboardResult<Vec<Output>> {
        let year = parse_year(inputs.get(INPUT_YEAR));

        PLOTS
            .iter()
            .map(|plot| Ok(Output::figure(plot.output, self.delay_chart(year, plot)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::OutputValue;
    use crate::table::{parse_csv, Value};
    use serde_json::json;
    use std::collections::HashSet;

    const AIRLINE_CSV: &str = "\
Year,Month,Reporting_Airline,CarrierDelay,WeatherDelay,NASDelay,SecurityDelay,LateAircraftDelay,Div1Airport
2010,1,AA,10,0,5,0,20,
2010,1,AA,20,2,5,0,40,JFK
2010,2,UA,4,,1,0,0,
2010,3,AA,6,1,,0,2,
2011,1,DL,50,5,5,1,5,123
2010,2,DL,,,,,,
";

    fn dashboard() -> FlightDelayDashboard {
        let table = parse_csv(
            AIRLINE_CSV.as_bytes(),
            "memory",
            &FlightDelayDashboard::load_options(),
        )
        .unwrap();
        FlightDelayDashboard::new(Arc::new(table)).unwrap()
    }

    fn figures(outputs: &[Output]) -> Vec<&ChartDescriptor> {
        outputs
            .iter()
            .map(|o| match &o.value {
                OutputValue::Figure { figure } => figure,
                other => panic!("Expected figure, got {:?}", other),
            })
            .collect()
    }

    fn year_inputs(value: serde_json::Value) -> InputValues {
        let mut inputs = InputValues::new();
        inputs.insert(INPUT_YEAR.to_string(), value);
        inputs
    }

    #[test]
    fn test_outputs_follow_binding_order() {
        let dash = dashboard();
        let outputs = dash.recompute(&dash.defaults()).unwrap();
        let ids: Vec<_> = outputs.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, dash.binding().outputs);
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_one_line_per_airline_present_that_year() {
        let dash = dashboard();
        let outputs = dash.recompute(&year_inputs(json!("2010"))).unwrap();

        for chart in figures(&outputs) {
            let names: Vec<_> = chart.series.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["AA", "UA", "DL"], "chart {}", chart.title);

            let months: HashSet<_> = chart
                .series
                .iter()
                .flat_map(|s| s.points.iter().map(|p| p.x.clone()))
                .collect();
            assert!(months.iter().all(|m| matches!(m, Value::Int(1..=12))));
            assert!(!months.contains(&Value::Int(4)));
        }
    }

    #[test]
    fn test_monthly_means() {
        let dash = dashboard();
        let outputs = dash.recompute(&year_inputs(json!(2010))).unwrap();
        let charts = figures(&outputs);

        let carrier = charts[0];
        assert_eq!(carrier.title, "Average Carrier Delay Time (minutes) by Airline");
        assert_eq!(carrier.x_field, "Month");
        assert_eq!(carrier.y_field, "CarrierDelay");
        let aa = carrier.series_named("AA").unwrap();
        assert_eq!(aa.points[0].x, Value::Int(1));
        assert_eq!(aa.points[0].y, Some(15.0));
        assert_eq!(aa.points[1].x, Value::Int(3));
        assert_eq!(aa.points[1].y, Some(6.0));

        // DL flew in 2010 but reported no delays
        let dl = carrier.series_named("DL").unwrap();
        assert_eq!(dl.points[0].y, None);
    }

    #[test]
    fn test_year_without_rows_gives_empty_charts() {
        let dash = dashboard();
        let outputs = dash.recompute(&year_inputs(json!("1999"))).unwrap();
        assert_eq!(outputs.len(), 5);
        assert!(figures(&outputs).iter().all(|c| c.series.is_empty()));
    }

    #[test]
    fn test_unparsable_year_gives_empty_charts() {
        let dash = dashboard();
        for value in [json!("abc"), json!(null), json!("")] {
            let outputs = dash.recompute(&year_inputs(value)).unwrap();
            assert!(figures(&outputs).iter().all(|c| c.series.is_empty()));
        }
        let outputs = dash.recompute(&InputValues::new()).unwrap();
        assert!(figures(&outputs).iter().all(|c| c.series.is_empty()));
    }

    #[test]
    fn test_layout_defaults_and_graphs() {
        let dash = dashboard();
        assert_eq!(dash.defaults()[INPUT_YEAR], json!("2010"));
        assert_eq!(
            dash.layout().graph_ids(),
            vec!["carrier-plot", "weather-plot", "nas-plot", "security-plot", "late-plot"]
        );
    }

    #[test]
    fn test_missing_column_rejected() {
        let table = parse_csv("Year,Month\n2010,1\n".as_bytes(), "memory", &Default::default())
            .unwrap();
        assert!(FlightDelayDashboard::new(Arc::new(table)).is_err());
    }

    #[test]
    fn test_div_columns_forced_to_text() {
        let dash = dashboard();
        let airport = dash.table.column("Div1Airport").unwrap();
        assert_eq!(airport.column_type(), ColumnType::Text);
    }
}
