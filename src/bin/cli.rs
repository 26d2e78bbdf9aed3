//! statboard CLI
//!
//! Offline access to the dashboards without running the server:
//! - Render outputs for a set of inputs
//! - Print a dashboard's view template
//! - Inspect the configured datasets
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use statboard::bootstrap;
use statboard::config::{generate_default_config, Config};
use statboard::dashboard::{DashboardRegistry, InputValues};

#[derive(Parser)]
#[command(name = "statboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render statboard dashboards from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recompute a dashboard and print its outputs
    Render {
        /// Dashboard id (flight-delays, automobile-sales)
        dashboard: String,
        /// Input values in id=value format; unset inputs keep their defaults
        #[arg(short, long = "input")]
        inputs: Vec<String>,
    },

    /// Print a dashboard's view template
    Layout {
        /// Dashboard id
        dashboard: String,
    },

    /// Load every dataset and print a summary
    Inspect,

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Render { dashboard, inputs } => {
            let config = load_config(&cli)?;
            let changes = parse_inputs(inputs)?;
            let mut registry = DashboardRegistry::new();
            registry.register(bootstrap::dashboard_by_id(&config.datasets, dashboard).await?)?;

            let outputs = registry.update(dashboard, &changes)?;
            print_json(
                &serde_json::json!({ "dashboard": dashboard, "outputs": outputs }),
                cli.pretty,
            )?;
        }

        Commands::Layout { dashboard } => {
            let config = load_config(&cli)?;
            let dash = bootstrap::dashboard_by_id(&config.datasets, dashboard).await?;
            print_json(&dash.layout(), cli.pretty)?;
        }

        Commands::Inspect => {
            let config = load_config(&cli)?;
            let (registry, datasets) = bootstrap::build_registry(&config.datasets)
                .await
                .context("Failed to load datasets")?;

            for info in &datasets {
                println!("{}", info);
                println!("{:<28} {:<8} {}", "Column", "Type", "Nulls");
                println!("{}", "-".repeat(44));
                for column in &info.columns {
                    println!(
                        "{:<28} {:<8} {}",
                        column.name, column.column_type, column.nulls
                    );
                }
                println!();
            }

            println!("Dashboards:");
            for summary in registry.list() {
                println!("  {:<20} {}", summary.id, summary.title);
            }
        }

        Commands::InitConfig { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Resolve the config and start logging to stderr
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::resolve(cli.config.as_deref())?;
    // A subscriber may already be installed; keep going without one
    if statboard::telemetry::init_tracing(&config.logging).is_ok() {
        config.log_origin();
    }
    Ok(config)
}

/// Parse `id=value` pairs. Values that parse as JSON keep their JSON type,
/// anything else is taken as a string.
fn parse_inputs(pairs: &[String]) -> anyhow::Result<InputValues> {
    let mut values = InputValues::new();
    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("Invalid input {:?}, expected id=value", pair);
        };
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        values.insert(key.trim().to_string(), value);
    }
    Ok(values)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}
