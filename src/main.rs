use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use attendance_engine::api::{AppState, create_router};
use attendance_engine::calculation::{DashboardQuery, process_csv};
use attendance_engine::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Attendance dashboard engine.
#[derive(Debug, Parser)]
#[command(name = "attendance-engine", version, about)]
struct Cli {
    /// YAML configuration file. Falls back to ./config/dashboard.yaml, then
    /// to built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the dashboard for a CSV export and print it as JSON.
    Report {
        /// Attendance CSV export.
        input: PathBuf,
        /// First day of the selection (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the selection (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Directorate, or "All".
        #[arg(long)]
        directorate: Option<String>,
        /// Type of work, or "All".
        #[arg(long)]
        work_type: Option<String>,
        /// Position grade, or "All".
        #[arg(long)]
        position_grade: Option<String>,
        /// Write the report here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Serve the dashboard API over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<ConfigLoader> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => ConfigLoader::load(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_PATH)),
        None => {
            info!("No configuration file found, using defaults");
            Ok(ConfigLoader::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Report {
            input,
            start,
            end,
            directorate,
            work_type,
            position_grade,
            output,
        } => {
            let query = DashboardQuery {
                start,
                end,
                directorate,
                work_type,
                position_grade,
            };
            let file = File::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let report = process_csv(file, &query, config.config(), Local::now().date_naive())
                .with_context(|| format!("Failed to build dashboard for {}", input.display()))?;

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Report written");
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    writeln!(stdout, "{}", json)?;
                }
            }
        }
        Command::Serve { bind } => {
            let listener = tokio::net::TcpListener::bind(&bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!(address = %bind, "Attendance engine listening");
            axum::serve(listener, create_router(AppState::new(config)))
                .await
                .context("Server error")?;
        }
    }

    Ok(())
}
