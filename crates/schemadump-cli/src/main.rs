mod registry;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use registry::{init_run_logging, start_run, write_report, RunContext, RunOptions};
use schemadump_core::{redact_connection_string, render_document, Error as CoreError};
use schemadump_introspect::{describe_database, IntrospectOptions};
use sqlx::mysql::MySqlPoolOptions;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unsupported engine: {0}")]
    UnsupportedEngine(String),
}

#[derive(Parser, Debug)]
#[command(name = "schemadump", version, about = "Dump a database's structure into a text report")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Introspect(IntrospectArgs),
}

#[derive(Args, Debug)]
struct IntrospectArgs {
    /// Database connection string (flag form).
    #[arg(long, value_name = "CONNECTION_STRING", conflicts_with = "conn_pos")]
    conn: Option<String>,
    /// Database connection string (positional form).
    #[arg(value_name = "CONNECTION_STRING", required_unless_present = "conn")]
    conn_pos: Option<String>,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Extra output path for the report.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Include views in the table enumeration.
    #[arg(long, default_value_t = true)]
    include_views: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Introspect(args) => run_introspect(args).await,
    }
}

async fn run_introspect(args: IntrospectArgs) -> Result<(), CliError> {
    let IntrospectArgs {
        conn,
        conn_pos,
        run_dir,
        out,
        include_views,
    } = args;

    let conn = match (conn, conn_pos) {
        (Some(value), None) => value,
        (None, Some(value)) => value,
        (Some(_), Some(_)) => {
            return Err(CliError::InvalidConfig(
                "use either --conn or positional connection string".to_string(),
            ))
        }
        (None, None) => {
            return Err(CliError::InvalidConfig(
                "connection string is required".to_string(),
            ))
        }
    };

    let engine = detect_engine(&conn)?;

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        engine: engine.to_string(),
        run_dir,
        out,
        options: RunOptions { include_views },
        connection: redact_connection_string(&conn),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(event = "run_started", run_id = %run_id, engine = %engine);

    let timer = Instant::now();

    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&conn)
        .await
        .map_err(|err| CoreError::Connection(err.to_string()))?;

    tracing::info!(event = "introspection_started");

    let options = IntrospectOptions { include_views };
    let reports = describe_database(&pool, &options).await?;
    let failed = reports.iter().filter(|report| report.error.is_some()).count();

    tracing::info!(
        event = "introspection_finished",
        tables = reports.len(),
        failed_tables = failed
    );

    let document = render_document(&reports);
    write_report(&run_paths, &document, run_ctx.out.as_deref())?;
    tracing::info!(event = "report_written", path = %run_paths.report_path.display());

    pool.close().await;

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    println!(
        "Файл {} успешно создан!",
        run_ctx
            .out
            .as_deref()
            .unwrap_or(&run_paths.report_path)
            .display()
    );

    Ok(())
}

fn detect_engine(conn: &str) -> Result<&'static str, CliError> {
    if conn.starts_with("mysql://") || conn.starts_with("mariadb://") {
        Ok("mysql")
    } else {
        Err(CliError::UnsupportedEngine(conn.to_string()))
    }
}
