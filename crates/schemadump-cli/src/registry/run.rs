use std::fs::{self, create_dir_all, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{RegistryError, RegistryResult};

/// Serializable options for runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub include_views: bool,
}

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub engine: String,
    pub run_dir: PathBuf,
    pub out: Option<PathBuf>,
    pub options: RunOptions,
    /// Redacted connection string, safe to persist.
    pub connection: String,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
struct RunConfig {
    run_id: String,
    started_at: String,
    engine: String,
    options: RunOptions,
    connection: String,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub report_path: PathBuf,
    pub logs_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let run_root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&run_root)?;

    let report_path = run_root.join("database_structure.txt");
    let config_path = run_root.join("config.json");
    let logs_path = run_root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        engine: ctx.engine.clone(),
        options: ctx.options.clone(),
        connection: ctx.connection.clone(),
    };
    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        report_path,
        logs_path,
    })
}

/// Write the rendered document into the run directory and, when requested,
/// to an extra output path.
pub fn write_report(
    paths: &RunPaths,
    document: &str,
    out_path: Option<&Path>,
) -> RegistryResult<()> {
    fs::write(&paths.report_path, document)?;

    if let Some(out_path) = out_path {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        fs::write(out_path, document)?;
    }

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
