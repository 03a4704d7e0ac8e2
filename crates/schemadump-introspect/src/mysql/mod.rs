use sqlx::MySqlPool;

use schemadump_core::{normalize_required, Result, TableReport};

use crate::adapter::Adapter;
use crate::options::IntrospectOptions;

mod mapper;
mod queries;

/// Adapter for MySQL/MariaDB databases.
#[derive(Debug, Clone)]
pub struct MySqlAdapter {
    pool: MySqlPool,
}

impl MySqlAdapter {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Adapter for MySqlAdapter {
    fn engine(&self) -> &'static str {
        "mysql"
    }

    async fn describe(&self, opts: &IntrospectOptions) -> Result<Vec<TableReport>> {
        describe_database(&self.pool, opts).await
    }
}

/// Inspect one table: run the four catalog queries in sequence, normalize
/// every cell, and assemble the report.
///
/// Any failure here is scoped to this table; the caller decides whether to
/// record it or abort.
pub async fn inspect_table(pool: &MySqlPool, table: &str) -> Result<TableReport> {
    let raw_columns = queries::describe_columns(pool, table).await?;
    let columns = mapper::map_columns(raw_columns)?;

    let raw_fks = queries::list_foreign_keys(pool, table).await?;
    let foreign_keys = mapper::map_foreign_keys(raw_fks)?;

    let raw_indexes = queries::list_indexes(pool, table).await?;
    let indexes = mapper::group_indexes(raw_indexes)?;

    let create_statement = normalize_required(queries::get_create_statement(pool, table).await?)?;

    Ok(TableReport {
        name: table.to_string(),
        columns,
        foreign_keys,
        indexes,
        create_statement,
        error: None,
    })
}

/// Describe every table in the connected schema, one report per enumerated
/// table, in enumeration order.
///
/// The enumeration drives the whole run: a table that fails mid-inspection
/// is recorded as a failed report, never dropped, so the output length
/// always equals the enumerated table count. Only a failed enumeration
/// aborts the run.
pub async fn describe_database(
    pool: &MySqlPool,
    opts: &IntrospectOptions,
) -> Result<Vec<TableReport>> {
    let tables = queries::list_tables(pool, opts.include_views).await?;

    let mut reports = Vec::with_capacity(tables.len());
    for table in tables {
        let report = match inspect_table(pool, &table).await {
            Ok(report) => report,
            Err(error) => TableReport::failed(table, error),
        };
        reports.push(report);
    }

    Ok(reports)
}
