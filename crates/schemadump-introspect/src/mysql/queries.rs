use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Row, Value, ValueRef};

use schemadump_core::{Error, RawValue, Result};

/// Quote an identifier for interpolation into `SHOW`/`DESCRIBE` statements,
/// which do not accept bound parameters. Embedded backticks are doubled.
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn query_error(table: &str, err: impl ToString) -> Error {
    Error::Query {
        table: table.to_string(),
        cause: err.to_string(),
    }
}

/// Read one cell without committing to a text or byte representation.
///
/// Depending on server negotiation the same catalog column may arrive as
/// text or as an undecoded byte sequence; the normalizer sorts that out
/// later.
fn raw_cell(row: &MySqlRow, index: usize) -> std::result::Result<RawValue, sqlx::Error> {
    let value = row.try_get_raw(index)?;
    if value.is_null() {
        return Ok(RawValue::Null);
    }

    let owned = ValueRef::to_owned(&value);
    if let Ok(text) = owned.try_decode::<String>() {
        return Ok(RawValue::Text(text));
    }
    owned.try_decode::<Vec<u8>>().map(RawValue::Bytes)
}

fn list_tables_sql(include_views: bool) -> &'static str {
    if include_views {
        "SHOW FULL TABLES"
    } else {
        "SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'"
    }
}

/// Enumerate all table names visible in the connected schema, views
/// included unless the caller opted out.
///
/// Failure here means the session itself is unusable, so it is reported as
/// a connection error and aborts the run.
pub async fn list_tables(pool: &MySqlPool, include_views: bool) -> Result<Vec<String>> {
    let rows = sqlx::query(list_tables_sql(include_views))
        .fetch_all(pool)
        .await
        .map_err(|err| Error::Connection(err.to_string()))?;

    rows.iter()
        .map(|row| {
            let cell = raw_cell(row, 0).map_err(|err| Error::Connection(err.to_string()))?;
            schemadump_core::normalize_required(cell)
        })
        .collect()
}

/// One `DESCRIBE` row, cells kept raw until normalization.
pub struct RawColumnRow {
    pub field: RawValue,
    pub data_type: RawValue,
    pub null: RawValue,
    pub key: RawValue,
    pub default: RawValue,
    pub extra: RawValue,
}

/// Raw per-column metadata in catalog-declared order.
pub async fn describe_columns(pool: &MySqlPool, table: &str) -> Result<Vec<RawColumnRow>> {
    let sql = format!("DESCRIBE {}", quote_ident(table));
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .map_err(|err| query_error(table, err))?;

    rows.iter()
        .map(|row| {
            Ok(RawColumnRow {
                field: raw_cell(row, 0).map_err(|err| query_error(table, err))?,
                data_type: raw_cell(row, 1).map_err(|err| query_error(table, err))?,
                null: raw_cell(row, 2).map_err(|err| query_error(table, err))?,
                key: raw_cell(row, 3).map_err(|err| query_error(table, err))?,
                default: raw_cell(row, 4).map_err(|err| query_error(table, err))?,
                extra: raw_cell(row, 5).map_err(|err| query_error(table, err))?,
            })
        })
        .collect()
}

/// One foreign-key column row from `KEY_COLUMN_USAGE`.
pub struct RawForeignKeyRow {
    pub column: RawValue,
    pub constraint: RawValue,
    pub referenced_table: RawValue,
    pub referenced_column: RawValue,
}

/// Foreign-key columns of a table, restricted to the current schema and to
/// rows that actually reference another table (the predicate lives in the
/// query, not in post-filtering).
pub async fn list_foreign_keys(pool: &MySqlPool, table: &str) -> Result<Vec<RawForeignKeyRow>> {
    let sql = r#"
        SELECT COLUMN_NAME, CONSTRAINT_NAME, REFERENCED_TABLE_NAME, REFERENCED_COLUMN_NAME
        FROM information_schema.KEY_COLUMN_USAGE
        WHERE TABLE_NAME = ?
          AND TABLE_SCHEMA = DATABASE()
          AND REFERENCED_TABLE_NAME IS NOT NULL
    "#;

    let rows = sqlx::query(sql)
        .bind(table)
        .fetch_all(pool)
        .await
        .map_err(|err| query_error(table, err))?;

    rows.iter()
        .map(|row| {
            Ok(RawForeignKeyRow {
                column: raw_cell(row, 0).map_err(|err| query_error(table, err))?,
                constraint: raw_cell(row, 1).map_err(|err| query_error(table, err))?,
                referenced_table: raw_cell(row, 2).map_err(|err| query_error(table, err))?,
                referenced_column: raw_cell(row, 3).map_err(|err| query_error(table, err))?,
            })
        })
        .collect()
}

/// One `SHOW INDEX` row: one row per (index, column) pair.
pub struct RawIndexRow {
    pub non_unique: i64,
    pub key_name: RawValue,
    pub column_name: RawValue,
}

pub async fn list_indexes(pool: &MySqlPool, table: &str) -> Result<Vec<RawIndexRow>> {
    let sql = format!("SHOW INDEX FROM {}", quote_ident(table));
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .map_err(|err| query_error(table, err))?;

    rows.iter()
        .map(|row| {
            Ok(RawIndexRow {
                non_unique: row.try_get(1).map_err(|err| query_error(table, err))?,
                key_name: raw_cell(row, 2).map_err(|err| query_error(table, err))?,
                column_name: raw_cell(row, 4).map_err(|err| query_error(table, err))?,
            })
        })
        .collect()
}

/// The statement that would recreate the table, as reported by the engine.
pub async fn get_create_statement(pool: &MySqlPool, table: &str) -> Result<RawValue> {
    let sql = format!("SHOW CREATE TABLE {}", quote_ident(table));
    let row = sqlx::query(&sql)
        .fetch_one(pool)
        .await
        .map_err(|err| query_error(table, err))?;

    raw_cell(&row, 1).map_err(|err| query_error(table, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_identifiers() {
        assert_eq!(quote_ident("users"), "`users`");
    }

    #[test]
    fn doubles_embedded_backticks() {
        assert_eq!(quote_ident("odd`name"), "`odd``name`");
    }

    #[test]
    fn enumeration_filters_views_only_on_opt_out() {
        assert_eq!(list_tables_sql(true), "SHOW FULL TABLES");
        assert_eq!(
            list_tables_sql(false),
            "SHOW FULL TABLES WHERE Table_type = 'BASE TABLE'"
        );
    }
}
