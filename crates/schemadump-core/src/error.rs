use thiserror::Error;

/// Core error type shared across schemadump crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The database session could not be established or has gone away.
    /// Fatal: aborts the whole run.
    #[error("connection error: {0}")]
    Connection(String),
    /// A catalog query failed for one table. Isolated to that table.
    #[error("query failed for table `{table}`: {cause}")]
    Query { table: String, cause: String },
    /// A raw cell could not be decoded as UTF-8. Isolated to the table it
    /// came from.
    #[error("value of {} bytes is not valid utf-8", .0.len())]
    Encoding(Vec<u8>),
    /// A cell the catalog guarantees to be non-NULL came back NULL.
    #[error("required catalog value is missing")]
    MissingValue,
}

/// Convenience alias for results returned by schemadump crates.
pub type Result<T> = std::result::Result<T, Error>;
