//! Database introspection adapters.

pub mod adapter;
pub mod mysql;
pub mod options;

pub use adapter::Adapter;
pub use mysql::{describe_database, inspect_table, MySqlAdapter};
pub use options::IntrospectOptions;

pub use schemadump_core::TableReport;
