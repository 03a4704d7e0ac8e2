use async_trait::async_trait;

use schemadump_core::{Result, TableReport};

use crate::options::IntrospectOptions;

/// Trait implemented by database adapters that can describe their tables.
#[async_trait]
pub trait Adapter {
    /// Returns the engine identifier (e.g. `mysql`).
    fn engine(&self) -> &'static str;

    /// Produce one report per table visible in the connected schema.
    async fn describe(&self, opts: &IntrospectOptions) -> Result<Vec<TableReport>>;
}
