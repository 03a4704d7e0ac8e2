/// Options that control how introspection behaves.
#[derive(Debug, Clone)]
pub struct IntrospectOptions {
    /// Include views in the table enumeration. On by default: the report
    /// covers everything the catalog lists for the connected schema.
    pub include_views: bool,
}

impl Default for IntrospectOptions {
    fn default() -> Self {
        Self {
            include_views: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enumeration_includes_views() {
        assert!(IntrospectOptions::default().include_views);
    }
}
