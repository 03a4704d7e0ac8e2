use crate::error::Error;

/// Role a column plays in the table's keys, as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyRole {
    #[default]
    None,
    Primary,
    Unique,
    Multiple,
}

impl KeyRole {
    /// Parse the catalog's key token. Unknown tokens map to `None`.
    pub fn parse(token: &str) -> Self {
        match token {
            "PRI" => KeyRole::Primary,
            "UNI" => KeyRole::Unique,
            "MUL" => KeyRole::Multiple,
            _ => KeyRole::None,
        }
    }

    /// The exact token the catalog uses, empty for no key role.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyRole::None => "",
            KeyRole::Primary => "PRI",
            KeyRole::Unique => "UNI",
            KeyRole::Multiple => "MUL",
        }
    }
}

/// Column metadata in catalog-declared order.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub key: KeyRole,
    pub default: Option<String>,
    pub extra: Option<String>,
}

/// One foreign-key column. A multi-column constraint produces several
/// records sharing a constraint name.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: String,
    pub constraint: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

/// Grouped representation of one named index and its ordered columns.
#[derive(Debug, Clone)]
pub struct IndexDescriptor {
    pub name: String,
    pub is_unique: bool,
    pub columns: Vec<String>,
}

/// Everything the report knows about one table.
///
/// When `error` is set the data fields are empty and must not be trusted;
/// the renderer emits an error block instead of data sections.
#[derive(Debug)]
pub struct TableReport {
    pub name: String,
    pub columns: Vec<Column>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<IndexDescriptor>,
    pub create_statement: String,
    pub error: Option<Error>,
}

impl TableReport {
    /// A report for a table whose introspection failed.
    pub fn failed(name: impl Into<String>, error: Error) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            create_statement: String::new(),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_role_round_trips_catalog_tokens() {
        for token in ["PRI", "UNI", "MUL", ""] {
            assert_eq!(KeyRole::parse(token).as_str(), token);
        }
    }

    #[test]
    fn unknown_key_token_is_no_role() {
        assert_eq!(KeyRole::parse("SPATIAL"), KeyRole::None);
    }
}
