use schemadump_core::{
    normalize, normalize_required, Column, ForeignKey, IndexDescriptor, KeyRole, Result,
};

use super::queries::{RawColumnRow, RawForeignKeyRow, RawIndexRow};

/// Normalize `DESCRIBE` rows into columns, preserving catalog order.
pub fn map_columns(raw: Vec<RawColumnRow>) -> Result<Vec<Column>> {
    raw.into_iter()
        .map(|row| {
            let null = normalize_required(row.null)?;
            let key = normalize(row.key)?.unwrap_or_default();

            Ok(Column {
                name: normalize_required(row.field)?,
                data_type: normalize_required(row.data_type)?,
                is_nullable: null != "NO",
                key: KeyRole::parse(&key),
                default: normalize(row.default)?,
                extra: normalize(row.extra)?.filter(|extra| !extra.is_empty()),
            })
        })
        .collect()
}

/// Normalize foreign-key rows, preserving catalog order. One record per
/// foreign-key column; a multi-column constraint keeps its shared name.
pub fn map_foreign_keys(raw: Vec<RawForeignKeyRow>) -> Result<Vec<ForeignKey>> {
    raw.into_iter()
        .map(|row| {
            Ok(ForeignKey {
                column: normalize_required(row.column)?,
                constraint: normalize_required(row.constraint)?,
                referenced_table: normalize_required(row.referenced_table)?,
                referenced_column: normalize_required(row.referenced_column)?,
            })
        })
        .collect()
}

/// Collapse flat (index, column) rows into one descriptor per index name.
///
/// Groups keep first-occurrence order, columns keep input order, and the
/// uniqueness flag is read from the first row of each group only.
pub fn group_indexes(raw: Vec<RawIndexRow>) -> Result<Vec<IndexDescriptor>> {
    let mut grouped: Vec<IndexDescriptor> = Vec::new();

    for row in raw {
        let name = normalize_required(row.key_name)?;
        let column = normalize_required(row.column_name)?;

        match grouped.iter_mut().find(|index| index.name == name) {
            Some(index) => index.columns.push(column),
            None => grouped.push(IndexDescriptor {
                name,
                is_unique: row.non_unique == 0,
                columns: vec![column],
            }),
        }
    }

    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use schemadump_core::RawValue;

    use super::*;

    fn text(value: &str) -> RawValue {
        RawValue::Text(value.to_string())
    }

    fn index_row(non_unique: i64, key_name: &str, column_name: &str) -> RawIndexRow {
        RawIndexRow {
            non_unique,
            key_name: text(key_name),
            column_name: text(column_name),
        }
    }

    #[test]
    fn groups_preserve_first_seen_order() {
        let rows = vec![
            index_row(0, "PRIMARY", "id"),
            index_row(1, "idx_name", "last_name"),
            index_row(1, "idx_name", "first_name"),
            index_row(0, "idx_email", "email"),
        ];

        let grouped = group_indexes(rows).unwrap();
        let names: Vec<&str> = grouped.iter().map(|index| index.name.as_str()).collect();
        assert_eq!(names, vec!["PRIMARY", "idx_name", "idx_email"]);
        assert_eq!(grouped[1].columns, vec!["last_name", "first_name"]);
    }

    #[test]
    fn uniqueness_comes_from_first_row_of_group() {
        let rows = vec![
            index_row(0, "idx_mixed", "a"),
            // catalogs should never disagree within a group, but if one does
            // the first row wins
            index_row(1, "idx_mixed", "b"),
        ];

        let grouped = group_indexes(rows).unwrap();
        assert_eq!(grouped.len(), 1);
        assert!(grouped[0].is_unique);
        assert_eq!(grouped[0].columns, vec!["a", "b"]);
    }

    #[test]
    fn maps_describe_rows_with_byte_cells() {
        let rows = vec![RawColumnRow {
            field: RawValue::Bytes(b"email".to_vec()),
            data_type: text("varchar(255)"),
            null: text("NO"),
            key: text("UNI"),
            default: RawValue::Null,
            extra: text(""),
        }];

        let columns = map_columns(rows).unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].name, "email");
        assert!(!columns[0].is_nullable);
        assert_eq!(columns[0].key, KeyRole::Unique);
        assert_eq!(columns[0].default, None);
        assert_eq!(columns[0].extra, None);
    }

    #[test]
    fn nullable_follows_the_no_token() {
        let row = |null: &str| RawColumnRow {
            field: text("c"),
            data_type: text("int"),
            null: text(null),
            key: RawValue::Null,
            default: RawValue::Null,
            extra: RawValue::Null,
        };

        let columns = map_columns(vec![row("NO"), row("YES")]).unwrap();
        assert!(!columns[0].is_nullable);
        assert!(columns[1].is_nullable);
    }

    #[test]
    fn invalid_utf8_cell_fails_the_mapping() {
        let rows = vec![RawColumnRow {
            field: RawValue::Bytes(vec![0xff]),
            data_type: text("int"),
            null: text("NO"),
            key: RawValue::Null,
            default: RawValue::Null,
            extra: RawValue::Null,
        }];

        assert!(map_columns(rows).is_err());
    }
}
