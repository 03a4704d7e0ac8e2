use crate::report::{Column, TableReport};

/// Title line of the document.
const TITLE: &str = "СТРУКТУРА БАЗЫ ДАННЫХ";

/// Width of the `=` / `-` banner lines.
const BANNER_WIDTH: usize = 50;

fn banner(ch: char) -> String {
    ch.to_string().repeat(BANNER_WIDTH)
}

/// Serialize table reports into the final text document.
///
/// Reports are emitted in input order, one block per report; a failed table
/// contributes an error block instead of data sections, so the block count
/// always equals the report count. The exact token layout is load-bearing:
/// consumers diff these files, and empty tokens keep their field position
/// (doubled spaces included).
pub fn render_document(reports: &[TableReport]) -> String {
    let mut doc = String::new();

    doc.push_str(TITLE);
    doc.push('\n');
    doc.push_str(&banner('='));
    doc.push_str("\n\n");

    for report in reports {
        match &report.error {
            Some(error) => {
                doc.push_str(&format!(
                    "Ошибка при обработке таблицы {}: {error}\n\n",
                    report.name
                ));
            }
            None => render_table(&mut doc, report),
        }

        doc.push_str(&banner('='));
        doc.push_str("\n\n");
    }

    doc
}

fn render_table(doc: &mut String, report: &TableReport) {
    doc.push_str(&format!("ТАБЛИЦА: {}\n", report.name));
    doc.push_str(&banner('-'));
    doc.push_str("\n\n");

    doc.push_str("Колонки:\n");
    for column in &report.columns {
        doc.push_str(&column_line(column));
    }
    doc.push('\n');

    if !report.foreign_keys.is_empty() {
        doc.push_str("Внешние ключи:\n");
        for fk in &report.foreign_keys {
            doc.push_str(&format!(
                "  {}: {}.{} -> {}.{}\n",
                fk.constraint, report.name, fk.column, fk.referenced_table, fk.referenced_column
            ));
        }
        doc.push('\n');
    }

    if !report.indexes.is_empty() {
        doc.push_str("Индексы:\n");
        for index in &report.indexes {
            let unique = if index.is_unique { "UNIQUE" } else { "" };
            doc.push_str(&format!(
                "  {} {unique}: ({})\n",
                index.name,
                index.columns.join(", ")
            ));
        }
        doc.push('\n');
    }

    doc.push_str("SQL создания таблицы:\n");
    doc.push_str(&format!("{};\n\n", report.create_statement));
}

/// One column line: name, type, nullability token, key token, optional
/// `DEFAULT <value>`, extra attribute. Tokens are single-space joined and
/// empty tokens still occupy their position.
fn column_line(column: &Column) -> String {
    let nullable = if column.is_nullable { "NULL" } else { "NOT NULL" };
    let default = match &column.default {
        Some(value) => format!("DEFAULT {value}"),
        None => String::new(),
    };
    let extra = column.extra.as_deref().unwrap_or("");

    format!(
        "  {} {} {} {} {} {}\n",
        column.name,
        column.data_type,
        nullable,
        column.key.as_str(),
        default,
        extra
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::KeyRole;

    #[test]
    fn column_line_keeps_empty_token_positions() {
        let column = Column {
            name: "id".to_string(),
            data_type: "int".to_string(),
            is_nullable: false,
            key: KeyRole::Primary,
            default: None,
            extra: None,
        };
        assert_eq!(column_line(&column), "  id int NOT NULL PRI  \n");
    }

    #[test]
    fn default_token_is_omitted_not_empty() {
        let column = Column {
            name: "status".to_string(),
            data_type: "varchar(32)".to_string(),
            is_nullable: true,
            key: KeyRole::None,
            default: Some("active".to_string()),
            extra: None,
        };
        assert_eq!(
            column_line(&column),
            "  status varchar(32) NULL  DEFAULT active \n"
        );
    }
}
