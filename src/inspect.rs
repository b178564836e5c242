//! Catalog inspection: pick the export table, read its columns.

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};

use crate::engine::{Connection, TableName};

/// Имя таблицы для экспорта из пространства имён `schema`.
///
/// Zero tables is a plain (non-engine) error. With several tables the
/// lexicographically smallest name wins and the rest are reported.
pub fn table_name<C: Connection>(conn: &C, schema: &str) -> Result<TableName> {
    let mut names = conn
        .table_names(schema)
        .with_context(|| format!("list tables of schema '{}'", schema))?;

    if names.is_empty() {
        return Err(anyhow!("Tables for schema '{}' not found", schema));
    }

    names.sort();
    let chosen = names.remove(0);
    if !names.is_empty() {
        let rest: Vec<String> = names.iter().map(|t| t.to_string()).collect();
        warn!(
            "schema '{}' has {} tables; exporting {}, ignoring {}",
            schema,
            rest.len() + 1,
            chosen,
            rest.join(", ")
        );
    }
    info!("export table: {}", chosen);
    Ok(chosen)
}

/// Resolve an explicitly requested table against the catalog listing.
pub fn find_table<C: Connection>(conn: &C, schema: &str, table: &str) -> Result<TableName> {
    let names = conn
        .table_names(schema)
        .with_context(|| format!("list tables of schema '{}'", schema))?;
    names
        .into_iter()
        .find(|t| t.name.unescaped() == table)
        .ok_or_else(|| anyhow!("Table '{}' not found in schema '{}'", table, schema))
}

/// Ordered, unescaped column names of `table`.
///
/// Prints `name: type` per column. An engine error is printed and logged and
/// yields `None`, which is not the same as an empty column list.
pub fn table_columns<C: Connection>(conn: &C, table: &TableName) -> Option<Vec<String>> {
    match conn.table_definition(table) {
        Ok(def) => {
            for col in &def.columns {
                println!("{}: {}", col.name, col.sql_type);
            }
            Some(def.column_names())
        }
        Err(e) => {
            println!("{}", e);
            error!("table definition for {} failed: {}", table, e);
            None
        }
    }
}
