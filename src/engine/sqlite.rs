//! SQLite backend (bundled libsqlite3 via rusqlite).
//!
//! Namespace mapping: a database file is attached to an in-memory connection
//! under the requested schema alias, so `"Extract"."Orders"` addresses table
//! `Orders` of the file. Schema `main` opens the file directly.

use log::debug;
use rusqlite::params;
use std::marker::PhantomData;
use std::path::Path;

use super::{
    Connection, ColumnDefinition, Engine, EngineResult, Name, Row, TableDefinition, TableName,
    Value,
};
use crate::error::EngineError;

/// In-process engine handle. Connections borrow it.
#[derive(Debug)]
pub struct SqliteEngine {
    version: &'static str,
}

impl SqliteEngine {
    pub fn start() -> EngineResult<Self> {
        let version = rusqlite::version();
        debug!("engine: sqlite {} started", version);
        Ok(Self { version })
    }
}

impl Engine for SqliteEngine {
    type Conn<'e> = SqliteConnection<'e>;

    fn connect<'e>(&'e self, database: &Path, schema: &str) -> EngineResult<SqliteConnection<'e>> {
        // ATTACH молча создаёт пустой файл, если его нет: проверяем заранее.
        if !database.is_file() {
            return Err(EngineError::new(format!(
                "database file {} does not exist",
                database.display()
            )));
        }
        let db_str = database.to_str().ok_or_else(|| {
            EngineError::new(format!("non UTF-8 database path {}", database.display()))
        })?;

        let conn = if schema.eq_ignore_ascii_case("main") {
            rusqlite::Connection::open(database)
                .map_err(|e| EngineError::with_source(format!("open {}", db_str), e))?
        } else {
            let conn = rusqlite::Connection::open_in_memory()
                .map_err(|e| EngineError::with_source("open in-memory connection", e))?;
            conn.execute("ATTACH DATABASE ?1 AS ?2", params![db_str, schema])
                .map_err(|e| {
                    EngineError::with_source(format!("attach {} as '{}'", db_str, schema), e)
                })?;
            conn
        };
        debug!("engine: connected to {} as schema '{}'", db_str, schema);

        Ok(SqliteConnection {
            conn,
            _engine: PhantomData,
        })
    }

    fn close(self) -> EngineResult<()> {
        debug!("engine: sqlite {} closed", self.version);
        Ok(())
    }
}

/// Connection bound to the lifetime of the engine that opened it.
pub struct SqliteConnection<'e> {
    conn: rusqlite::Connection,
    _engine: PhantomData<&'e SqliteEngine>,
}

impl Connection for SqliteConnection<'_> {
    fn table_names(&self, schema: &str) -> EngineResult<Vec<TableName>> {
        let sql = format!(
            "SELECT name FROM {}.sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            Name::new(schema)
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| EngineError::with_source(format!("list tables of '{}'", schema), e))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names
            .into_iter()
            .map(|n| TableName::new(schema, n.as_str()))
            .collect())
    }

    fn table_definition(&self, table: &TableName) -> EngineResult<TableDefinition> {
        let mut stmt = self.conn.prepare(
            "SELECT name, type, \"notnull\" FROM pragma_table_info(?1, ?2) ORDER BY cid",
        )?;
        let columns = stmt
            .query_map(
                params![table.name.unescaped(), table.schema.unescaped()],
                |row| {
                    let name: String = row.get(0)?;
                    let sql_type: String = row.get(1)?;
                    let not_null: i64 = row.get(2)?;
                    Ok(ColumnDefinition {
                        name: Name::new(name),
                        sql_type,
                        nullable: not_null == 0,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;

        // pragma_table_info для несуществующей таблицы возвращает пустой набор.
        if columns.is_empty() {
            return Err(EngineError::new(format!("table {} does not exist", table)));
        }
        Ok(TableDefinition {
            table: table.clone(),
            columns,
        })
    }

    fn execute_scalar_query(&self, sql: &str) -> EngineResult<i64> {
        debug!("engine: scalar query: {}", sql);
        self.conn
            .query_row(sql, [], |row| row.get::<_, i64>(0))
            .map_err(|e| EngineError::with_source(format!("query failed: {}", sql), e))
    }

    fn execute_list_query(&self, sql: &str) -> EngineResult<Vec<Row>> {
        debug!("engine: list query: {}", sql);
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| EngineError::with_source(format!("query failed: {}", sql), e))?;
        let width = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(width);
            for i in 0..width {
                values.push(Value::from(row.get_ref(i)?));
            }
            out.push(values);
        }
        Ok(out)
    }

    fn close(self) -> EngineResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| EngineError::with_source("close connection", e))
    }
}
