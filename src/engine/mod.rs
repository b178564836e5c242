//! engine: capability set of the embedded database engine.
//!
//! The exporter only needs a handful of operations from the engine:
//! - open the engine, open a connection to one database file (`Engine`);
//! - catalog: list table names of a namespace, read a table definition;
//! - execute a scalar query (-> i64) and a list query (-> rows of `Value`);
//! - close.
//!
//! Backends implement [`Engine`]/[`Connection`]. Connections borrow their
//! engine, so an engine always outlives the connections it handed out.

pub mod names;
pub mod sqlite;
pub mod value;

use std::path::Path;

use crate::error::EngineError;

pub use names::{ColumnDefinition, Name, TableDefinition, TableName};
pub use sqlite::{SqliteConnection, SqliteEngine};
pub use value::Value;

/// One decoded result row (column order = SELECT order).
pub type Row = Vec<Value>;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Engine instance ("process"). Hands out connections to database files.
pub trait Engine {
    type Conn<'e>: Connection
    where
        Self: 'e;

    /// Connect to an existing database file; its tables are visible under `schema`.
    fn connect<'e>(&'e self, database: &Path, schema: &str) -> EngineResult<Self::Conn<'e>>;

    fn close(self) -> EngineResult<()>
    where
        Self: Sized;
}

/// Open connection: catalog + query execution.
pub trait Connection {
    fn table_names(&self, schema: &str) -> EngineResult<Vec<TableName>>;

    fn table_definition(&self, table: &TableName) -> EngineResult<TableDefinition>;

    fn execute_scalar_query(&self, sql: &str) -> EngineResult<i64>;

    fn execute_list_query(&self, sql: &str) -> EngineResult<Vec<Row>>;

    fn close(self) -> EngineResult<()>
    where
        Self: Sized;
}
