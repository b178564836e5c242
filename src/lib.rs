#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod metrics;
pub mod util;

// Движок (трейты + SQLite backend)
pub mod engine;

// Конвейер экспорта
pub mod snapshot;
pub mod lock;
pub mod inspect;
pub mod export;
pub mod sink;
pub mod runner;

pub mod cli;

// Удобные реэкспорты
pub use config::{ExportConfig, ExportConfigBuilder};
pub use engine::{Connection, Engine, SqliteEngine, TableName, Value};
pub use error::{exit_code, EngineError};
pub use export::{copy_table, ChunkPlan, ExportOptions, ExportSummary, StepPolicy};
pub use inspect::{table_columns, table_name};
pub use runner::run;
pub use sink::{CsvSink, RowSink};
pub use snapshot::WorkingCopy;
