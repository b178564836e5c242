//! Top-level orchestration of one export run.
//!
//! lock -> working copy -> engine -> connection -> table -> columns -> header
//! -> chunks -> close connection -> close engine -> delete working copy.
//!
//! Engine and connection are released on every exit path (Drop); the
//! working copy as well, through its guard.

use anyhow::{Context, Result};
use log::info;

use crate::config::ExportConfig;
use crate::engine::{Connection, Engine, SqliteEngine};
use crate::error::EngineError;
use crate::export::{copy_table, ExportSummary};
use crate::inspect::{find_table, table_columns, table_name};
use crate::lock::try_lock_working;
use crate::sink::CsvSink;
use crate::snapshot::WorkingCopy;

pub fn run(cfg: &ExportConfig) -> Result<ExportSummary> {
    let engine = SqliteEngine::start().context("start engine")?;
    run_with_engine(cfg, engine)
}

/// Same as [`run`] with a caller-provided engine.
pub fn run_with_engine<E: Engine>(cfg: &ExportConfig, engine: E) -> Result<ExportSummary> {
    info!("export: {}", cfg);
    let _lock = try_lock_working(&cfg.working_path)?;
    let working = WorkingCopy::prepare(&cfg.source, &cfg.working_path)?;

    let summary = {
        let conn = engine
            .connect(working.path(), &cfg.schema)
            .with_context(|| format!("connect to {}", working.path().display()))?;
        let summary = export_with(&conn, cfg)?;
        conn.close().context("close connection")?;
        summary
    };
    engine.close().context("close engine")?;

    if cfg.keep_working {
        working.keep();
    } else {
        working.finish()?;
    }
    info!(
        "export: done, {} row(s) of {} -> {}",
        summary.rows_written,
        summary.table,
        cfg.output_path.display()
    );
    Ok(summary)
}

/// Inspect + header + chunks over an open connection.
pub fn export_with<C: Connection>(conn: &C, cfg: &ExportConfig) -> Result<ExportSummary> {
    let table = match cfg.table.as_deref() {
        Some(name) => find_table(conn, &cfg.schema, name)?,
        None => table_name(conn, &cfg.schema)?,
    };

    // None (ошибка движка) не превращаем в пустой заголовок: прерываем запуск.
    let columns = table_columns(conn, &table)
        .ok_or_else(|| EngineError::new(format!("could not read columns of {}", table)))?;

    let mut sink = CsvSink::new(&cfg.output_path);
    sink.append_row(&columns)?;
    copy_table(conn, &table, &mut sink, &cfg.export_options())
}
