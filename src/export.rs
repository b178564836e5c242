//! Chunked export: COUNT(*), then LIMIT/OFFSET pages ordered by a column.
//!
//! Step count follows `floor(N / limit) + 1` by default, so a row count that
//! is an exact multiple of the limit ends with one empty page.
//! [`StepPolicy::Exact`] switches to `ceil(N / limit)`.
//!
//! Pages are ordered by a business column (`kpi_date` by default), not by a
//! row id. If that column has ties across a page boundary rows may be
//! skipped or repeated; the working copy is a static snapshot, nothing else
//! is guarded.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::consts::{DEFAULT_CHUNK_LIMIT, DEFAULT_ORDER_COLUMN};
use crate::engine::{Connection, Name, TableName};
use crate::metrics::{record_chunk, record_scalar_query};
use crate::sink::RowSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicy {
    /// floor(N / limit) + 1
    Faithful,
    /// ceil(N / limit)
    Exact,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub limit: u64,
    pub order_by: String,
    pub step_policy: StepPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_CHUNK_LIMIT,
            order_by: DEFAULT_ORDER_COLUMN.to_string(),
            step_policy: StepPolicy::Faithful,
        }
    }
}

/// Разбиение [0, total_rows) на страницы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    pub total_rows: u64,
    pub limit: u64,
    pub steps: u64,
}

impl ChunkPlan {
    pub fn new(total_rows: u64, limit: u64, policy: StepPolicy) -> Result<Self> {
        if limit == 0 {
            bail!("chunk limit must be > 0");
        }
        let steps = match policy {
            StepPolicy::Faithful => total_rows / limit + 1,
            StepPolicy::Exact => total_rows.div_ceil(limit),
        };
        Ok(Self {
            total_rows,
            limit,
            steps,
        })
    }

    pub fn offsets(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.steps).map(move |s| s * self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub table: String,
    pub total_rows: u64,
    pub limit: u64,
    pub steps: u64,
    pub rows_written: u64,
}

pub fn count_query(table: &TableName) -> String {
    format!("SELECT COUNT(*) FROM {}", table)
}

pub fn chunk_query(table: &TableName, order_by: &str, limit: u64, offset: u64) -> String {
    format!(
        "SELECT * FROM {} ORDER BY {} DESC LIMIT {} OFFSET {};",
        table,
        Name::new(order_by),
        limit,
        offset
    )
}

/// Stream every row of `table` into `sink`, page by page.
pub fn copy_table<C, S>(
    conn: &C,
    table: &TableName,
    sink: &mut S,
    opts: &ExportOptions,
) -> Result<ExportSummary>
where
    C: Connection,
    S: RowSink + ?Sized,
{
    let count = conn
        .execute_scalar_query(&count_query(table))
        .with_context(|| format!("count rows of {}", table))?;
    record_scalar_query();
    let total_rows = u64::try_from(count).unwrap_or(0);

    let plan = ChunkPlan::new(total_rows, opts.limit, opts.step_policy)?;
    println!(
        "Counting {} rows, being copied in chunks of {} in {} steps",
        plan.total_rows, plan.limit, plan.steps
    );
    info!(
        "export: table={}, rows={}, limit={}, steps={}",
        table, plan.total_rows, plan.limit, plan.steps
    );

    let mut rows_written: u64 = 0;
    for (step, offset) in plan.offsets().enumerate() {
        println!("Copying chunk {} of {}", step + 1, plan.steps);
        let sql = chunk_query(table, &opts.order_by, plan.limit, offset);
        let rows = conn
            .execute_list_query(&sql)
            .with_context(|| format!("read chunk {} (offset {}) of {}", step + 1, offset, table))?;
        record_chunk(rows.len());
        debug!("export: chunk {} -> {} row(s)", step + 1, rows.len());

        for row in rows {
            let fields: Vec<String> = row.iter().map(|v| v.to_field()).collect();
            sink.write_row(&fields)?;
            rows_written += 1;
        }
    }

    Ok(ExportSummary {
        table: table.to_string(),
        total_rows: plan.total_rows,
        limit: plan.limit,
        steps: plan.steps,
        rows_written,
    })
}
