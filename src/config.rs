//! Centralized configuration and builder for an export run.
//!
//! All paths are explicit values; defaults reproduce the classic behavior:
//! - working copy `db.hyper` and output `extract.csv` in the current directory
//! - schema `Extract`, first table (lexicographic) in it
//! - pages of 100000 rows ordered by `kpi_date` DESC
//! - floor(N / limit) + 1 steps (trailing empty page on exact multiples)

use std::fmt;
use std::path::PathBuf;

use crate::consts::{
    DEFAULT_CHUNK_LIMIT, DEFAULT_ORDER_COLUMN, DEFAULT_SCHEMA, OUTPUT_FILE, WORKING_FILE,
};
use crate::export::{ExportOptions, StepPolicy};

#[derive(Clone, Debug)]
pub struct ExportConfig {
    /// Source database file (read-only, only copied).
    pub source: PathBuf,

    /// Working copy the engine opens. Deleted at the end unless keep_working.
    pub working_path: PathBuf,

    /// CSV output (append mode).
    pub output_path: PathBuf,

    /// Namespace to look the table up in.
    pub schema: String,

    /// Explicit table name; None = first table of the schema.
    pub table: Option<String>,

    /// Rows per page (> 0).
    pub limit: u64,

    /// Column for ORDER BY ... DESC.
    pub order_by: String,

    pub step_policy: StepPolicy,

    /// Do not delete the working copy (debugging).
    pub keep_working: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            working_path: PathBuf::from(WORKING_FILE),
            output_path: PathBuf::from(OUTPUT_FILE),
            schema: DEFAULT_SCHEMA.to_string(),
            table: None,
            limit: DEFAULT_CHUNK_LIMIT,
            order_by: DEFAULT_ORDER_COLUMN.to_string(),
            step_policy: StepPolicy::Faithful,
            keep_working: false,
        }
    }
}

impl ExportConfig {
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn builder<P: Into<PathBuf>>(source: P) -> ExportConfigBuilder {
        ExportConfigBuilder::new(source)
    }

    pub fn with_working_path<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.working_path = p.into();
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.output_path = p.into();
        self
    }

    pub fn with_schema<S: Into<String>>(mut self, schema: S) -> Self {
        self.schema = schema.into();
        self
    }

    pub fn with_table<S: Into<String>>(mut self, table: Option<S>) -> Self {
        self.table = table.map(Into::into);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_order_by<S: Into<String>>(mut self, col: S) -> Self {
        self.order_by = col.into();
        self
    }

    pub fn with_step_policy(mut self, policy: StepPolicy) -> Self {
        self.step_policy = policy;
        self
    }

    pub fn with_keep_working(mut self, on: bool) -> Self {
        self.keep_working = on;
        self
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            limit: self.limit,
            order_by: self.order_by.clone(),
            step_policy: self.step_policy,
        }
    }
}

impl fmt::Display for ExportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExportConfig {{ \
             source: {}, \
             working_path: {}, \
             output_path: {}, \
             schema: {}, \
             table: {}, \
             limit: {}, \
             order_by: {}, \
             step_policy: {:?}, \
             keep_working: {} \
             }}",
            self.source.display(),
            self.working_path.display(),
            self.output_path.display(),
            self.schema,
            self.table.as_deref().unwrap_or("default(first in schema)"),
            self.limit,
            self.order_by,
            self.step_policy,
            self.keep_working,
        )
    }
}

/// Lightweight builder that produces an ExportConfig.
#[derive(Clone, Debug)]
pub struct ExportConfigBuilder {
    cfg: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            cfg: ExportConfig::new(source),
        }
    }

    pub fn working_path<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.cfg.working_path = p.into();
        self
    }

    pub fn output_path<P: Into<PathBuf>>(mut self, p: P) -> Self {
        self.cfg.output_path = p.into();
        self
    }

    pub fn schema<S: Into<String>>(mut self, schema: S) -> Self {
        self.cfg.schema = schema.into();
        self
    }

    pub fn table<S: Into<String>>(mut self, table: Option<S>) -> Self {
        self.cfg.table = table.map(Into::into);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.cfg.limit = limit;
        self
    }

    pub fn order_by<S: Into<String>>(mut self, col: S) -> Self {
        self.cfg.order_by = col.into();
        self
    }

    pub fn exact_steps(mut self, on: bool) -> Self {
        self.cfg.step_policy = if on {
            StepPolicy::Exact
        } else {
            StepPolicy::Faithful
        };
        self
    }

    pub fn keep_working(mut self, on: bool) -> Self {
        self.cfg.keep_working = on;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> ExportConfig {
        self.cfg
    }
}
