//! Lightweight global metrics for the exporter.
//!
//! Потокобезопасные атомарные счётчики:
//! - scalar queries issued against the engine (row counts)
//! - chunks read / rows exported (one list query per chunk)
//! - CSV rows written (header included)

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static SCALAR_QUERIES: AtomicU64 = AtomicU64::new(0);
static CHUNKS_READ: AtomicU64 = AtomicU64::new(0);
static ROWS_EXPORTED: AtomicU64 = AtomicU64::new(0);
static CSV_ROWS_WRITTEN: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub scalar_queries: u64,
    pub chunks_read: u64,
    pub rows_exported: u64,
    pub csv_rows_written: u64,
}

pub fn record_scalar_query() {
    SCALAR_QUERIES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_chunk(rows: usize) {
    CHUNKS_READ.fetch_add(1, Ordering::Relaxed);
    ROWS_EXPORTED.fetch_add(rows as u64, Ordering::Relaxed);
}

pub fn record_csv_row() {
    CSV_ROWS_WRITTEN.fetch_add(1, Ordering::Relaxed);
}

pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        scalar_queries: SCALAR_QUERIES.load(Ordering::Relaxed),
        chunks_read: CHUNKS_READ.load(Ordering::Relaxed),
        rows_exported: ROWS_EXPORTED.load(Ordering::Relaxed),
        csv_rows_written: CSV_ROWS_WRITTEN.load(Ordering::Relaxed),
    }
}
