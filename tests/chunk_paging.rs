// tests/chunk_paging.rs
//
// Пагинация на реальном движке с маленьким limit:
// - ровно limit строк -> 2 шага, второй пустой;
// - перемешанная вставка, 37 строк / limit 5 -> 8 шагов, все строки, порядок DESC.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use oorandom::Rand64;

use ExtractCsv::engine::{Connection, Engine, SqliteEngine, TableName};
use ExtractCsv::{copy_table, run, ExportConfig, ExportOptions, StepPolicy};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base = std::env::temp_dir();
    base.join(format!("xcsvtest-paging-{prefix}-{pid}-{t}-{id}"))
}

/// Таблица Extract(id, kpi_date) с n строками, kpi_date уникальны; порядок вставки случайный.
fn create_dated_source(path: &Path, n: u32, seed: u128) -> Result<()> {
    let mut ids: Vec<u32> = (0..n).collect();
    let mut rng = Rand64::new(seed);
    for i in (1..ids.len()).rev() {
        let j = rng.rand_range(0..(i as u64 + 1)) as usize;
        ids.swap(i, j);
    }

    let mut conn = rusqlite::Connection::open(path)?;
    conn.execute_batch(r#"CREATE TABLE "Extract" (id INTEGER, kpi_date TEXT);"#)?;
    let tx = conn.transaction()?;
    for id in ids {
        tx.execute(
            r#"INSERT INTO "Extract" VALUES (?1, ?2)"#,
            rusqlite::params![id, format!("2024-{:06}", id)],
        )?;
    }
    tx.commit()?;
    Ok(())
}

#[test]
fn exactly_limit_rows_gives_trailing_empty_step() -> Result<()> {
    let root = unique_root("exact");
    fs::create_dir_all(&root)?;
    let db = root.join("src.db");
    create_dated_source(&db, 4, 7)?;

    let engine = SqliteEngine::start()?;
    let conn = engine.connect(&db, "Extract")?;
    let table = TableName::new("Extract", "Extract");
    let mut rows: Vec<Vec<String>> = Vec::new();
    let opts = ExportOptions {
        limit: 4,
        ..ExportOptions::default()
    };
    let summary = copy_table(&conn, &table, &mut rows, &opts)?;

    assert_eq!(summary.steps, 2);
    assert_eq!(summary.rows_written, 4);
    assert_eq!(rows.len(), 4);
    conn.close()?;
    engine.close()?;
    Ok(())
}

#[test]
fn shuffled_rows_come_out_complete_and_descending() -> Result<()> {
    let root = unique_root("shuffled");
    fs::create_dir_all(&root)?;
    let src = root.join("src.hyper");
    create_dated_source(&src, 37, 0xDEADBEEF)?;

    let cfg = ExportConfig::builder(&src)
        .working_path(root.join("db.hyper"))
        .output_path(root.join("extract.csv"))
        .limit(5)
        .build();
    let summary = run(&cfg)?;
    assert_eq!(summary.steps, 8);
    assert_eq!(summary.rows_written, 37);

    let text = fs::read_to_string(&cfg.output_path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 38);
    assert_eq!(lines[0], "id,kpi_date");

    let ids: Vec<u32> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap_or("").parse().unwrap_or(u32::MAX))
        .collect();
    let expected: Vec<u32> = (0..37).rev().collect();
    assert_eq!(ids, expected);
    Ok(())
}

#[test]
fn exact_policy_on_real_engine() -> Result<()> {
    let root = unique_root("exact-policy");
    fs::create_dir_all(&root)?;
    let src = root.join("src.hyper");
    create_dated_source(&src, 10, 1)?;

    let cfg = ExportConfig::new(&src)
        .with_working_path(root.join("db.hyper"))
        .with_output_path(root.join("extract.csv"))
        .with_limit(5)
        .with_step_policy(StepPolicy::Exact);
    let summary = run(&cfg)?;
    assert_eq!(summary.steps, 2);
    assert_eq!(summary.rows_written, 10);
    Ok(())
}

#[test]
fn empty_table_writes_header_only() -> Result<()> {
    let root = unique_root("empty");
    fs::create_dir_all(&root)?;
    let src = root.join("src.hyper");
    create_dated_source(&src, 0, 1)?;

    let cfg = ExportConfig::new(&src)
        .with_working_path(root.join("db.hyper"))
        .with_output_path(root.join("extract.csv"));
    let summary = run(&cfg)?;
    assert_eq!(summary.total_rows, 0);
    assert_eq!(summary.steps, 1);
    assert_eq!(fs::read_to_string(&cfg.output_path)?, "id,kpi_date\r\n");
    Ok(())
}
