use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::ExportConfig;
use crate::consts::{
    DEFAULT_CHUNK_LIMIT, DEFAULT_ORDER_COLUMN, DEFAULT_SCHEMA, OUTPUT_FILE, WORKING_FILE,
};
use crate::metrics;
use crate::runner;

/// Copy the single table of an extract database file into a CSV file.
///
/// Пример:
///   extractcsv ./sample.hyper
///   extractcsv ./sample.hyper --output out.csv --limit 50000 --json
#[derive(Parser, Debug)]
#[command(
    name = "extractcsv",
    version,
    about = "Chunked export of an extract database file into CSV",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Source database file (copied, never modified)
    pub source: PathBuf,

    /// CSV output file (rows are appended)
    #[arg(long, default_value = OUTPUT_FILE)]
    pub output: PathBuf,

    /// Working copy opened by the engine, removed at the end
    #[arg(long, default_value = WORKING_FILE)]
    pub working: PathBuf,

    /// Namespace holding the table
    #[arg(long, default_value = DEFAULT_SCHEMA)]
    pub schema: String,

    /// Export this table instead of the first one in the schema
    #[arg(long)]
    pub table: Option<String>,

    /// Rows per chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_LIMIT, value_parser = clap::value_parser!(u64).range(1..=i64::MAX as u64))]
    pub limit: u64,

    /// Column used for ORDER BY ... DESC paging
    #[arg(long, default_value = DEFAULT_ORDER_COLUMN)]
    pub order_by: String,

    /// ceil(N/limit) steps instead of floor(N/limit)+1
    #[arg(long, default_value_t = false)]
    pub exact_steps: bool,

    /// Keep the working copy on disk
    #[arg(long, default_value_t = false)]
    pub keep_working: bool,

    /// Print a JSON summary (export + metrics) at the end
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    pub fn into_config(self) -> ExportConfig {
        ExportConfig::builder(self.source)
            .output_path(self.output)
            .working_path(self.working)
            .schema(self.schema)
            .table(self.table)
            .limit(self.limit)
            .order_by(self.order_by)
            .exact_steps(self.exact_steps)
            .keep_working(self.keep_working)
            .build()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.json;
    let cfg = cli.into_config();

    let summary = runner::run(&cfg)?;
    if json {
        let out = serde_json::json!({
            "export": summary,
            "metrics": metrics::snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "Exported {} row(s) of {} to {}",
            summary.rows_written,
            summary.table,
            cfg.output_path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::StepPolicy;

    #[test]
    fn positional_only_gives_defaults() {
        let cli = Cli::try_parse_from(["extractcsv", "sample.hyper"]).unwrap();
        let cfg = cli.into_config();
        assert_eq!(cfg.source, PathBuf::from("sample.hyper"));
        assert_eq!(cfg.output_path, PathBuf::from("extract.csv"));
        assert_eq!(cfg.working_path, PathBuf::from("db.hyper"));
        assert_eq!(cfg.limit, 100_000);
        assert_eq!(cfg.step_policy, StepPolicy::Faithful);
    }

    #[test]
    fn flags_override_and_zero_limit_rejected() {
        let cli = Cli::try_parse_from([
            "extractcsv",
            "s.db",
            "--limit",
            "5",
            "--exact-steps",
            "--table",
            "Orders",
            "--order-by",
            "id",
        ])
        .unwrap();
        let cfg = cli.into_config();
        assert_eq!(cfg.limit, 5);
        assert_eq!(cfg.step_policy, StepPolicy::Exact);
        assert_eq!(cfg.table.as_deref(), Some("Orders"));
        assert_eq!(cfg.order_by, "id");

        assert!(Cli::try_parse_from(["extractcsv", "s.db", "--limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["extractcsv"]).is_err());
    }

    #[test]
    fn limit_must_fit_engine_integer() {
        // LIMIT уходит в SQL как знаковое 64-битное число
        let max = i64::MAX.to_string();
        let cli = Cli::try_parse_from(["extractcsv", "s.db", "--limit", max.as_str()]).unwrap();
        assert_eq!(cli.limit, i64::MAX as u64);

        let over = (i64::MAX as u64 + 1).to_string();
        assert!(Cli::try_parse_from(["extractcsv", "s.db", "--limit", over.as_str()]).is_err());
        assert!(
            Cli::try_parse_from(["extractcsv", "s.db", "--limit", "18446744073709551615"]).is_err()
        );
    }
}
