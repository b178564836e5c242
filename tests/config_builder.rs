use std::path::PathBuf;

use anyhow::Result;

use ExtractCsv::config::{ExportConfig, ExportConfigBuilder};
use ExtractCsv::StepPolicy;

#[test]
fn builder_overrides_every_field() -> Result<()> {
    let cfg = ExportConfigBuilder::new("in/sample.hyper")
        .working_path("tmp/work.hyper")
        .output_path("out/sample.csv")
        .schema("public")
        .table(Some("Orders"))
        .limit(250)
        .order_by("created_at")
        .exact_steps(true)
        .keep_working(true)
        .build();

    assert_eq!(cfg.source, PathBuf::from("in/sample.hyper"));
    assert_eq!(cfg.working_path, PathBuf::from("tmp/work.hyper"));
    assert_eq!(cfg.output_path, PathBuf::from("out/sample.csv"));
    assert_eq!(cfg.schema, "public");
    assert_eq!(cfg.table.as_deref(), Some("Orders"));
    assert_eq!(cfg.step_policy, StepPolicy::Exact);
    assert!(cfg.keep_working);

    // Параметры пагинации уходят в экспортёр как есть
    let opts = cfg.export_options();
    assert_eq!(opts.limit, 250);
    assert_eq!(opts.order_by, "created_at");
    assert_eq!(opts.step_policy, StepPolicy::Exact);
    Ok(())
}

#[test]
fn display_mentions_defaults() {
    let s = ExportConfig::new("a.hyper").to_string();
    assert!(s.contains("working_path: db.hyper"), "{s}");
    assert!(s.contains("output_path: extract.csv"), "{s}");
    assert!(s.contains("table: default(first in schema)"), "{s}");
    assert!(s.contains("step_policy: Faithful"), "{s}");
}
