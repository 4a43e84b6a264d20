use ask_ralph_report::config::ReportConfig;
use ask_ralph_report::core::{GateStatus, Normalizer};
use ask_ralph_report::ingestion::CsvLoader;
use ask_ralph_report::pipeline;
use ask_ralph_report::report::{METRICS_FILE, REPORT_FILE};
use ask_ralph_report::{compute, ReportError};
use std::fs;
use std::path::Path;

const RESULTS_CSV: &str = "\
prompt_id,scenario,faithful,disagreement_type,relevance_score,toxicity_flag,latency_ms,budget_limit,total_price,notes
p1,gift under 100,TRUE,,0.92,0,850,100,89.5,ok
p2,gift under 100,yes,,0.88,0,1200,100,120,over budget
p3,care questions,False,contradiction,0.61,0,2400,,45,
p4,care questions,1,,0.95,0,timeout,80,60,no latency
p5,sizing,no,unsupported,0.70,1,3900,150,140,toxic
p6,sizing,maybe,,not scored,,500,abc,10,garbage values
";

/// Write the fixture into a fresh directory and return both.
fn fixture(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv_path = dir.path().join("ask_ralph_results.csv");
    fs::write(&csv_path, contents).expect("write fixture");
    (dir, csv_path)
}

fn config_for(csv_path: &Path, out_dir: &Path) -> ReportConfig {
    ReportConfig::new(csv_path.to_path_buf(), out_dir.to_path_buf(), 6).expect("config")
}

#[test]
fn test_metrics_from_csv() {
    let (_dir, csv_path) = fixture(RESULTS_CSV);
    let table = CsvLoader::from_path(&csv_path).unwrap().load().unwrap();
    let (records, stats) = Normalizer::normalize(&table);
    let (summary, breakdowns) = compute(&records);

    assert_eq!(summary.n_tests, 6);
    // TRUE, yes, 1 are faithful; "maybe" is not
    assert_eq!(summary.faithful_rate, Some(0.5));
    assert_eq!(summary.contradiction_rate, Some(1.0 / 6.0));
    assert_eq!(summary.unsupported_rate, Some(1.0 / 6.0));
    assert_eq!(summary.toxicity_rate, Some(1.0 / 6.0));
    // only p2 has both amounts present with price over the limit
    assert_eq!(summary.budget_violation_rate, Some(1.0 / 6.0));

    let avg = summary.avg_relevance.unwrap();
    assert!((avg - (0.92 + 0.88 + 0.61 + 0.95 + 0.70) / 5.0).abs() < 1e-12);

    // latencies present: 500, 850, 1200, 2400, 3900
    assert_eq!(summary.p50_latency_ms, Some(1200.0));
    let p95 = summary.p95_latency_ms.unwrap();
    assert!((p95 - 3600.0).abs() < 1e-9, "p95 = {}", p95);

    assert_eq!(stats.unrecognized_faithful, 1);
    assert_eq!(stats.unparsable_numeric.get("latency_ms"), Some(&1));
    assert_eq!(stats.unparsable_numeric.get("relevance_score"), Some(&1));
    assert_eq!(stats.unparsable_numeric.get("budget_limit"), Some(&1));

    let scenarios: Vec<(&str, f64)> = breakdowns
        .faithful_by_scenario
        .iter()
        .map(|g| (g.key.as_str(), g.rate))
        .collect();
    assert_eq!(
        scenarios,
        vec![("gift under 100", 1.0), ("care questions", 0.5), ("sizing", 0.0)]
    );

    let violations = &breakdowns.budget_violation_by_scenario;
    assert_eq!(violations[0].key, "gift under 100");
    assert_eq!(violations[0].rate, 0.5);

    assert_eq!(breakdowns.disagreement_types[0].label, "none");
    assert_eq!(breakdowns.disagreement_types[0].count, 4);
}

#[test]
fn test_pipeline_writes_all_artifacts() {
    let (dir, csv_path) = fixture(RESULTS_CSV);
    let out_dir = dir.path().join("artifacts");
    let config = config_for(&csv_path, &out_dir);

    let outcome = pipeline::run(&config).unwrap();

    assert_eq!(outcome.written.len(), 6);
    for path in &outcome.written {
        assert!(path.exists(), "{} missing", path.display());
        assert!(path.starts_with(&out_dir));
    }

    let statuses: Vec<GateStatus> = outcome
        .document
        .verdicts
        .iter()
        .map(|v| v.status)
        .collect();
    assert!(statuses.iter().all(|s| *s == GateStatus::Fail));
    assert!(!outcome.document.all_pass());

    let report = fs::read_to_string(out_dir.join(REPORT_FILE)).unwrap();
    assert!(report.contains("- Total tests: 6"));
    assert!(report.contains("- Faithfulness rate: 50.0%"));
    assert!(report.contains("- Latency p50 / p95 (ms): 1200 / 3600"));
    assert!(report.contains("- p95 latency < 3000ms → FAIL"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(METRICS_FILE)).unwrap()).unwrap();
    assert_eq!(json["summary"]["n_tests"], 6);
    assert_eq!(json["verdicts"][0]["status"], "FAIL");
    assert_eq!(json["latency_histogram"].as_array().unwrap().len(), 6);
}

#[test]
fn test_empty_results_file() {
    let header = RESULTS_CSV.lines().next().unwrap();
    let (dir, csv_path) = fixture(&format!("{}\n", header));
    let out_dir = dir.path().join("out");

    let outcome = pipeline::run(&config_for(&csv_path, &out_dir)).unwrap();
    let summary = &outcome.document.summary;

    assert_eq!(summary.n_tests, 0);
    assert_eq!(summary.faithful_rate, None);
    assert_eq!(summary.p95_latency_ms, None);
    assert!(outcome
        .document
        .verdicts
        .iter()
        .all(|v| v.status == GateStatus::Fail));

    let report = fs::read_to_string(out_dir.join(REPORT_FILE)).unwrap();
    assert!(report.contains("- Latency p50 / p95 (ms): NA / NA"));
    assert!(report.contains("- Avg relevance score: NA"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(METRICS_FILE)).unwrap()).unwrap();
    assert!(json["summary"]["avg_relevance"].is_null());
}

#[test]
fn test_missing_column_fails_before_writing() {
    let (dir, csv_path) = fixture("scenario,faithful\nA,true\n");
    let out_dir = dir.path().join("out");

    let err = pipeline::run(&config_for(&csv_path, &out_dir)).unwrap_err();

    match err {
        ReportError::MissingColumns(cols) => assert_eq!(cols.len(), 6),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!out_dir.exists());
}
