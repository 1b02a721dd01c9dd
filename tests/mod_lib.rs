use std::fs;
use tempfile::tempdir;
use viewbench::config::BenchConfig;
use viewbench::errors::BenchError;

#[test]
fn run_reports_two_lines() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("mcc.json");
    fs::write(
        &input,
        r#"[
            {"mcc_cdc": {"sequence": 1000, "update_type": "u", "object_type": "o"}},
            {"foo": 1},
            {"mcc_cdc": {"sequence": 2000, "update_type": "d", "object_type": "o"},
             "contentType": {"source": "feed"}}
        ]"#,
    )
    .unwrap();
    let cfg = BenchConfig { input: Some(input), target: Some(10), ..Default::default() };
    let mut out: Vec<u8> = Vec::new();
    let report = viewbench::run(&cfg, &mut out).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.repeat, 4);
    assert_eq!(report.emitted, 8);

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Processing 3 rows 4 times each"));
    let last = lines.next().unwrap();
    assert!(last.starts_with("Emitted 8 rows in "), "{last}");
    assert_eq!(lines.next(), None);
}

#[test]
fn run_fails_on_missing_input() {
    let dir = tempdir().unwrap();
    let cfg = BenchConfig { input: Some(dir.path().join("none.json")), ..Default::default() };
    let mut out: Vec<u8> = Vec::new();
    assert!(matches!(viewbench::run(&cfg, &mut out), Err(BenchError::Io(_))));
    assert!(out.is_empty());
}

#[test]
fn run_fails_on_empty_dataset() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.json");
    fs::write(&input, "[]").unwrap();
    let cfg = BenchConfig { input: Some(input), ..Default::default() };
    assert!(matches!(viewbench::run(&cfg, Vec::<u8>::new()), Err(BenchError::EmptyDataset)));
}

#[test]
fn init_logging_without_destination_is_a_no_op() {
    assert!(viewbench::init_logging(&BenchConfig::default()).is_ok());
}
