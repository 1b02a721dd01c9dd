use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use viewbench::config::{BenchConfig, DEFAULT_INPUT};
use viewbench::driver::DEFAULT_TARGET;
use viewbench::errors::BenchError;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |k: &str| map.get(k).cloned()
}

#[test]
fn defaults_match_reference_run() {
    let cfg = BenchConfig::default();
    assert_eq!(cfg.input_path(), PathBuf::from(DEFAULT_INPUT));
    assert_eq!(cfg.target(), DEFAULT_TARGET);
    assert_eq!(DEFAULT_TARGET, 12_339_702);
}

#[test]
fn parses_toml() {
    let cfg = BenchConfig::from_toml_str(
        "input = \"data/sample.json\"\ntarget = 100\nlog_level = \"debug\"\n",
    )
    .unwrap();
    assert_eq!(cfg.input, Some(PathBuf::from("data/sample.json")));
    assert_eq!(cfg.target(), 100);
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    assert!(cfg.log_dir.is_none());
}

#[test]
fn env_overrides_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.toml");
    fs::write(&path, "input = \"from_file.json\"\ntarget = 10\n").unwrap();
    let cfg =
        BenchConfig::load(Some(path.as_path()), env_of(&[("VIEWBENCH_TARGET", "42")])).unwrap();
    assert_eq!(cfg.target(), 42);
    assert_eq!(cfg.input_path(), PathBuf::from("from_file.json"));
}

#[test]
fn config_path_from_env() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("env.toml");
    fs::write(&path, "target = 7\n").unwrap();
    let p = path.to_string_lossy().to_string();
    let cfg = BenchConfig::load(None, env_of(&[("VIEWBENCH_CONFIG", p.as_str())])).unwrap();
    assert_eq!(cfg.target(), 7);
}

#[test]
fn cli_values_win() {
    let file = BenchConfig { target: Some(10), input: Some("a.json".into()), ..Default::default() };
    let cli = BenchConfig { target: Some(99), ..Default::default() };
    let cfg = cli.or(file);
    assert_eq!(cfg.target(), 99);
    assert_eq!(cfg.input_path(), PathBuf::from("a.json"));
}

#[test]
fn bad_env_target_is_config_error() {
    let err = BenchConfig::from_env(env_of(&[("VIEWBENCH_TARGET", "lots")])).unwrap_err();
    assert!(matches!(err, BenchError::Config(msg) if msg.contains("VIEWBENCH_TARGET")));
}

#[test]
fn missing_explicit_file_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(matches!(BenchConfig::load(Some(path.as_path()), env_of(&[])), Err(BenchError::Config(_))));
}

#[test]
fn malformed_file_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "target = \"many\"\n").unwrap();
    assert!(matches!(BenchConfig::from_file(&path), Err(BenchError::Config(_))));
}
