use std::fs;

use super::*;
use crate::error::PrecRecError;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("kira_precrec_main_{}_{}", tag, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(table: PathBuf, out_dir: PathBuf) -> RunConfig {
    RunConfig {
        table,
        title: "test_plot".to_string(),
        save: false,
        out_dir,
        json_path: None,
    }
}

#[test]
fn test_cli_required_args() {
    let cli = Cli::try_parse_from(["kira-precrec", "--table", "t.tsv", "--title", "SVIM"]).unwrap();
    let config = RunConfig::from(cli);
    assert_eq!(config.table, PathBuf::from("t.tsv"));
    assert_eq!(config.title, "SVIM");
    assert!(config.save);
    assert_eq!(config.out_dir, PathBuf::from("."));
    assert!(config.json_path.is_none());
}

#[test]
fn test_cli_missing_title_fails() {
    assert!(Cli::try_parse_from(["kira-precrec", "--table", "t.tsv"]).is_err());
}

#[test]
fn test_cli_optional_flags() {
    let cli = Cli::try_parse_from([
        "kira-precrec",
        "--table",
        "t.tsv",
        "--title",
        "SVIM",
        "--no-save",
        "--out-dir",
        "plots",
        "--json",
        "best.json",
    ])
    .unwrap();
    let config = RunConfig::from(cli);
    assert!(!config.save);
    assert_eq!(config.out_dir, PathBuf::from("plots"));
    assert_eq!(config.json_path, Some(PathBuf::from("best.json")));
}

#[test]
fn test_resolve_output_dir_default() {
    assert_eq!(resolve_output_dir(None), PathBuf::from("."));
    assert_eq!(
        resolve_output_dir(Some(Path::new("/tmp/out"))),
        PathBuf::from("/tmp/out")
    );
}

#[test]
fn test_run_empty_input_fails_without_plot() {
    let dir = temp_dir("empty");
    let table = dir.join("empty.tsv");
    fs::write(&table, "").unwrap();
    let mut cfg = config(table, dir.clone());
    cfg.save = true;
    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, PrecRecError::EmptyInput));
    assert!(!dir.join("test_plot.png").exists());
}

#[test]
fn test_run_short_line_fails_without_plot() {
    let dir = temp_dir("short");
    let table = dir.join("short.tsv");
    fs::write(&table, "Q1\t0.5\t0.8\n").unwrap();
    let mut cfg = config(table, dir.clone());
    cfg.save = true;
    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, PrecRecError::Parse { line: 1, .. }));
    assert!(!dir.join("test_plot.png").exists());
}

#[test]
fn test_run_writes_json_summary() {
    let dir = temp_dir("json");
    let table = dir.join("prec_rec.tsv");
    fs::write(&table, "Q1\t0.5\t0.8\t0.61\nQ2\t0.9\t0.4\t0.55\nQ3\t0.7\t0.7\t0.70\n").unwrap();
    let json_path = dir.join("best.json");
    let mut cfg = config(table, dir.clone());
    cfg.json_path = Some(json_path.clone());

    run(&cfg).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["best"]["QC_Score"], "Q3");
    assert_eq!(value["best_index"], 2);
    assert!(value["plot"].is_null());
}
