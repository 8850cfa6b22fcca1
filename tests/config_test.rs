//! Integration tests for Settings config loading with layered precedence.
//!
//! These tests pass explicit config files (temp directories only),
//! so no global config on the host is involved.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use mdplan::application::ApplicationError;
use mdplan::config::{local_config_path, OutputFormat, Settings};

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn given_no_config_files_when_load_then_uses_defaults() {
    let settings = Settings::load_from(None, None).expect("load defaults");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let local = write_config(
        &dir,
        ".mdplan.toml",
        r#"
format = "json"
plan_file = "/notes/PLAN.md"
"#,
    );

    let settings = Settings::load_from(None, Some(&local)).expect("load settings");

    assert_eq!(settings.format, OutputFormat::Json);
    assert_eq!(settings.plan_file, Some(PathBuf::from("/notes/PLAN.md")));
    assert!(settings.color, "unspecified fields keep their defaults");
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    let dir = TempDir::new().unwrap();
    let global = write_config(
        &dir,
        "mdplan.toml",
        r#"
format = "json"
color = false
plan_file = "/global/PLAN.md"
"#,
    );
    let local = write_config(&dir, ".mdplan.toml", r#"plan_file = "/local/PLAN.md""#);

    let settings = Settings::load_from(Some(&global), Some(&local)).expect("load settings");

    assert_eq!(settings.format, OutputFormat::Json, "global value kept");
    assert!(!settings.color, "global value kept");
    assert_eq!(settings.plan_file, Some(PathBuf::from("/local/PLAN.md")));
}

#[test]
fn given_tilde_plan_file_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".mdplan.toml", r#"plan_file = "~/PLAN.md""#);

    let settings = Settings::load_from(None, Some(&local)).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    let plan = settings.plan_file.expect("plan_file set");
    assert_eq!(plan, PathBuf::from(home).join("PLAN.md"));
}

#[test]
fn given_malformed_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".mdplan.toml", "format = [not toml");

    let err = Settings::load_from(None, Some(&local)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".mdplan.toml"));
}

#[test]
fn given_unknown_format_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, ".mdplan.toml", r#"format = "yaml""#);

    let err = Settings::load_from(None, Some(&local)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_directory_without_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    assert!(!local_config_path(dir.path()).exists());

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.plan_file, None);
}
