//! Tool tests against files on disk.

use std::path::{Path, PathBuf};

use algo_core::error::AlgoError;
use algo_core::strategy::StrategyPolicy;
use algo_test_utils::fixtures::STANDARD_CONFIG_JSON;
use algo_tools::inspect::export_presets;
use algo_tools::validate::{load_policy, validate, ToolError};

fn presets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("presets")
}

#[test]
fn shipped_presets_match_the_built_ins() {
    for name in StrategyPolicy::PRESETS {
        let path = presets_dir().join(format!("{name}.ron"));
        let loaded = load_policy(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, StrategyPolicy::preset(name).unwrap(), "{name}");
    }
}

#[test]
fn validate_accepts_config_and_policy_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, STANDARD_CONFIG_JSON).unwrap();
    let policy = presets_dir().join("doomsday.ron");

    let report = validate(Some(&config), policy.to_str().unwrap()).unwrap();
    assert_eq!(report.policy, "Doomsday");
    assert_eq!(report.units, Some(6));
    assert!(report.warnings.is_empty());
}

#[test]
fn validate_reports_broken_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"unitInformation": [{"shorthand": "FF"}]}"#).unwrap();

    let err = validate(Some(&config), "balanced").unwrap_err();
    assert!(matches!(
        err,
        ToolError::Core(AlgoError::IncompleteCatalog { .. })
    ));
}

#[test]
fn validate_reports_broken_policy() {
    let dir = tempfile::tempdir().unwrap();
    let policy = dir.path().join("bad.ron");
    std::fs::write(&policy, "(name: \"Broken\")").unwrap();

    let err = validate(None, policy.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ToolError::Core(AlgoError::PolicyParse(_))));
}

#[test]
fn exported_presets_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("presets");
    let written = export_presets(&out).unwrap();
    assert_eq!(written.len(), StrategyPolicy::PRESETS.len());

    for path in written {
        let policy = load_policy(path.to_str().unwrap()).unwrap();
        policy.validate().unwrap();
    }
}
