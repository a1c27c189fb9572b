#![allow(missing_docs)]

use std::path::PathBuf;

use mimic_gateway::{RuntimeSettings, load_runtime_settings_from_paths};
use mimic_request::DEFAULT_BASE_URL;
use tempfile::TempDir;

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

#[test]
fn merge_user_overrides_system() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/settings.yaml");
    let user = tmp.path().join(".config/mimic/settings.yaml");

    write_file(
        system.clone(),
        r#"
translate:
  source: en
  target: ja
  base_url: "http://system.invalid"
pipeline:
  max_retries: 3
  attempt_timeout_ms: 5000
profiles:
  filter:
    platform: Win32
"#,
    );
    write_file(
        user.clone(),
        r#"
translate:
  target: fr
pipeline:
  max_retries: 1
"#,
    );

    let settings = load_runtime_settings_from_paths(&system, &user);
    assert_eq!(settings.source_lang(), "en");
    assert_eq!(settings.target_lang(), "fr");

    let config = settings.pipeline_config();
    assert_eq!(config.max_retries, 1);
    assert_eq!(config.attempt_timeout_ms, Some(5000));
    assert_eq!(config.base_url, "http://system.invalid");
    assert!(settings.profiles.filter.is_some());
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = load_runtime_settings_from_paths(
        &tmp.path().join("absent/system.yaml"),
        &tmp.path().join("absent/user.yaml"),
    );
    assert_eq!(settings.source_lang(), "en");
    assert_eq!(settings.target_lang(), "ja");

    let config = settings.pipeline_config();
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.attempt_timeout_ms, None);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn invalid_yaml_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "translate:\n  target: de\n");
    write_file(user.clone(), "translate: [not, a, map\n");

    let settings = load_runtime_settings_from_paths(&system, &user);
    assert_eq!(settings.target_lang(), "de");
}

#[test]
fn build_pipeline_applies_dataset_and_filter() {
    let tmp = TempDir::new().expect("tempdir");
    let dataset = tmp.path().join("agents.json");
    std::fs::write(
        &dataset,
        r#"[
  {"appName":"Netscape","connection":{"downlink":10,"effectiveType":"4g","rtt":50},
   "platform":"Win32","pluginsLength":5,"screenHeight":1080,"screenWidth":1920,
   "userAgent":"Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/120.0","vendor":"Google Inc.","weight":1.0},
  {"appName":"Netscape","connection":{"downlink":10,"effectiveType":"4g","rtt":50},
   "platform":"MacIntel","pluginsLength":5,"screenHeight":900,"screenWidth":1440,
   "userAgent":"Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Safari/605.1.15","vendor":"Apple Computer, Inc.","weight":2.0}
]"#,
    )
    .expect("write dataset");
    let settings_path = tmp.path().join("settings.yaml");
    write_file(
        settings_path.clone(),
        &format!(
            "profiles:\n  dataset_path: {}\n  filter:\n    platform: MacIntel\n",
            dataset.display()
        ),
    );

    let settings = load_runtime_settings_from_paths(&tmp.path().join("none.yaml"), &settings_path);
    let pipeline = settings.build_pipeline().expect("pipeline");
    assert_eq!(pipeline.dataset().len(), 2);
}

#[test]
fn build_pipeline_rejects_invalid_filter() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("settings.yaml");
    write_file(
        path.clone(),
        "profiles:\n  filter:\n    userAgent:\n      $regex: \"(\"\n",
    );
    let settings = load_runtime_settings_from_paths(&tmp.path().join("none.yaml"), &path);
    assert!(settings.build_pipeline().is_err());
}

#[test]
fn build_pipeline_rejects_missing_dataset() {
    let settings: RuntimeSettings =
        serde_yaml::from_str("profiles:\n  dataset_path: /nonexistent/mimic/agents.json\n")
            .expect("yaml");
    assert!(settings.build_pipeline().is_err());
}
