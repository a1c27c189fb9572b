//! Runtime settings loader for mimic-gateway.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/mimic/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use mimic_profiles::{FilterSpec, ProfileDataset};
use mimic_request::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, PipelineConfig, RequestPipeline};
use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "mimic/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
/// Source language when none is configured.
pub const DEFAULT_SOURCE_LANG: &str = "en";
/// Target language when none is configured.
pub const DEFAULT_TARGET_LANG: &str = "ja";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Merged gateway settings; every field optional so layers can overlay.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    /// Language pair and remote base URL.
    #[serde(default)]
    pub translate: TranslateSettings,
    /// Retry bound and per-attempt timeout.
    #[serde(default)]
    pub pipeline: PipelineSettings,
    /// Identity dataset and filter.
    #[serde(default)]
    pub profiles: ProfileSettings,
}

/// `translate:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateSettings {
    /// Source language code.
    pub source: Option<String>,
    /// Target language code.
    pub target: Option<String>,
    /// Remote base URL.
    pub base_url: Option<String>,
}

/// `pipeline:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineSettings {
    /// Retries after the first attempt.
    pub max_retries: Option<u32>,
    /// Upper bound per attempt in milliseconds.
    pub attempt_timeout_ms: Option<u64>,
}

/// `profiles:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileSettings {
    /// JSON dataset replacing the bundled one.
    pub dataset_path: Option<PathBuf>,
    /// Filter document (see `FilterSpec::from_json`).
    pub filter: Option<serde_json::Value>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            translate: self.translate.merge(overlay.translate),
            pipeline: self.pipeline.merge(overlay.pipeline),
            profiles: self.profiles.merge(overlay.profiles),
        }
    }

    /// Source language, defaulting to `en`.
    #[must_use]
    pub fn source_lang(&self) -> &str {
        self.translate.source.as_deref().unwrap_or(DEFAULT_SOURCE_LANG)
    }

    /// Target language, defaulting to `ja`.
    #[must_use]
    pub fn target_lang(&self) -> &str {
        self.translate.target.as_deref().unwrap_or(DEFAULT_TARGET_LANG)
    }

    /// Pipeline settings with defaults filled in.
    #[must_use]
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_retries: self.pipeline.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            attempt_timeout_ms: self.pipeline.attempt_timeout_ms,
            base_url: self
                .translate
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Build the HTTP pipeline described by these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, the configured
    /// dataset cannot be loaded, or the filter document is invalid.
    pub fn build_pipeline(&self) -> Result<RequestPipeline> {
        let mut pipeline =
            RequestPipeline::new(self.pipeline_config()).context("build http client")?;
        if let Some(path) = self.profiles.dataset_path.as_deref() {
            let dataset = ProfileDataset::from_path(path)
                .with_context(|| format!("load profile dataset {}", path.display()))?;
            pipeline = pipeline.with_dataset(Arc::new(dataset));
        }
        if let Some(document) = self.profiles.filter.as_ref() {
            let filter = FilterSpec::from_json(document).context("parse profiles.filter")?;
            pipeline = pipeline.with_filter(filter);
        }
        Ok(pipeline)
    }
}

impl TranslateSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            source: overlay.source.or(self.source),
            target: overlay.target.or(self.target),
            base_url: overlay.base_url.or(self.base_url),
        }
    }
}

impl PipelineSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            max_retries: overlay.max_retries.or(self.max_retries),
            attempt_timeout_ms: overlay.attempt_timeout_ms.or(self.attempt_timeout_ms),
        }
    }
}

impl ProfileSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            dataset_path: overlay.dataset_path.or(self.dataset_path),
            filter: overlay.filter.or(self.filter),
        }
    }
}

/// Load merged runtime settings (user overrides system).
pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> RuntimeSettings {
    if !path.exists() {
        return RuntimeSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return RuntimeSettings::default();
        }
    };
    match serde_yaml::from_str::<RuntimeSettings>(&raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            RuntimeSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
