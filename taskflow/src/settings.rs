//! Environment settings and the validation gate.
//!
//! Settings are read once at startup through a [`SettingsSource`] and are
//! immutable afterward. Validation is presence/shape only: every required
//! key must carry a non-empty value, and the tracker base URL must start
//! with a recognized scheme. Empty values count as absent.

use crate::errors::ConfigError;
use crate::events::{EventSink, Severity};
use std::collections::HashMap;

/// Tracker API key.
pub const TRACKER_API_KEY: &str = "TRACKER_API_KEY";
/// Source-host access token.
pub const SOURCE_HOST_TOKEN: &str = "SOURCE_HOST_TOKEN";
/// Source-host account identifier.
pub const SOURCE_HOST_USER: &str = "SOURCE_HOST_USER";
/// Source-host repository identifier.
pub const SOURCE_HOST_REPO: &str = "SOURCE_HOST_REPO";
/// Tracker base URL, e.g. `https://your-domain.example.net`.
pub const TRACKER_URL: &str = "TRACKER_URL";
/// Tracker account email.
pub const TRACKER_EMAIL: &str = "TRACKER_EMAIL";
/// Tracker API token.
pub const TRACKER_API_TOKEN: &str = "TRACKER_API_TOKEN";
/// Tracker project key.
pub const TRACKER_PROJECT_KEY: &str = "TRACKER_PROJECT_KEY";
/// Issue-type label applied to created tickets. Optional.
pub const DEFAULT_ISSUE_TYPE: &str = "DEFAULT_ISSUE_TYPE";
/// Issue-type label applied to created sub-tasks. Optional.
pub const DEFAULT_SUBTASK_ISSUE_TYPE: &str = "DEFAULT_SUBTASK_ISSUE_TYPE";

/// Every setting that must be present for the pipeline to run.
pub const REQUIRED_SETTINGS: [&str; 8] = [
    TRACKER_API_KEY,
    SOURCE_HOST_TOKEN,
    SOURCE_HOST_USER,
    SOURCE_HOST_REPO,
    TRACKER_URL,
    TRACKER_EMAIL,
    TRACKER_API_TOKEN,
    TRACKER_PROJECT_KEY,
];

const FALLBACK_ISSUE_TYPE: &str = "Task";
const FALLBACK_SUBTASK_ISSUE_TYPE: &str = "Subtask";

/// A read-only source of named settings.
///
/// Production code uses [`ProcessEnv`]; tests inject a
/// `HashMap<String, String>`.
pub trait SettingsSource: Send + Sync {
    /// Returns the raw value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;
}

/// Settings source backed by the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl SettingsSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl SettingsSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// The validated, immutable settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Tracker API key.
    pub tracker_api_key: String,
    /// Source-host access token.
    pub source_host_token: String,
    /// Source-host account identifier.
    pub source_host_user: String,
    /// Source-host repository identifier.
    pub source_host_repo: String,
    /// Tracker base URL.
    pub tracker_url: String,
    /// Tracker account email.
    pub tracker_email: String,
    /// Tracker API token.
    pub tracker_api_token: String,
    /// Tracker project key.
    pub tracker_project_key: String,
    /// Issue-type label, defaulted to `"Task"` when unset.
    pub default_issue_type: String,
    /// Sub-task issue-type label, defaulted to `"Subtask"` when unset.
    pub default_subtask_issue_type: String,
}

impl Settings {
    /// Loads and validates settings from a source.
    ///
    /// All missing required keys are collected into a single
    /// [`ConfigError::MissingSettings`]; the URL shape check runs only once
    /// every required key is present.
    pub fn load(source: &dyn SettingsSource) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let settings = Self {
            tracker_api_key: required(source, TRACKER_API_KEY, &mut missing),
            source_host_token: required(source, SOURCE_HOST_TOKEN, &mut missing),
            source_host_user: required(source, SOURCE_HOST_USER, &mut missing),
            source_host_repo: required(source, SOURCE_HOST_REPO, &mut missing),
            tracker_url: required(source, TRACKER_URL, &mut missing),
            tracker_email: required(source, TRACKER_EMAIL, &mut missing),
            tracker_api_token: required(source, TRACKER_API_TOKEN, &mut missing),
            tracker_project_key: required(source, TRACKER_PROJECT_KEY, &mut missing),
            default_issue_type: defaulted(source, DEFAULT_ISSUE_TYPE, FALLBACK_ISSUE_TYPE),
            default_subtask_issue_type: defaulted(
                source,
                DEFAULT_SUBTASK_ISSUE_TYPE,
                FALLBACK_SUBTASK_ISSUE_TYPE,
            ),
        };

        if !missing.is_empty() {
            return Err(ConfigError::MissingSettings { missing });
        }

        if !has_recognized_scheme(&settings.tracker_url) {
            return Err(ConfigError::InvalidTrackerUrl {
                key: TRACKER_URL.to_string(),
                value: settings.tracker_url,
            });
        }

        Ok(settings)
    }

    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&ProcessEnv)
    }
}

fn required(source: &dyn SettingsSource, key: &str, missing: &mut Vec<String>) -> String {
    match source.get(key).filter(|value| !value.is_empty()) {
        Some(value) => value,
        None => {
            missing.push(key.to_string());
            String::new()
        }
    }
}

fn defaulted(source: &dyn SettingsSource, key: &str, fallback: &str) -> String {
    source
        .get(key)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn has_recognized_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Validates the settings available through `source`.
///
/// Returns `true` when every required setting is present and the tracker
/// URL is well-formed. On failure, records exactly one error-severity
/// diagnostic on `sink` and returns `false`. No other side effects.
pub fn validate(source: &dyn SettingsSource, sink: &dyn EventSink) -> bool {
    match Settings::load(source) {
        Ok(_) => true,
        Err(error) => {
            sink.record(Severity::Error, &error.to_string());
            false
        }
    }
}
