//! Error types for the taskflow pipeline.
//!
//! The taxonomy is deliberately small: configuration errors detected before
//! any stage runs, and stage failures contained at the runner boundary.
//! Stage failures carry an opaque [`anyhow::Error`] — the runner reports the
//! description and never classifies the cause.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised when the environment settings fail validation.
///
/// Exactly one of these is produced per failed validation, so the operator
/// sees a single diagnostic naming everything that is wrong.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more required settings are unset or empty.
    #[error("Missing environment settings: {}", .missing.join(", "))]
    MissingSettings {
        /// The keys of every missing setting, in declaration order.
        missing: Vec<String>,
    },

    /// The tracker base URL does not carry a recognized scheme.
    #[error("Invalid {key}: {value}. Must start with http:// or https://")]
    InvalidTrackerUrl {
        /// The setting key holding the URL.
        key: String,
        /// The malformed value as read from the environment.
        value: String,
    },
}

impl ConfigError {
    /// Returns the keys of the missing settings, if any.
    #[must_use]
    pub fn missing_keys(&self) -> &[String] {
        match self {
            Self::MissingSettings { missing } => missing,
            Self::InvalidTrackerUrl { .. } => &[],
        }
    }
}

/// A contained stage failure.
///
/// Both variants are terminal for the run; the orchestrator never retries
/// and never inspects the underlying cause.
#[derive(Debug, Error)]
pub enum StageFailure {
    /// The stage entry point returned an error.
    #[error("Stage '{stage}' failed: {source}")]
    Execution {
        /// The failing stage.
        stage: String,
        /// The uninspected failure raised by the entry point.
        #[source]
        source: anyhow::Error,
    },

    /// The entry point returned normally but its declared artifact is absent.
    #[error("Stage '{stage}' failed: required artifact '{}' was not produced", .path.display())]
    MissingArtifact {
        /// The failing stage.
        stage: String,
        /// The artifact path that was expected to exist.
        path: PathBuf,
    },
}

impl StageFailure {
    /// Returns the name of the failing stage.
    #[must_use]
    pub fn stage(&self) -> &str {
        match self {
            Self::Execution { stage, .. } | Self::MissingArtifact { stage, .. } => stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings_display_joins_keys() {
        let error = ConfigError::MissingSettings {
            missing: vec!["TRACKER_URL".to_string(), "TRACKER_EMAIL".to_string()],
        };

        assert_eq!(
            error.to_string(),
            "Missing environment settings: TRACKER_URL, TRACKER_EMAIL"
        );
        assert_eq!(error.missing_keys().len(), 2);
    }

    #[test]
    fn test_invalid_tracker_url_display() {
        let error = ConfigError::InvalidTrackerUrl {
            key: "TRACKER_URL".to_string(),
            value: "ftp://tracker.example.com".to_string(),
        };

        let rendered = error.to_string();
        assert!(rendered.contains("TRACKER_URL"));
        assert!(rendered.contains("ftp://tracker.example.com"));
        assert!(rendered.contains("http://"));
        assert!(error.missing_keys().is_empty());
    }

    #[test]
    fn test_execution_failure_carries_description() {
        let failure = StageFailure::Execution {
            stage: "ticket-creation".to_string(),
            source: anyhow::anyhow!("connection refused"),
        };

        assert_eq!(failure.stage(), "ticket-creation");
        assert!(failure.to_string().contains("connection refused"));
    }

    #[test]
    fn test_missing_artifact_names_path() {
        let failure = StageFailure::MissingArtifact {
            stage: "test-generation".to_string(),
            path: PathBuf::from("all_test_cases.txt"),
        };

        assert!(failure.to_string().contains("all_test_cases.txt"));
        assert_eq!(failure.stage(), "test-generation");
    }
}
