//! Artifact postcondition probing.
//!
//! Artifact presence is an explicit postcondition attached to a stage
//! definition, checked through a trait so the pipeline stays testable
//! without touching the real filesystem.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Capability to check whether a declared artifact exists.
#[cfg_attr(test, mockall::automock)]
pub trait ArtifactProbe: Send + Sync {
    /// Returns true if the artifact at `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactProbe;

impl ArtifactProbe for FsArtifactProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Probe over a fixed set of paths. Useful in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticArtifactProbe {
    present: HashSet<PathBuf>,
}

impl StaticArtifactProbe {
    /// Creates a probe that reports the given paths as present.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            present: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a probe that reports every path as absent.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ArtifactProbe for StaticArtifactProbe {
    fn exists(&self, path: &Path) -> bool {
        self.present.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_probe_sees_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("ticket_keys.json");
        std::fs::write(&present, "{}").unwrap();

        let probe = FsArtifactProbe;
        assert!(probe.exists(&present));
        assert!(!probe.exists(&dir.path().join("absent.json")));
    }

    #[test]
    fn test_static_probe() {
        let probe = StaticArtifactProbe::new(["ticket_keys.json"]);

        assert!(probe.exists(Path::new("ticket_keys.json")));
        assert!(!probe.exists(Path::new("all_test_cases.txt")));
        assert!(!StaticArtifactProbe::empty().exists(Path::new("ticket_keys.json")));
    }
}
