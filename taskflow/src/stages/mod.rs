//! Stage trait and implementations.
//!
//! Stages are the units of work sequenced by the pipeline. The invocation
//! contract is deliberately thin: a zero-argument operation that fails by
//! returning an error. What a stage does internally (network calls,
//! filesystem writes) is opaque to the orchestrator.

mod artifacts;
mod result;

pub use artifacts::{ArtifactProbe, FsArtifactProbe, StaticArtifactProbe};
pub use result::{StageResult, StageStatus};

#[cfg(test)]
pub use artifacts::MockArtifactProbe;

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for pipeline stages.
///
/// A stage either returns `Ok(())` or an error describing the failure.
/// The error is contained at the runner boundary and reported, never
/// classified.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Executes the stage entry point.
    async fn execute(&self) -> anyhow::Result<()>;
}

/// A function-based stage wrapping a collaborator entry point.
pub struct FnStage<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    name: String,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    /// Creates a new function-based stage.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnStage<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage")
            .field("name", &self.name)
            .finish()
    }
}

#[async_trait]
impl<F> Stage for FnStage<F>
where
    F: Fn() -> anyhow::Result<()> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> anyhow::Result<()> {
        (self.func)()
    }
}

/// A stage that always succeeds. Useful in tests.
#[derive(Debug, Clone)]
pub struct NoOpStage {
    name: String,
}

impl NoOpStage {
    /// Creates a new no-op stage.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Stage for NoOpStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A stage that always fails with a fixed message. Useful in tests.
#[derive(Debug, Clone)]
pub struct FailingStage {
    name: String,
    message: String,
}

impl FailingStage {
    /// Creates a new failing stage.
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Stage for FailingStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("{}", self.message))
    }
}

/// A stage together with its declared postcondition.
///
/// When `required_artifact` is set, the stage is not considered successful
/// unless that path exists after the entry point returns without error.
#[derive(Debug, Clone)]
pub struct StageSpec {
    /// The stage to execute.
    pub stage: Arc<dyn Stage>,
    /// Filesystem marker that must exist after a successful execution.
    pub required_artifact: Option<PathBuf>,
}

impl StageSpec {
    /// Creates a spec with no artifact postcondition.
    #[must_use]
    pub fn new(stage: Arc<dyn Stage>) -> Self {
        Self {
            stage,
            required_artifact: None,
        }
    }

    /// Creates a spec whose success requires `artifact` to exist.
    #[must_use]
    pub fn with_artifact(stage: Arc<dyn Stage>, artifact: impl Into<PathBuf>) -> Self {
        Self {
            stage,
            required_artifact: Some(artifact.into()),
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.stage.name()
    }
}
