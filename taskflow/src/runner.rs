//! The stage runner: invocation, containment, and artifact gating.
//!
//! Every failure a stage can produce is absorbed here. The caller sees a
//! [`StageResult`] and nothing else; no error crosses this boundary.

use crate::errors::StageFailure;
use crate::events::{EventSink, Severity};
use crate::stages::{ArtifactProbe, FsArtifactProbe, Stage, StageResult, StageSpec};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// Runs a single stage to a terminal result.
pub struct StageRunner {
    sink: Arc<dyn EventSink>,
    probe: Arc<dyn ArtifactProbe>,
    stage_deadline: Option<Duration>,
}

impl StageRunner {
    /// Creates a runner recording to `sink`, probing the real filesystem.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            probe: Arc::new(FsArtifactProbe),
            stage_deadline: None,
        }
    }

    /// Replaces the artifact probe.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn ArtifactProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Bounds each stage invocation; a timed-out stage is an ordinary
    /// stage failure.
    #[must_use]
    pub fn with_stage_deadline(mut self, deadline: Duration) -> Self {
        self.stage_deadline = Some(deadline);
        self
    }

    /// Executes one stage and folds every outcome into a [`StageResult`].
    ///
    /// On entry-point failure the artifact probe is not consulted; the
    /// artifact check is an independent postcondition evaluated only after
    /// a clean return.
    pub async fn run_stage(&self, spec: &StageSpec) -> StageResult {
        let name = spec.name().to_string();
        let started_at = Utc::now();

        self.sink
            .record(Severity::Info, &format!("Executing stage '{name}'"));
        self.sink.banner(&format!("Stage: {name}"));

        if let Err(source) = self.invoke(spec.stage.as_ref()).await {
            let failure = StageFailure::Execution {
                stage: name.clone(),
                source,
            };
            self.sink.record(Severity::Error, &failure.to_string());
            return StageResult::failed(name, started_at, failure.to_string());
        }

        if let Some(path) = &spec.required_artifact {
            if !self.probe.exists(path) {
                let failure = StageFailure::MissingArtifact {
                    stage: name.clone(),
                    path: path.clone(),
                };
                self.sink.record(Severity::Error, &failure.to_string());
                return StageResult::failed(name, started_at, failure.to_string());
            }
        }

        self.sink.record(
            Severity::Info,
            &format!("Stage '{name}' completed successfully"),
        );
        StageResult::succeeded(name, started_at)
    }

    async fn invoke(&self, stage: &dyn Stage) -> anyhow::Result<()> {
        match self.stage_deadline {
            Some(deadline) => match tokio::time::timeout(deadline, stage.execute()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(anyhow::anyhow!(
                    "did not finish within {}ms",
                    deadline.as_millis()
                )),
            },
            None => stage.execute().await,
        }
    }
}
