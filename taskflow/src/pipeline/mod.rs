//! Pipeline assembly and orchestration.
//!
//! A [`Pipeline`] sequences its stages in declaration order, gated by the
//! settings validator. The first failing stage ends the run; later stages
//! are never considered. The outcome is communicated through the activity
//! log and returned as a typed [`PipelineOutcome`] — `run` never returns an
//! error and never panics.

#[cfg(test)]
mod integration_tests;

use crate::errors::ConfigError;
use crate::events::{EventSink, NoOpEventSink, Severity};
use crate::runner::StageRunner;
use crate::settings::{ProcessEnv, Settings, SettingsSource};
use crate::stages::{ArtifactProbe, FsArtifactProbe, Stage, StageResult, StageSpec, StageStatus};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// What one run produced: correlation id, per-stage statuses, and results
/// for the stages that were attempted.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Correlation id stamped on the run's log records.
    pub run_id: Uuid,
    /// Results for attempted stages, in execution order.
    pub results: Vec<StageResult>,
    /// Status of every declared stage; stages after a failure stay
    /// `NotStarted`.
    pub statuses: Vec<(String, StageStatus)>,
}

/// Terminal outcome of a pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Every stage completed and every declared artifact was confirmed.
    Completed(RunSummary),
    /// Settings validation failed; no stage entry point was invoked.
    Aborted(ConfigError),
    /// A stage failed; later stages never ran.
    Failed(RunSummary),
}

impl PipelineOutcome {
    /// Returns true only for a fully completed run.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns the run summary for outcomes that executed any stage logic.
    #[must_use]
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            Self::Completed(summary) | Self::Failed(summary) => Some(summary),
            Self::Aborted(_) => None,
        }
    }
}

/// A sequenced, settings-gated automation pipeline.
pub struct Pipeline {
    name: String,
    stages: Vec<StageSpec>,
    sink: Arc<dyn EventSink>,
    probe: Arc<dyn ArtifactProbe>,
    settings_source: Arc<dyn SettingsSource>,
    stage_deadline: Option<Duration>,
}

impl Pipeline {
    /// Starts building a pipeline.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of declared stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Runs the pipeline.
    ///
    /// Validates settings first; on a configuration error no stage entry
    /// point is invoked. Stages then run strictly one after another,
    /// stopping at the first failure.
    pub async fn run(&self) -> PipelineOutcome {
        let run_id = Uuid::new_v4();

        self.sink.record(
            Severity::Info,
            &format!("Starting {} (run {run_id})", self.name),
        );
        self.sink.banner(&format!("Starting {}", self.name));

        if let Err(error) = Settings::load(self.settings_source.as_ref()) {
            self.sink.record(Severity::Error, &error.to_string());
            self.sink
                .record(Severity::Error, "Settings validation failed. Aborting.");
            return PipelineOutcome::Aborted(error);
        }

        let mut runner = StageRunner::new(self.sink.clone()).with_probe(self.probe.clone());
        if let Some(deadline) = self.stage_deadline {
            runner = runner.with_stage_deadline(deadline);
        }

        let mut statuses: Vec<(String, StageStatus)> = self
            .stages
            .iter()
            .map(|spec| (spec.name().to_string(), StageStatus::NotStarted))
            .collect();
        let mut results = Vec::with_capacity(self.stages.len());

        for (index, spec) in self.stages.iter().enumerate() {
            statuses[index].1 = StageStatus::Running;
            let result = runner.run_stage(spec).await;
            statuses[index].1 = result.status;

            let failed = result.is_failure();
            results.push(result);

            if failed {
                return PipelineOutcome::Failed(RunSummary {
                    run_id,
                    results,
                    statuses,
                });
            }
        }

        self.sink
            .record(Severity::Info, "All stages completed successfully");
        self.sink.banner("All stages completed successfully");

        PipelineOutcome::Completed(RunSummary {
            run_id,
            results,
            statuses,
        })
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("stages", &self.stages)
            .finish()
    }
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    name: String,
    stages: Vec<StageSpec>,
    sink: Arc<dyn EventSink>,
    probe: Arc<dyn ArtifactProbe>,
    settings_source: Arc<dyn SettingsSource>,
    stage_deadline: Option<Duration>,
}

impl PipelineBuilder {
    /// Creates a builder with no stages, a no-op sink, the real filesystem
    /// probe, and the process environment as settings source.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            sink: Arc::new(NoOpEventSink),
            probe: Arc::new(FsArtifactProbe),
            settings_source: Arc::new(ProcessEnv),
            stage_deadline: None,
        }
    }

    /// Appends a stage with no artifact postcondition.
    #[must_use]
    pub fn stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.push(StageSpec::new(stage));
        self
    }

    /// Appends a stage whose success requires `artifact` to exist.
    #[must_use]
    pub fn stage_with_artifact(
        mut self,
        stage: Arc<dyn Stage>,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        self.stages.push(StageSpec::with_artifact(stage, artifact));
        self
    }

    /// Sets the activity log sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replaces the artifact probe.
    #[must_use]
    pub fn probe(mut self, probe: Arc<dyn ArtifactProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Replaces the settings source.
    #[must_use]
    pub fn settings_source(mut self, source: Arc<dyn SettingsSource>) -> Self {
        self.settings_source = source;
        self
    }

    /// Bounds each stage invocation with a deadline.
    #[must_use]
    pub fn stage_deadline(mut self, deadline: Duration) -> Self {
        self.stage_deadline = Some(deadline);
        self
    }

    /// Builds the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            name: self.name,
            stages: self.stages,
            sink: self.sink,
            probe: self.probe,
            settings_source: self.settings_source,
            stage_deadline: self.stage_deadline,
        }
    }
}
