//! End-to-end tests of the full automation run.

use crate::automation::{automation_pipeline, TEST_CASES_FILE, TICKET_KEYS_FILE};
use crate::errors::ConfigError;
use crate::events::CollectingEventSink;
use crate::pipeline::PipelineOutcome;
use crate::settings::{self, REQUIRED_SETTINGS, TRACKER_URL};
use crate::stages::{Stage, StageStatus, StaticArtifactProbe};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A stage that counts invocations and optionally fails.
#[derive(Debug)]
struct CountingStage {
    name: String,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingStage {
    fn new(name: &str, calls: Arc<AtomicUsize>, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            calls,
            fail,
        })
    }
}

#[async_trait]
impl Stage for CountingStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(anyhow::anyhow!("simulated failure"))
        } else {
            Ok(())
        }
    }
}

fn valid_settings() -> HashMap<String, String> {
    REQUIRED_SETTINGS
        .iter()
        .map(|key| {
            let value = if *key == TRACKER_URL {
                "https://tracker.example.net".to_string()
            } else {
                "set".to_string()
            };
            ((*key).to_string(), value)
        })
        .collect()
}

struct Harness {
    sink: Arc<CollectingEventSink>,
    ticket_calls: Arc<AtomicUsize>,
    repo_calls: Arc<AtomicUsize>,
    test_calls: Arc<AtomicUsize>,
}

impl Harness {
    fn pipeline(
        &self,
        fail_tickets: bool,
        settings: HashMap<String, String>,
        probe: StaticArtifactProbe,
    ) -> crate::pipeline::Pipeline {
        automation_pipeline(
            CountingStage::new("ticket-creation", self.ticket_calls.clone(), fail_tickets),
            CountingStage::new("repository-setup", self.repo_calls.clone(), false),
            CountingStage::new("test-generation", self.test_calls.clone(), false),
            self.sink.clone(),
        )
        .settings_source(Arc::new(settings))
        .probe(Arc::new(probe))
        .build()
    }
}

fn harness() -> Harness {
    Harness {
        sink: Arc::new(CollectingEventSink::new()),
        ticket_calls: Arc::new(AtomicUsize::new(0)),
        repo_calls: Arc::new(AtomicUsize::new(0)),
        test_calls: Arc::new(AtomicUsize::new(0)),
    }
}

fn all_artifacts() -> StaticArtifactProbe {
    StaticArtifactProbe::new([TICKET_KEYS_FILE, TEST_CASES_FILE])
}

#[tokio::test]
async fn full_run_completes_with_success_entry_and_no_errors() {
    let h = harness();
    let pipeline = h.pipeline(false, valid_settings(), all_artifacts());

    let outcome = pipeline.run().await;

    assert!(outcome.is_success());
    assert!(h.sink.contains("All stages completed successfully"));
    assert!(h.sink.errors().is_empty());
    assert_eq!(h.ticket_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.repo_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.test_calls.load(Ordering::SeqCst), 1);

    let summary = outcome.summary().unwrap();
    assert_eq!(summary.results.len(), 3);
    assert!(summary
        .statuses
        .iter()
        .all(|(_, status)| *status == StageStatus::Succeeded));
}

#[tokio::test]
async fn first_stage_failure_stops_the_run() {
    let h = harness();
    let pipeline = h.pipeline(true, valid_settings(), all_artifacts());

    let outcome = pipeline.run().await;

    assert!(!outcome.is_success());
    assert_eq!(h.ticket_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.repo_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.test_calls.load(Ordering::SeqCst), 0);

    let summary = outcome.summary().unwrap();
    assert_eq!(
        summary.statuses,
        vec![
            ("ticket-creation".to_string(), StageStatus::Failed),
            ("repository-setup".to_string(), StageStatus::NotStarted),
            ("test-generation".to_string(), StageStatus::NotStarted),
        ]
    );
    assert_eq!(summary.results.len(), 1);
    assert!(!h.sink.contains("All stages completed successfully"));
}

#[tokio::test]
async fn missing_configuration_invokes_no_stage() {
    let h = harness();
    let mut settings = valid_settings();
    settings.remove(TRACKER_URL);
    let pipeline = h.pipeline(false, settings, all_artifacts());

    let outcome = pipeline.run().await;

    match outcome {
        PipelineOutcome::Aborted(ConfigError::MissingSettings { missing }) => {
            assert_eq!(missing, vec![TRACKER_URL.to_string()]);
        }
        other => panic!("Expected Aborted(MissingSettings), got {other:?}"),
    }
    assert_eq!(h.ticket_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.repo_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.test_calls.load(Ordering::SeqCst), 0);
    assert!(h.sink.contains("Aborting"));
}

#[tokio::test]
async fn malformed_tracker_url_aborts_before_any_stage() {
    let h = harness();
    let mut settings = valid_settings();
    settings.insert(TRACKER_URL.to_string(), "tracker.example.net".to_string());
    let pipeline = h.pipeline(false, settings, all_artifacts());

    let outcome = pipeline.run().await;

    assert!(matches!(
        outcome,
        PipelineOutcome::Aborted(ConfigError::InvalidTrackerUrl { .. })
    ));
    assert_eq!(h.ticket_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_final_artifact_fails_the_last_stage() {
    let h = harness();
    let probe = StaticArtifactProbe::new([TICKET_KEYS_FILE]);
    let pipeline = h.pipeline(false, valid_settings(), probe);

    let outcome = pipeline.run().await;

    assert!(!outcome.is_success());
    // All three entry points ran; only the postcondition failed.
    assert_eq!(h.test_calls.load(Ordering::SeqCst), 1);
    assert!(h.sink.contains(TEST_CASES_FILE));

    let summary = outcome.summary().unwrap();
    assert_eq!(summary.statuses[2].1, StageStatus::Failed);
}

#[tokio::test]
async fn validate_contract_matches_pipeline_gate() {
    let sink = CollectingEventSink::new();
    assert!(settings::validate(&valid_settings(), &sink));

    let mut broken = valid_settings();
    broken.remove(TRACKER_URL);
    assert!(!settings::validate(&broken, &sink));
    assert_eq!(sink.errors().len(), 1);
}

#[derive(Debug)]
struct SlowStage;

#[async_trait]
impl Stage for SlowStage {
    fn name(&self) -> &str {
        "slow"
    }

    async fn execute(&self) -> anyhow::Result<()> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

#[tokio::test]
async fn stage_deadline_fails_a_hung_run() {
    let sink = Arc::new(CollectingEventSink::new());
    let pipeline = crate::pipeline::Pipeline::builder("deadline run")
        .sink(sink.clone())
        .stage(Arc::new(SlowStage))
        .settings_source(Arc::new(valid_settings()))
        .stage_deadline(Duration::from_millis(20))
        .build();

    let outcome = pipeline.run().await;

    assert!(!outcome.is_success());
    assert!(sink.contains("did not finish"));
}
