//! The fixed three-stage developer workflow.
//!
//! Stage order is fixed by design: repository setup and test generation
//! are presumed to depend on the ticket identifiers recorded by stage 1.
//! There is no reordering, parallelism, or skip logic.

use crate::events::EventSink;
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::stages::Stage;
use std::sync::Arc;

/// Record of created ticket keys, written by the ticket-creation stage and
/// required for that stage to count as successful.
pub const TICKET_KEYS_FILE: &str = "ticket_keys.json";

/// Generated test cases, written by the test-generation stage and required
/// for that stage to count as successful.
pub const TEST_CASES_FILE: &str = "all_test_cases.txt";

/// Wires the three collaborator stages into the standard automation
/// pipeline: ticket creation (gated on [`TICKET_KEYS_FILE`]), repository
/// setup, then test generation (gated on [`TEST_CASES_FILE`]).
///
/// Returns the builder so embedders can finish configuring (settings
/// source, artifact probe, stage deadline) before [`PipelineBuilder::build`].
#[must_use]
pub fn automation_pipeline(
    ticket_creation: Arc<dyn Stage>,
    repository_setup: Arc<dyn Stage>,
    test_generation: Arc<dyn Stage>,
    sink: Arc<dyn EventSink>,
) -> PipelineBuilder {
    Pipeline::builder("task automation")
        .sink(sink)
        .stage_with_artifact(ticket_creation, TICKET_KEYS_FILE)
        .stage(repository_setup)
        .stage_with_artifact(test_generation, TEST_CASES_FILE)
}
