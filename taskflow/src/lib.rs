//! # Taskflow
//!
//! A small automation pipeline that runs a fixed developer workflow —
//! issue-tracker ticket creation, source-repository setup, and test-artifact
//! generation — as three sequenced stages.
//!
//! Taskflow owns the orchestration only:
//!
//! - **Settings gating**: required environment settings are validated before
//!   any stage runs
//! - **Sequenced execution**: stages run one at a time, in declaration order,
//!   stopping at the first failure
//! - **Artifact postconditions**: a stage may declare a filesystem artifact
//!   that must exist after its entry point returns
//! - **Failure containment**: stage errors are caught at the runner boundary
//!   and reported, never propagated
//! - **Activity logging**: every stage transition is recorded to an injected
//!   sink, mirrored to a durable log file and the console
//!
//! The task entry points themselves are external collaborators supplied as
//! [`Stage`](stages::Stage) implementations.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use taskflow::prelude::*;
//! use std::sync::Arc;
//!
//! taskflow::observability::init_file_logging(DEFAULT_LOG_FILE)?;
//!
//! let pipeline = automation_pipeline(
//!     Arc::new(FnStage::new("ticket-creation", create_tickets)),
//!     Arc::new(FnStage::new("repository-setup", set_up_repository)),
//!     Arc::new(FnStage::new("test-generation", generate_test_cases)),
//!     Arc::new(FanOutEventSink::standard()),
//! )
//! .build();
//!
//! let outcome = pipeline.run().await;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod automation;
pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod runner;
pub mod settings;
pub mod stages;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::automation::{
        automation_pipeline, TEST_CASES_FILE, TICKET_KEYS_FILE,
    };
    pub use crate::errors::{ConfigError, StageFailure};
    pub use crate::events::{
        CollectingEventSink, ConsoleEventSink, EventSink, FanOutEventSink,
        LogEntry, NoOpEventSink, Severity, TracingEventSink,
    };
    pub use crate::observability::DEFAULT_LOG_FILE;
    pub use crate::pipeline::{
        Pipeline, PipelineBuilder, PipelineOutcome, RunSummary,
    };
    pub use crate::runner::StageRunner;
    pub use crate::settings::{validate, ProcessEnv, Settings, SettingsSource};
    pub use crate::stages::{
        ArtifactProbe, FailingStage, FnStage, FsArtifactProbe, NoOpStage, Stage,
        StageResult, StageSpec, StageStatus, StaticArtifactProbe,
    };
}
