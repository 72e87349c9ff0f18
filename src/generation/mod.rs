//! Generation stage: the simulated four-step pipeline and the report.
//!
//! The pipeline is pure UI choreography. Steps complete strictly in
//! order, each driven by random progress increments until it clamps at
//! 100. The pure state machine lives in `engine`; scheduling (tick
//! interval, inter-step pause) belongs to the driver in `wizard`.

pub mod engine;
pub mod report;
pub mod steps;

pub use engine::{GenerationRun, ProgressEvent, RunPhase, TickOutcome};
pub use report::{ReportArtifact, render_report, report_filename};
pub use steps::{GenerationStep, StepId};
