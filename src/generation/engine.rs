//! Pure generation run state machine.
//!
//! `advance` takes the progress increment as an argument so the machine
//! can be driven deterministically in tests; the randomness and the
//! timing both live with the driver.

use serde::{Deserialize, Serialize};

use super::steps::{GenerationStep, StepId};

/// Overall run phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Running,
    Done,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// What one `advance` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The run is not in the Running phase; nothing happened.
    NotRunning,
    /// The active step gained progress but has not completed.
    Progressed,
    /// The active step just reached 100 and was marked completed. The
    /// driver should pause, then call `activate_next`.
    StepCompleted(usize),
    /// The active step is completed but the next one has not been
    /// activated yet; nothing happened.
    BetweenSteps,
    /// The final step completed; the run is now Done.
    Finished,
}

/// Progress events broadcast to WebSocket clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Full run snapshot (sent on connect and after every tick).
    Snapshot {
        phase: RunPhase,
        overall_progress: f64,
        current_step: usize,
        steps: Vec<GenerationStep>,
    },
    /// A step just completed.
    StepCompleted { index: usize, id: StepId },
    /// The whole run completed.
    RunCompleted,
}

/// The simulated pipeline run.
///
/// Invariant: step *i+1* has zero progress until step *i* is completed.
#[derive(Debug, Clone)]
pub struct GenerationRun {
    steps: Vec<GenerationStep>,
    current: usize,
    phase: RunPhase,
}

impl Default for GenerationRun {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationRun {
    pub fn new() -> Self {
        Self {
            steps: GenerationStep::plan(),
            current: 0,
            phase: RunPhase::Idle,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }

    /// Index of the active step.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn steps(&self) -> &[GenerationStep] {
        &self.steps
    }

    /// Overall progress: completed steps over total, in percent.
    pub fn overall_progress(&self) -> f64 {
        let completed = self.steps.iter().filter(|s| s.completed).count();
        completed as f64 / self.steps.len() as f64 * 100.0
    }

    /// Reset every step to pending/0 and return to Idle, regardless of
    /// prior state.
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.reset();
        }
        self.current = 0;
        self.phase = RunPhase::Idle;
    }

    /// Start a fresh run. Any prior progress is discarded.
    pub fn start(&mut self) {
        self.reset();
        self.phase = RunPhase::Running;
        tracing::info!("Generation run started");
    }

    /// Apply one tick's progress increment to the active step.
    pub fn advance(&mut self, increment: f64) -> TickOutcome {
        if self.phase != RunPhase::Running {
            return TickOutcome::NotRunning;
        }

        let index = self.current;
        let last = self.steps.len() - 1;
        let step = &mut self.steps[index];
        if step.completed {
            return TickOutcome::BetweenSteps;
        }

        step.progress += increment;
        if step.progress < 100.0 {
            return TickOutcome::Progressed;
        }

        step.progress = 100.0;
        step.completed = true;
        tracing::debug!(step = %step.id, "Generation step completed");

        if index == last {
            self.phase = RunPhase::Done;
            tracing::info!("Generation run completed");
            TickOutcome::Finished
        } else {
            TickOutcome::StepCompleted(index)
        }
    }

    /// Activate the step after the one that just completed. Called by
    /// the driver once the inter-step pause has elapsed.
    pub fn activate_next(&mut self) {
        if self.phase == RunPhase::Running
            && self.steps[self.current].completed
            && self.current + 1 < self.steps.len()
        {
            self.current += 1;
        }
    }

    /// Current snapshot event.
    pub fn snapshot(&self) -> ProgressEvent {
        ProgressEvent::Snapshot {
            phase: self.phase,
            overall_progress: self.overall_progress(),
            current_step: self.current,
            steps: self.steps.clone(),
        }
    }
}
