//! Async drivers for the generation choreography.
//!
//! Two independent timers, both preserved from the original app: the
//! step ticker that animates the four-step run, and the fixed hold that
//! clears the orchestrator's `generating` flag. They are deliberately
//! not synchronized with each other.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::WizardConfig;
use crate::generation::{ProgressEvent, TickOutcome};

use super::Wizard;

/// Spawn the step ticker for the current run.
///
/// Each tick applies a random increment in `[0, max_increment)` to the
/// active step and broadcasts a snapshot. Step completion inserts the
/// configured pause before the next step activates. The task ends when
/// the run finishes (there is no cancellation path).
pub fn spawn_generation_driver(
    wizard: Arc<RwLock<Wizard>>,
    progress: broadcast::Sender<ProgressEvent>,
    config: WizardConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.tick_interval);
        loop {
            ticker.tick().await;
            let increment = rand::thread_rng().gen_range(0.0..config.max_increment);

            let (outcome, completed, snapshot) = {
                let mut w = wizard.write().await;
                let outcome = w.advance_generation(increment);
                let completed = match outcome {
                    TickOutcome::StepCompleted(i) => Some((i, w.run().steps()[i].id)),
                    TickOutcome::Finished => {
                        let i = w.run().steps().len() - 1;
                        Some((i, w.run().steps()[i].id))
                    }
                    _ => None,
                };
                (outcome, completed, w.run().snapshot())
            };

            // Ok if nobody is listening.
            let _ = progress.send(snapshot);
            if let Some((index, id)) = completed {
                let _ = progress.send(ProgressEvent::StepCompleted { index, id });
            }

            match outcome {
                TickOutcome::Progressed | TickOutcome::BetweenSteps => {}
                TickOutcome::StepCompleted(_) => {
                    tokio::time::sleep(config.step_pause).await;
                    wizard.write().await.activate_next_step();
                }
                TickOutcome::Finished => {
                    let _ = progress.send(ProgressEvent::RunCompleted);
                    break;
                }
                TickOutcome::NotRunning => {
                    debug!("Generation ticker stopping: run is not active");
                    break;
                }
            }
        }
    })
}

/// Spawn the fixed orchestrator hold that clears the `generating` flag.
pub fn spawn_generating_hold(
    wizard: Arc<RwLock<Wizard>>,
    config: WizardConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(config.generating_hold).await;
        wizard.write().await.clear_generating();
        debug!("Generating hold elapsed");
    })
}
