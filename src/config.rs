//! Configuration types.

use std::time::Duration;

/// Wizard configuration.
///
/// The timing constants reproduce the original UI choreography: the
/// generation animation ticks every 100ms with a random increment below
/// 20, pauses 500ms between steps, and the orchestrator holds its
/// `generating` flag for a fixed 3s independently of the step ticker.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Maximum accepted upload size in bytes (inclusive).
    pub max_file_bytes: u64,
    /// Interval between generation progress ticks.
    pub tick_interval: Duration,
    /// Pause between completion of one step and activation of the next.
    pub step_pause: Duration,
    /// Upper bound (exclusive) of the random per-tick progress increment.
    pub max_increment: f64,
    /// How long the orchestrator keeps its `generating` flag raised.
    pub generating_hold: Duration,
    /// Capacity of the progress broadcast channel.
    pub broadcast_capacity: usize,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024, // 10MB
            tick_interval: Duration::from_millis(100),
            step_pause: Duration::from_millis(500),
            max_increment: 20.0,
            generating_hold: Duration::from_secs(3),
            broadcast_capacity: 256,
        }
    }
}
