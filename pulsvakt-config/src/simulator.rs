//! Simulation parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SimulatorConfig {
    /// Number of simulated patients; ids run `1..=patient_count`.
    #[validate(range(min = 1))]
    pub patient_count: u32,

    /// Seed for the shared random source. Fixed seed, fixed event sequence.
    pub seed: u64,

    /// Wall-clock spacing between generation ticks.
    #[validate(range(min = 1))]
    pub tick_interval_ms: u64,

    /// Number of ticks to run before stopping. 0 means run until killed.
    pub tick_count: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            patient_count: 50,
            seed: 42,
            tick_interval_ms: 1000,
            tick_count: 0,
        }
    }
}
