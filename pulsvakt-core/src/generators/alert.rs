//! Alert state machine.
//!
//! Owns one boolean alert state per patient and decides, on each tick,
//! whether to flip it. A transition emits exactly one [`AlertEvent`];
//! anything else is a no-op tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::GeneratorError;
use crate::events::{AlertEvent, AlertStatus};

/// Chance that an active alert resolves on a given tick.
const RESOLVE_PROBABILITY: f64 = 0.9;

/// Average alert arrival rate per tick (Poisson).
const ALERT_RATE_LAMBDA: f64 = 0.1;

/// Probability of at least one alert arrival in one tick at rate
/// [`ALERT_RATE_LAMBDA`]: `1 - e^(-lambda)`, not a flat `lambda`.
#[inline]
pub fn trigger_probability() -> f64 {
    -(-ALERT_RATE_LAMBDA).exp_m1()
}

/// Generates alert state transitions for a fixed patient population.
///
/// State is an arena of atomic cells indexed by patient id (`false` =
/// resolved, `true` = triggered), allocated once at construction and never
/// resized. Concurrent calls for *different* patient ids are safe; the
/// driver contract guarantees at most one in-flight call per id.
pub struct AlertGenerator {
    states: Vec<AtomicBool>,
    rng: Mutex<SmallRng>,
}

impl AlertGenerator {
    /// Creates a generator for ids `1..=patient_count` with an
    /// entropy-seeded random source.
    pub fn new(patient_count: u32) -> Self {
        Self::with_seed(patient_count, rand::random())
    }

    /// Creates a generator with a fixed seed. Identical seeds and tick
    /// sequences produce identical event sequences.
    pub fn with_seed(patient_count: u32, seed: u64) -> Self {
        let states = (0..patient_count).map(|_| AtomicBool::new(false)).collect();
        Self {
            states,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Number of patients this generator was sized for.
    #[inline]
    pub fn patient_count(&self) -> u32 {
        self.states.len() as u32
    }

    /// Runs one tick for one patient.
    ///
    /// Returns `Ok(Some(event))` on a state transition, `Ok(None)` on a
    /// no-op tick, and [`GeneratorError::UnknownPatient`] for ids outside
    /// `1..=patient_count`. The patient's state is never left partially
    /// transitioned: the cell is written only together with an emitted
    /// event.
    pub fn generate(&self, patient_id: u32) -> Result<Option<AlertEvent>, GeneratorError> {
        let cell = self.state_cell(patient_id)?;
        let draw: f64 = self.rng.lock().random();

        if cell.load(Ordering::Acquire) {
            if draw < RESOLVE_PROBABILITY {
                cell.store(false, Ordering::Release);
                return Ok(Some(AlertEvent::new(
                    patient_id,
                    unix_millis(),
                    AlertStatus::Resolved,
                )));
            }
        } else if draw < trigger_probability() {
            cell.store(true, Ordering::Release);
            return Ok(Some(AlertEvent::new(
                patient_id,
                unix_millis(),
                AlertStatus::Triggered,
            )));
        }

        Ok(None)
    }

    fn state_cell(&self, patient_id: u32) -> Result<&AtomicBool, GeneratorError> {
        if patient_id == 0 {
            return Err(GeneratorError::UnknownPatient(patient_id));
        }
        self.states
            .get(patient_id as usize - 1)
            .ok_or(GeneratorError::UnknownPatient(patient_id))
    }

    #[cfg(test)]
    fn force_triggered(&self, patient_id: u32) {
        self.states[patient_id as usize - 1].store(true, Ordering::Release);
    }
}

/// A pre-epoch clock saturates to 0 rather than panicking; `generate`
/// must never crash the driver loop.
#[inline]
fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
