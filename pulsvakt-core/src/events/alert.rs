//! Alert state-transition events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label under which all alert events are filed and routed.
pub const ALERT_LABEL: &str = "Alert";

/// Direction of an alert state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Triggered,
    Resolved,
}

impl AlertStatus {
    /// Wire representation used by every output sink.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::Triggered => "triggered",
            AlertStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert transition record with metadata.
///
/// Produced only when a patient's alert state actually flips; a no-op tick
/// produces no event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Stable patient identifier, `1..=patient_count`.
    pub patient_id: u32,

    /// Wall-clock time of the transition in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,

    /// New state the patient transitioned into.
    pub status: AlertStatus,
}

impl AlertEvent {
    #[inline]
    pub fn new(patient_id: u32, timestamp_ms: i64, status: AlertStatus) -> Self {
        Self {
            patient_id,
            timestamp_ms,
            status,
        }
    }

    /// All alert events carry the same label.
    #[inline]
    pub fn label(&self) -> &'static str {
        ALERT_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_format() {
        assert_eq!(AlertStatus::Triggered.as_str(), "triggered");
        assert_eq!(AlertStatus::Resolved.as_str(), "resolved");
        assert_eq!(AlertStatus::Resolved.to_string(), "resolved");
    }

    #[test]
    fn event_carries_fixed_label() {
        let event = AlertEvent::new(7, 1_700_000_000_000, AlertStatus::Triggered);
        assert_eq!(event.label(), "Alert");
    }
}
