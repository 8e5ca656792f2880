//! The output capability consumed by drivers.

use async_trait::async_trait;
use pulsvakt_core::events::AlertEvent;

/// A delivery target for generated events.
///
/// Implementations are injected into the driver; selection happens by
/// composition, not by the producer. `deliver` must never propagate a
/// failure past this boundary: sinks log their own I/O errors and drop
/// the record.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Delivers one event record, best effort.
    async fn deliver(&self, patient_id: u32, timestamp_ms: i64, label: &str, data: &str);

    /// Convenience for alert events.
    async fn deliver_event(&self, event: &AlertEvent) {
        self.deliver(
            event.patient_id,
            event.timestamp_ms,
            event.label(),
            event.status.as_str(),
        )
        .await
    }
}
