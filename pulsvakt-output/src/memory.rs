//! In-memory sink for tests and diagnostics.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::sink::OutputSink;

/// One delivered record, exactly as handed to the sink boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeliveredRecord {
    pub patient_id: u32,
    pub timestamp_ms: i64,
    pub label: String,
    pub data: String,
}

/// Collects every delivery in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<DeliveredRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DeliveredRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[async_trait]
impl OutputSink for MemorySink {
    async fn deliver(&self, patient_id: u32, timestamp_ms: i64, label: &str, data: &str) {
        self.records.lock().push(DeliveredRecord {
            patient_id,
            timestamp_ms,
            label: label.to_string(),
            data: data.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsvakt_core::events::{AlertEvent, AlertStatus};

    #[tokio::test]
    async fn records_events_in_order() {
        let sink = MemorySink::new();
        let event = AlertEvent::new(4, 42, AlertStatus::Triggered);

        sink.deliver_event(&event).await;
        sink.deliver(4, 43, "Alert", "resolved").await;

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, "triggered");
        assert_eq!(records[0].label, "Alert");
        assert_eq!(records[1].data, "resolved");
    }
}
