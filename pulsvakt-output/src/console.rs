//! Stdout sink for interactive runs.

use async_trait::async_trait;

use crate::sink::OutputSink;

/// Prints each event as the same comma-separated line the TCP sink sends.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputSink for ConsoleSink {
    async fn deliver(&self, patient_id: u32, timestamp_ms: i64, label: &str, data: &str) {
        println!("{patient_id},{timestamp_ms},{label},{data}");
    }
}
