//! ## pulsvakt-telemetry::metrics
//! **Prometheus counters for the generation pipeline**
//!
//! Tracks how many events the generators emitted, how many reached a sink
//! boundary, and how many ticks hit a generator error. Delivery is
//! best-effort, so generated and delivered counts drifting apart is a
//! signal worth watching, not a bug.

use prometheus::{Counter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub events_generated: Counter,
    pub events_delivered: Counter,
    pub generator_errors: Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let events_generated = Counter::new(
            "pulsvakt_events_generated_total",
            "Total events emitted by generators",
        )
        .unwrap();
        let events_delivered = Counter::new(
            "pulsvakt_events_delivered_total",
            "Total events handed to an output sink",
        )
        .unwrap();
        let generator_errors = Counter::new(
            "pulsvakt_generator_errors_total",
            "Total ticks that failed with a generator error",
        )
        .unwrap();

        registry
            .register(Box::new(events_generated.clone()))
            .unwrap();
        registry
            .register(Box::new(events_delivered.clone()))
            .unwrap();
        registry
            .register(Box::new(generator_errors.clone()))
            .unwrap();

        Self {
            registry,
            events_generated,
            events_delivered,
            generator_errors,
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_in_text_exposition() {
        let metrics = MetricsRecorder::new();
        metrics.events_generated.inc();
        metrics.events_delivered.inc();

        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("pulsvakt_events_generated_total 1"));
        assert!(text.contains("pulsvakt_events_delivered_total 1"));
        assert!(text.contains("pulsvakt_generator_errors_total 0"));
    }
}
