//! Simulation runtime - coordinates tick scheduling, generation, and delivery.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument, trace};

use pulsvakt_config::PulsvaktConfig;
use pulsvakt_core::generators::AlertGenerator;
use pulsvakt_output::OutputSink;
use pulsvakt_telemetry::MetricsRecorder;

/// Coordinates event generation and delivery for the whole patient
/// population.
///
/// The sink is injected; the runtime never learns which concrete delivery
/// strategy it drives. Sink failures stay inside the sink boundary and
/// cannot roll back a generator state transition.
pub struct SimulationRuntime {
    config: Arc<PulsvaktConfig>,
    generator: Arc<AlertGenerator>,
    sink: Arc<dyn OutputSink>,
    /// Metrics collection subsystem
    pub metrics: Arc<MetricsRecorder>,
}

impl SimulationRuntime {
    /// Creates a runtime with a generator seeded from the configuration.
    pub fn new(config: PulsvaktConfig, sink: Arc<dyn OutputSink>) -> Self {
        info!("Initializing simulation runtime");
        debug!("Simulator config: {:?}", config.simulator);

        let generator = Arc::new(AlertGenerator::with_seed(
            config.simulator.patient_count,
            config.simulator.seed,
        ));

        Self {
            config: Arc::new(config),
            generator,
            sink,
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Runs one tick for one patient and delivers the event, if any.
    ///
    /// Generator errors are reported but do not abort the batch: the
    /// offending patient id is logged and the tick simply produces no
    /// event.
    pub async fn run_patient(&self, patient_id: u32) {
        match self.generator.generate(patient_id) {
            Ok(Some(event)) => {
                trace!(patient_id, status = %event.status, "Alert transition");
                self.metrics.events_generated.inc();
                self.sink.deliver_event(&event).await;
                self.metrics.events_delivered.inc();
            }
            Ok(None) => {}
            Err(e) => {
                self.metrics.generator_errors.inc();
                error!(patient_id, error = %e, "Error generating alert data");
            }
        }
    }

    /// Runs one generation tick across the whole population.
    pub async fn run_tick(&self) {
        for patient_id in 1..=self.generator.patient_count() {
            self.run_patient(patient_id).await;
        }
    }

    /// Fast-forward mode: `ticks` generation rounds back to back, no
    /// waiting between them.
    #[instrument(skip(self))]
    pub async fn run_ticks(&self, ticks: u64) {
        for _ in 0..ticks {
            self.run_tick().await;
        }
        info!(ticks, "Simulation finished");
    }

    /// Wall-clock mode: one tick per configured interval. A tick budget of
    /// 0 runs until the process is killed.
    #[instrument(skip(self))]
    pub async fn run(&self) {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.config.simulator.tick_interval_ms));
        let budget = self.config.simulator.tick_count;

        info!(
            patients = self.config.simulator.patient_count,
            interval_ms = self.config.simulator.tick_interval_ms,
            "Starting generation loop"
        );

        let mut completed = 0u64;
        loop {
            interval.tick().await;
            self.run_tick().await;
            completed += 1;
            if budget != 0 && completed >= budget {
                break;
            }
        }
        info!(ticks = completed, "Generation loop finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsvakt_output::MemorySink;
    use std::collections::HashMap;
    use tracing_test::traced_test;

    fn test_config(patients: u32, seed: u64) -> PulsvaktConfig {
        let mut config = PulsvaktConfig::default();
        config.simulator.patient_count = patients;
        config.simulator.seed = seed;
        config
    }

    #[tokio::test]
    async fn delivers_every_emitted_event() {
        let sink = Arc::new(MemorySink::new());
        let runtime = SimulationRuntime::new(test_config(5, 42), sink.clone());

        runtime.run_ticks(500).await;

        let records = sink.records();
        assert!(!records.is_empty());
        assert_eq!(records.len() as f64, runtime.metrics.events_generated.get());
        assert_eq!(records.len() as f64, runtime.metrics.events_delivered.get());
        assert_eq!(runtime.metrics.generator_errors.get(), 0.0);

        // Per-patient statuses strictly alternate, starting triggered.
        let mut last: HashMap<u32, String> = HashMap::new();
        for record in records {
            assert_eq!(record.label, "Alert");
            match last.get(&record.patient_id) {
                None => assert_eq!(record.data, "triggered"),
                Some(previous) => assert_ne!(previous, &record.data),
            }
            last.insert(record.patient_id, record.data);
        }
    }

    #[tokio::test]
    async fn seeded_runs_are_reproducible() {
        let sink_a = Arc::new(MemorySink::new());
        let sink_b = Arc::new(MemorySink::new());
        let runtime_a = SimulationRuntime::new(test_config(3, 7), sink_a.clone());
        let runtime_b = SimulationRuntime::new(test_config(3, 7), sink_b.clone());

        runtime_a.run_ticks(300).await;
        runtime_b.run_ticks(300).await;

        let order = |records: Vec<pulsvakt_output::DeliveredRecord>| {
            records
                .into_iter()
                .map(|r| (r.patient_id, r.data))
                .collect::<Vec<_>>()
        };
        assert_eq!(order(sink_a.records()), order(sink_b.records()));
    }

    #[traced_test]
    #[tokio::test]
    async fn bad_patient_id_is_logged_and_skipped() {
        let sink = Arc::new(MemorySink::new());
        let runtime = SimulationRuntime::new(test_config(5, 1), sink.clone());

        runtime.run_patient(999).await;

        assert!(sink.is_empty());
        assert_eq!(runtime.metrics.generator_errors.get(), 1.0);
        assert!(logs_contain("Error generating alert data"));
    }
}
