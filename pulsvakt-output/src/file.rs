//! Append-only file sink, one file per event label.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::sink::OutputSink;

/// Writes one formatted record per delivery to `<base>/<label>.txt`.
///
/// Files are opened in append mode and closed again on every call; no
/// long-lived handles are held. The label-to-path mapping is resolved at
/// most once per distinct label and cached for the process lifetime. The
/// path is a pure function of the label, so a racing first write on the
/// same label lands on the same file either way.
pub struct FileSink {
    base_directory: PathBuf,
    paths: RwLock<HashMap<String, PathBuf>>,
}

impl FileSink {
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
            paths: RwLock::new(HashMap::new()),
        }
    }

    fn path_for(&self, label: &str) -> PathBuf {
        if let Some(path) = self.paths.read().get(label) {
            return path.clone();
        }
        self.paths
            .write()
            .entry(label.to_string())
            .or_insert_with(|| self.base_directory.join(format!("{label}.txt")))
            .clone()
    }
}

#[async_trait]
impl OutputSink for FileSink {
    async fn deliver(&self, patient_id: u32, timestamp_ms: i64, label: &str, data: &str) {
        if let Err(e) = tokio::fs::create_dir_all(&self.base_directory).await {
            warn!(
                error = %e,
                "Error creating base directory {}",
                self.base_directory.display()
            );
            return;
        }

        let path = self.path_for(label);
        let line =
            format!("Patient ID: {patient_id}, Timestamp: {timestamp_ms}, Label: {label}, Data: {data}\n");

        if let Err(e) = append_line(&path, &line).await {
            warn!(error = %e, "Error writing to file {}", path.display());
        }
    }
}

/// One line per call; the write lands as a single O_APPEND write so
/// concurrent deliveries never interleave within a line.
async fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
