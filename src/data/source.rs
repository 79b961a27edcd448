//! Data Source Module
//! Yields the raw bytes of the protein atlas table, from the network, a local
//! file or memory.

use crate::data::LoaderError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Public download of the Human Protein Atlas summary table.
pub const HPA_DATASET_URL: &str = "https://www.proteinatlas.org/download/proteinatlas.tsv.zip";

/// Anything that can hand over the raw (possibly zipped) tabular bytes.
pub trait DataSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>, LoaderError>;

    /// Human readable origin, shown in the control panel.
    fn describe(&self) -> String;
}

/// Downloads the dataset over HTTP(S).
pub struct RemoteSource {
    url: String,
    timeout: Duration,
}

impl RemoteSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RemoteSource {
    fn default() -> Self {
        Self::new(HPA_DATASET_URL, Duration::from_secs(300))
    }
}

impl DataSource for RemoteSource {
    fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        info!(url = %self.url, "downloading dataset");

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;

        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::HttpStatus {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let bytes = response.bytes()?.to_vec();
        info!(bytes = bytes.len(), "download complete");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads a local `.tsv` or `.tsv.zip` file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        let bytes = std::fs::read(&self.path)?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read dataset file");
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Serves bytes already held in memory.
pub struct MemorySource {
    label: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }
}

impl DataSource for MemorySource {
    fn fetch(&self) -> Result<Vec<u8>, LoaderError> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
