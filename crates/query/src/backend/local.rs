//! Local backend for querying exported access history files
//!
//! Reads newline-delimited JSON, one [`AccessRecord`] per line. Files are
//! read as bytes, so a line that is not valid UTF-8 is skipped like any other
//! malformed line.
//!
//! # File Organization
//!
//! Any layout below the base path works; files are discovered recursively:
//! ```text
//! {base_path}/
//! └── 2024-05-10/
//!     ├── access_history_00.jsonl
//!     └── access_history_01.ndjson
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;

use crate::backend::{QueryBackend, scan_records};
use crate::error::QueryError;
use crate::event::{AccessEvent, AccessRecord};
use crate::scan::EventScan;

/// File extensions recognized as access history exports
const EXTENSIONS: &[&str] = &["jsonl", "ndjson"];

/// Backend over access history files on local disk
#[derive(Debug, Clone)]
pub struct LocalBackend {
    /// Base path to the exported files
    base_path: PathBuf,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Base path files are discovered under
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Discover all export files under the base path, sorted by path
    fn discover_files(&self) -> Result<Vec<PathBuf>, QueryError> {
        let mut files = Vec::new();
        for ext in EXTENSIONS {
            let pattern = format!("{}/**/*.{}", self.base_path.display(), ext);
            for entry in glob::glob(&pattern)? {
                files.push(entry?);
            }
        }

        if files.is_empty() {
            return Err(QueryError::NoDataFiles(format!(
                "no .jsonl or .ndjson files under {}",
                self.base_path.display()
            )));
        }

        files.sort();

        tracing::debug!(
            path = %self.base_path.display(),
            file_count = files.len(),
            "discovered access history files"
        );

        Ok(files)
    }

    /// Load every record from every file
    async fn load_records(&self) -> Result<Vec<AccessRecord>, QueryError> {
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for path in self.discover_files()? {
            let contents = tokio::fs::read(&path).await?;
            skipped += parse_lines(&path, &contents, &mut records);
        }

        if skipped > 0 {
            tracing::warn!(
                skipped = skipped,
                loaded = records.len(),
                "skipped malformed access history lines"
            );
        }

        Ok(records)
    }
}

/// Parse one file's lines into `records`, returning how many lines were skipped
fn parse_lines(path: &Path, contents: &[u8], records: &mut Vec<AccessRecord>) -> usize {
    let mut skipped = 0;

    for (line_no, line) in contents.split(|&b| b == b'\n').enumerate() {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_slice::<AccessRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::debug!(
                    file = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "malformed access history line"
                );
            }
        }
    }

    skipped
}

#[async_trait]
impl QueryBackend for LocalBackend {
    async fn scan(&self, scan: &EventScan) -> Result<Vec<AccessEvent>, QueryError> {
        let start = Instant::now();

        let records = self.load_records().await?;
        let events = scan_records(records.iter(), scan);

        tracing::debug!(
            records = records.len(),
            events = events.len(),
            object_set = %scan.object_set,
            time_ms = start.elapsed().as_millis() as u64,
            "scanned local access history"
        );

        Ok(events)
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        self.discover_files().map(|_| ())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
#[path = "local_test.rs"]
mod local_test;
