//! Knowledge Provider — static domain knowledge injected into prompts.
//!
//! Concatenates every `.yaml` file under the knowledge directory into a
//! single text blob. Loaded lazily on first use and cached for the process
//! lifetime; repeated calls return the identical cached value without
//! re-reading sources.

use std::path::PathBuf;

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::errors::AppError;

/// Lazily-loaded, process-cached knowledge text.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    dir: PathBuf,
    cache: OnceCell<String>,
}

impl KnowledgeBase {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            cache: OnceCell::new(),
        }
    }

    /// Returns the concatenated knowledge text, reading the sources on the
    /// first call only.
    pub fn load(&self) -> Result<&str, AppError> {
        self.cache
            .get_or_try_init(|| self.read_sources())
            .map(String::as_str)
    }

    fn read_sources(&self) -> Result<String, AppError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            AppError::Configuration(format!(
                "Knowledge directory not found at {}: {e}",
                self.dir.display()
            ))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
            .collect();
        // Filename order keeps the blob deterministic across platforms
        paths.sort();

        if paths.is_empty() {
            warn!("No knowledge files found in {}", self.dir.display());
            return Ok(String::new());
        }

        let mut all_knowledge = String::new();
        for path in &paths {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AppError::Configuration(format!(
                    "Failed to read knowledge file {}: {e}",
                    path.display()
                ))
            })?;
            all_knowledge.push_str(&content);
            all_knowledge.push('\n');
        }

        info!(
            "Loaded {} knowledge files ({} bytes) from {}",
            paths.len(),
            all_knowledge.len(),
            self.dir.display()
        );

        Ok(all_knowledge)
    }
}
