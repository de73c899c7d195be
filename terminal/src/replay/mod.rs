pub mod catalog;
pub mod chunk;
pub mod navigator;
pub mod reader;
pub mod search;

use common::{MatchKey, ReplayError, ReplayResult, Timeline};
use std::path::{Path, PathBuf};

/// Where the index and log files live and how to recognise game lines.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    pub log_dir: PathBuf,
    pub index_pattern: String,
    pub log_pattern: String,
    pub tag_marker: String,
    pub chunk_size: u64,
    pub workers: usize,
}

impl ReplaySource {
    pub fn index_glob(&self) -> String {
        self.log_dir.join(&self.index_pattern).to_string_lossy().into_owned()
    }

    pub fn log_glob(&self) -> String {
        self.log_dir.join(&self.log_pattern).to_string_lossy().into_owned()
    }
}

impl Default for ReplaySource {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("/var/log/td-agent/"),
            index_pattern: "replays.*".to_string(),
            log_pattern: "luasnake.*".to_string(),
            tag_marker: "luasnake.info.".to_string(),
            chunk_size: chunk::DEFAULT_CHUNK_SIZE,
            workers: default_workers(),
        }
    }
}

pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Files matching `pattern`, sorted by path.
pub fn resolve_glob(pattern: &str) -> ReplayResult<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|e| ReplayError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping unreadable path {:?}: {}", e.path(), e.error()),
        }
    }
    files.sort();
    Ok(files)
}
