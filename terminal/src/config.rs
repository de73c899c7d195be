use clap::Parser;
use std::path::PathBuf;

use crate::replay::chunk::DEFAULT_CHUNK_SIZE;
use crate::replay::{default_workers, ReplaySource};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "snake-replay",
    about = "Find a snake match in the game logs and replay it turn by turn"
)]
pub struct ReplayConfig {
    /// Directory holding the replay index and game log files
    #[arg(long, env = "REPLAY_LOG_DIR", default_value = "/var/log/td-agent/")]
    pub log_dir: PathBuf,

    /// File name pattern of the replay index files
    #[arg(long, env = "REPLAY_INDEX_PATTERN", default_value = "replays.*")]
    pub index_pattern: String,

    /// File name pattern of the game log files
    #[arg(long, env = "REPLAY_LOG_PATTERN", default_value = "luasnake.*")]
    pub log_pattern: String,

    /// Literal text in a log tag that marks a game event line
    #[arg(long, env = "REPLAY_TAG_MARKER", default_value = "luasnake.info.")]
    pub tag_marker: String,

    /// Target bytes per search chunk
    #[arg(long, env = "REPLAY_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// Search workers (defaults to the number of CPUs)
    #[arg(long, env = "REPLAY_WORKERS")]
    pub workers: Option<usize>,

    /// Use the line prompt instead of the full-screen viewer
    #[arg(long)]
    pub plain: bool,

    /// Catalog index to replay without prompting (-1 for the most recent)
    #[arg(long, allow_hyphen_values = true)]
    pub select: Option<i64>,

    /// Write logs here instead of stderr
    #[arg(long, env = "REPLAY_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl ReplayConfig {
    pub fn source(&self) -> ReplaySource {
        ReplaySource {
            log_dir: self.log_dir.clone(),
            index_pattern: self.index_pattern.clone(),
            log_pattern: self.log_pattern.clone(),
            tag_marker: self.tag_marker.clone(),
            chunk_size: self.chunk_size,
            workers: self.workers.unwrap_or_else(default_workers),
        }
    }

    /// Default log level when `RUST_LOG` is unset.
    pub fn default_log_level(&self) -> &'static str {
        if self.plain || self.log_file.is_some() {
            "info"
        } else {
            "warn"
        }
    }
}
