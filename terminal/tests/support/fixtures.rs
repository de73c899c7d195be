use common::{MatchKey, StartTime};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;
use terminal::replay::ReplaySource;

pub const EPOCH: &str = "1519512345";
pub const MARKER: &str = "luasnake.info.";

/// A throwaway td-agent style log directory.
pub struct LogFixture {
    pub dir: TempDir,
}

impl LogFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn write(&self, name: &str, lines: &[String]) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut contents = lines.join("\n");
        contents.push('\n');
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn write_gz(&self, name: &str, lines: &[String]) -> PathBuf {
        let path = self.dir.path().join(name);
        let file = fs::File::create(&path).expect("create gz fixture");
        let mut encoder = GzEncoder::new(file, Compression::default());
        for line in lines {
            writeln!(encoder, "{}", line).expect("write gz line");
        }
        encoder.finish().expect("finish gz fixture");
        path
    }

    /// Small chunks and several workers so even tiny fixtures get split.
    pub fn source(&self) -> ReplaySource {
        ReplaySource {
            log_dir: self.dir.path().to_path_buf(),
            chunk_size: 64,
            workers: 4,
            ..ReplaySource::default()
        }
    }
}

pub fn match_key(match_id: &str, participant: &str, epoch: &str) -> MatchKey {
    MatchKey::new(match_id, participant, StartTime::from_epoch(epoch).unwrap())
}

pub fn log_line(match_id: &str, participant: &str, epoch: &str, payload: &str) -> String {
    format!("2018-02-24T22:45:45+00:00\t{MARKER}{match_id}:{participant}:{epoch}\t{payload}")
}

pub fn index_line(match_id: &str, participant: &str, epoch: &str) -> String {
    format!(
        "2018-02-24T22:45:45+00:00\treplays\t{{\"log_id\":\"{match_id}:{participant}:{epoch}\",\"time\":\"{epoch}\"}}"
    )
}

pub fn food_payload(turn: u32, x: u16, y: u16) -> String {
    format!(r#"{{"item":"food","turn":{turn},"coordinates":{{"x":{x},"y":{y}}}}}"#)
}

pub fn segment_payload(who: &str, item: &str, turn: u32, x: u16, y: u16, health: u32) -> String {
    format!(
        r#"{{"who":"{who}","item":"{item}","turn":{turn},"coordinates":{{"x":{x},"y":{y}}},"length":3,"health":{health},"name":"{who}-bot"}}"#
    )
}
