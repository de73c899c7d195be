use super::chunk::{Chunk, ChunkPlanner};
use super::*;
use common::TaggedKey;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Per-worker line counters, summed by the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub lines: usize,
    pub candidates: usize,
    pub malformed: usize,
    pub matched: usize,
}

impl ScanStats {
    fn merge(&mut self, other: ScanStats) {
        self.lines += other.lines;
        self.candidates += other.candidates;
        self.malformed += other.malformed;
        self.matched += other.matched;
    }
}

/// What one worker sends back.
#[derive(Debug, Default)]
pub struct ChunkResult {
    pub payloads: Vec<String>,
    pub stats: ScanStats,
}

#[derive(Debug, Default)]
pub struct SearchResult {
    /// Matching payloads in no particular order.
    pub payloads: Vec<String>,
    pub stats: ScanStats,
    pub files: usize,
    pub chunks: usize,
}

impl SearchResult {
    fn absorb(&mut self, chunk: ChunkResult) {
        self.payloads.extend(chunk.payloads);
        self.stats.merge(chunk.stats);
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineVerdict<'a> {
    /// No tag marker; not a game event line.
    Unrelated,
    /// Game event line for some other match.
    OtherMatch,
    Matched(&'a str),
    Malformed(String),
}

#[derive(Debug)]
struct WorkUnit {
    path: Arc<Path>,
    chunk: Chunk,
    compressed: bool,
}

/// Scans log files for one match key using a pool that lives only as long
/// as the call.
#[derive(Debug, Clone)]
pub struct KeySearch {
    tag_marker: Arc<str>,
    chunk_size: u64,
    workers: usize,
}

impl KeySearch {
    pub fn new(tag_marker: &str, chunk_size: u64, workers: usize) -> Self {
        Self {
            tag_marker: Arc::from(tag_marker),
            chunk_size,
            workers: workers.max(1),
        }
    }

    pub fn from_source(source: &ReplaySource) -> Self {
        Self::new(&source.tag_marker, source.chunk_size, source.workers)
    }

    /// Resolves `pattern` and scans every file. Empty results are an error here.
    pub fn search(&self, key: &MatchKey, pattern: &str) -> ReplayResult<SearchResult> {
        let files = resolve_glob(pattern)?;
        if files.is_empty() {
            return Err(ReplayError::NoLogFilesFound {
                pattern: pattern.to_string(),
            });
        }

        let result = self.scan_files(key, &files)?;
        if result.payloads.is_empty() {
            return Err(ReplayError::NoMatchingRecords { key: key.clone() });
        }
        Ok(result)
    }

    /// Scans `files` and returns whatever matched, possibly nothing.
    pub fn scan_files(&self, key: &MatchKey, files: &[PathBuf]) -> ReplayResult<SearchResult> {
        let started = Instant::now();
        let units = self.plan(files)?;
        let chunks = units.len();

        info!(
            "Searching {} chunks across {} files for {} with {} workers",
            chunks,
            files.len(),
            key,
            self.workers
        );

        let pool = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(self.workers)
            .thread_name("key-search")
            .build()
            .map_err(|e| ReplayError::WorkerPool(e.to_string()))?;

        let key = Arc::new(key.clone());
        let marker = self.tag_marker.clone();
        let mut result = pool.block_on(async move {
            let mut jobs = JoinSet::new();
            for unit in units {
                let key = key.clone();
                let marker = marker.clone();
                jobs.spawn_blocking(move || scan_unit(&unit, &key, &marker));
            }

            // Barrier: every unit reports before anything is returned
            let mut result = SearchResult::default();
            while let Some(joined) = jobs.join_next().await {
                let chunk = joined.map_err(|e| ReplayError::WorkerPool(e.to_string()))??;
                result.absorb(chunk);
            }
            Ok::<_, ReplayError>(result)
        })?;
        drop(pool);

        result.files = files.len();
        result.chunks = chunks;
        info!(
            "Search finished in {:?}: {} matched of {} candidates ({} lines, {} malformed)",
            started.elapsed(),
            result.stats.matched,
            result.stats.candidates,
            result.stats.lines,
            result.stats.malformed
        );
        Ok(result)
    }

    fn plan(&self, files: &[PathBuf]) -> ReplayResult<Vec<WorkUnit>> {
        let mut units = Vec::new();
        for path in files {
            let planner = ChunkPlanner::new(path.clone(), self.chunk_size)?;
            let compressed = planner.is_compressed();
            let shared: Arc<Path> = Arc::from(path.as_path());
            let before = units.len();
            for chunk in planner.chunks()? {
                units.push(WorkUnit {
                    path: shared.clone(),
                    chunk: chunk?,
                    compressed,
                });
            }
            debug!("Planned {} chunks for {:?}", units.len() - before, path);
        }
        Ok(units)
    }
}

fn scan_unit(unit: &WorkUnit, key: &MatchKey, marker: &str) -> ReplayResult<ChunkResult> {
    let data = read_unit(unit).map_err(|e| ReplayError::io(unit.path.to_path_buf(), e))?;
    Ok(scan_lines(&data, key, marker))
}

fn read_unit(unit: &WorkUnit) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(&unit.path)?;
    let mut data = Vec::new();
    if unit.compressed {
        GzDecoder::new(file).read_to_end(&mut data)?;
    } else {
        data.reserve(unit.chunk.len as usize);
        file.seek(SeekFrom::Start(unit.chunk.start))?;
        file.take(unit.chunk.len).read_to_end(&mut data)?;
    }
    Ok(data)
}

/// Filters one chunk's bytes down to the payloads of `key`.
pub fn scan_lines(data: &[u8], key: &MatchKey, marker: &str) -> ChunkResult {
    let mut result = ChunkResult::default();

    for raw in data.split(|&b| b == b'\n') {
        if raw.is_empty() {
            continue;
        }
        result.stats.lines += 1;

        let line = String::from_utf8_lossy(raw);
        let line = line.strip_suffix('\r').unwrap_or(&line);
        match classify_line(line, key, marker) {
            LineVerdict::Unrelated => {}
            LineVerdict::OtherMatch => result.stats.candidates += 1,
            LineVerdict::Matched(payload) => {
                result.stats.candidates += 1;
                result.stats.matched += 1;
                result.payloads.push(payload.to_string());
            }
            LineVerdict::Malformed(_) => {
                result.stats.candidates += 1;
                result.stats.malformed += 1;
            }
        }
    }

    result
}

/// `<timestamp>\t<tag>\t<payload>`; only tags carrying `marker` are considered.
pub fn classify_line<'a>(line: &'a str, key: &MatchKey, marker: &str) -> LineVerdict<'a> {
    let mut fields = line.splitn(3, '\t');
    let (Some(_timestamp), Some(tag), Some(payload)) = (fields.next(), fields.next(), fields.next())
    else {
        return if line.contains(marker) {
            LineVerdict::Malformed("fewer than 3 tab-separated fields".to_string())
        } else {
            LineVerdict::Unrelated
        };
    };

    if !tag.contains(marker) {
        return LineVerdict::Unrelated;
    }

    let tagged = match TaggedKey::from_tag(tag, marker) {
        Ok(tagged) => tagged,
        Err(e) => return LineVerdict::Malformed(e.to_string()),
    };

    if !tagged.ids_match(key) {
        return LineVerdict::OtherMatch;
    }

    match tagged.start_time() {
        Ok(start) if start == key.start_time => LineVerdict::Matched(payload),
        Ok(_) => LineVerdict::OtherMatch,
        Err(e) => LineVerdict::Malformed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StartTime;

    const MARKER: &str = "luasnake.info.";

    fn key() -> MatchKey {
        MatchKey::new("7", "robo", StartTime::from_epoch("1519512345").unwrap())
    }

    #[test]
    fn classifies_lines() {
        let key = key();
        let hit = "2018-02-24\tluasnake.info.7:robo:1519512345\t{\"turn\":0}";
        assert_eq!(classify_line(hit, &key, MARKER), LineVerdict::Matched("{\"turn\":0}"));

        let unrelated = "2018-02-24\tnginx.access\tGET /";
        assert_eq!(classify_line(unrelated, &key, MARKER), LineVerdict::Unrelated);

        let other = "2018-02-24\tluasnake.info.8:robo:1519512345\t{}";
        assert_eq!(classify_line(other, &key, MARKER), LineVerdict::OtherMatch);

        let blank_epoch = "2018-02-24\tluasnake.info.7:robo:\t{}";
        assert!(matches!(classify_line(blank_epoch, &key, MARKER), LineVerdict::Malformed(_)));

        let short = "2018-02-24\tluasnake.info.7:robo:1519512345";
        assert!(matches!(classify_line(short, &key, MARKER), LineVerdict::Malformed(_)));
    }

    #[test]
    fn scan_counts_and_tolerates_crlf() {
        let data = b"t\tluasnake.info.7:robo:1519512345\t{\"a\":1}\r\n\
                     t\tluasnake.info.7:robo:1519512999\t{\"a\":2}\n\
                     garbage\n\
                     t\tluasnake.info.7:robo\t{}\n";
        let result = scan_lines(data, &key(), MARKER);
        assert_eq!(result.payloads, vec!["{\"a\":1}".to_string()]);
        assert_eq!(
            result.stats,
            ScanStats {
                lines: 4,
                candidates: 3,
                malformed: 1,
                matched: 1,
            }
        );
    }
}
