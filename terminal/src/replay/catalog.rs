use super::*;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct IndexEntry {
    log_id: String,
}

/// Ordered list of replayable matches read from the index files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCatalog {
    entries: Vec<MatchKey>,
    skipped: usize,
}

impl MatchCatalog {
    pub fn from_entries(entries: Vec<MatchKey>) -> Self {
        Self {
            entries,
            skipped: 0,
        }
    }

    /// Reads every index file matching `pattern`.
    pub fn load(pattern: &str) -> ReplayResult<Self> {
        let files = resolve_glob(pattern)?;
        if files.is_empty() {
            return Err(ReplayError::NoMatchesFound {
                pattern: pattern.to_string(),
            });
        }

        let catalog = Self::read_files(&files)?;
        info!(
            "Loaded {} matches from {} index files ({} lines skipped)",
            catalog.len(),
            files.len(),
            catalog.skipped
        );

        if catalog.is_empty() {
            return Err(ReplayError::NoMatchesFound {
                pattern: pattern.to_string(),
            });
        }
        Ok(catalog)
    }

    pub fn read_files(files: &[PathBuf]) -> ReplayResult<Self> {
        let mut catalog = Self::default();
        for path in files {
            let file = File::open(path).map_err(|e| ReplayError::io(path, e))?;
            // Non-UTF-8 noise must not abort the scan, so split on raw bytes
            for line in BufReader::new(file).split(b'\n') {
                let line = line.map_err(|e| ReplayError::io(path, e))?;
                match parse_index_line(&String::from_utf8_lossy(&line)) {
                    Ok(key) => catalog.entries.push(key),
                    Err(e) => {
                        debug!("Skipping index line in {:?}: {}", path, e);
                        catalog.skipped += 1;
                    }
                }
            }
        }
        Ok(catalog)
    }

    pub fn entries(&self) -> &[MatchKey] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// `-1` picks the most recent entry.
    pub fn select(&self, choice: i64) -> ReplayResult<&MatchKey> {
        let index = if choice == -1 {
            self.entries.len().checked_sub(1)
        } else {
            usize::try_from(choice).ok()
        };

        index
            .and_then(|i| self.entries.get(i))
            .ok_or(ReplayError::ChoiceOutOfRange {
                choice,
                len: self.entries.len(),
            })
    }
}

/// Pulls the embedded JSON object out of an index line and decodes its key.
pub fn parse_index_line(line: &str) -> ReplayResult<MatchKey> {
    let (Some(open), Some(close)) = (line.find('{'), line.rfind('}')) else {
        return Err(ReplayError::malformed("no JSON object on line"));
    };
    if close < open {
        return Err(ReplayError::malformed("no JSON object on line"));
    }

    let entry: IndexEntry = serde_json::from_str(&line[open..=close])
        .map_err(|e| ReplayError::malformed(format!("bad index entry: {e}")))?;
    MatchKey::from_log_id(&entry.log_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StartTime;

    #[test]
    fn parses_framed_line() {
        let line = "2018-02-24T22:45:45+00:00\treplays\t{\"log_id\":\"42:robo:1519512345\",\"time\":1519512345}";
        let key = parse_index_line(line).unwrap();
        assert_eq!(key.match_id, "42");
        assert_eq!(key.participant_id, "robo");
        assert_eq!(key.start_time, StartTime::from_epoch("1519512345").unwrap());
    }

    #[test]
    fn rejects_lines_without_json_or_epoch() {
        assert!(parse_index_line("just framing noise").is_err());
        assert!(parse_index_line("} backwards {").is_err());
        assert!(parse_index_line(r#"{"log_id":"42:robo:"}"#).is_err());
        assert!(parse_index_line(r#"{"other":"42:robo:1"}"#).is_err());
    }

    #[test]
    fn select_handles_most_recent_and_range() {
        let t = StartTime::from_epoch("1519512345").unwrap();
        let catalog = MatchCatalog::from_entries(vec![
            MatchKey::new("1", "a", t),
            MatchKey::new("2", "b", t),
        ]);

        assert_eq!(catalog.select(0).unwrap().match_id, "1");
        assert_eq!(catalog.select(-1).unwrap().match_id, "2");
        assert!(matches!(
            catalog.select(2),
            Err(ReplayError::ChoiceOutOfRange { choice: 2, len: 2 })
        ));
        assert!(catalog.select(-2).is_err());
        assert!(MatchCatalog::default().select(-1).is_err());
    }
}
