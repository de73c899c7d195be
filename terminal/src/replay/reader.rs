use super::catalog::MatchCatalog;
use super::search::KeySearch;
use super::*;
use common::TimelineBuilder;
use tracing::{info, warn};

pub struct ReplayReader;

impl ReplayReader {
    pub fn list_matches(source: &ReplaySource) -> ReplayResult<MatchCatalog> {
        MatchCatalog::load(&source.index_glob())
    }

    /// Searches the logs for `key` and rebuilds its timeline. Either every
    /// matched payload has been merged or an error is returned.
    pub fn load_match(source: &ReplaySource, key: &MatchKey) -> ReplayResult<Timeline> {
        let search = KeySearch::from_source(source);
        let result = search.search(key, &source.log_glob())?;

        let mut builder = TimelineBuilder::new();
        for payload in &result.payloads {
            builder.push_payload(payload);
        }
        let (timeline, stats) = builder.build_with_stats();

        if stats.malformed > 0 {
            warn!(
                "Dropped {} of {} payloads for {} as malformed",
                stats.malformed, stats.payloads, key
            );
        }
        if timeline.is_empty() {
            return Err(ReplayError::NoMatchingRecords { key: key.clone() });
        }

        info!(
            "Rebuilt {} turns ({} with data) for {}",
            timeline.len(),
            timeline.present_turns(),
            key
        );
        Ok(timeline)
    }
}
