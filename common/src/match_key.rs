use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ReplayError, ReplayResult};

pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock start time of a match, second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StartTime(NaiveDateTime);

impl StartTime {
    /// Converts raw epoch seconds (`"1519512345"` or `"1519512345.87"`) to local time.
    /// Fractional seconds are truncated.
    pub fn from_epoch(raw: &str) -> Option<Self> {
        let secs: f64 = raw.trim().parse().ok()?;
        if !secs.is_finite() || secs < 0.0 {
            return None;
        }
        let local = Local.timestamp_opt(secs.floor() as i64, 0).single()?;
        Some(StartTime(local.naive_local()))
    }

}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(START_TIME_FORMAT))
    }
}

impl FromStr for StartTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), START_TIME_FORMAT).map(StartTime)
    }
}

/// One selectable replay: a match seen from one participant's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchKey {
    pub match_id: String,
    pub participant_id: String,
    pub start_time: StartTime,
}

impl MatchKey {
    pub fn new(
        match_id: impl Into<String>,
        participant_id: impl Into<String>,
        start_time: StartTime,
    ) -> Self {
        Self {
            match_id: match_id.into(),
            participant_id: participant_id.into(),
            start_time,
        }
    }

    /// Parses an index file `log_id` (`<match_id>:<participant_id>:<epoch>`).
    pub fn from_log_id(log_id: &str) -> ReplayResult<Self> {
        let ascii = to_ascii(log_id);
        let tagged = TaggedKey::split(&ascii)?;
        let start_time = tagged.start_time()?;
        Ok(MatchKey::new(tagged.match_id, tagged.participant_id, start_time))
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.start_time, self.match_id, self.participant_id
        )
    }
}

/// NFKD-normalizes `text` and drops whatever is still outside ASCII.
pub fn to_ascii(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

/// Key components carried in a log line's tag, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedKey<'a> {
    pub match_id: &'a str,
    pub participant_id: &'a str,
    pub epoch: &'a str,
}

impl<'a> TaggedKey<'a> {
    /// Finds `marker` in `tag` and splits what follows it.
    pub fn from_tag(tag: &'a str, marker: &str) -> ReplayResult<Self> {
        let start = tag
            .find(marker)
            .ok_or_else(|| ReplayError::malformed("tag marker not present"))?;
        Self::split(&tag[start + marker.len()..])
    }

    /// Splits a `<match>:<participant>:<epoch>` composite.
    pub fn split(composite: &'a str) -> ReplayResult<Self> {
        let mut parts = composite.split(':');
        let (Some(match_id), Some(participant_id), Some(epoch)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ReplayError::malformed(format!(
                "expected 3 key components in {composite:?}"
            )));
        };

        if epoch.trim().is_empty() {
            return Err(ReplayError::malformed("empty timestamp component"));
        }

        Ok(Self {
            match_id,
            participant_id,
            epoch,
        })
    }

    pub fn start_time(&self) -> ReplayResult<StartTime> {
        StartTime::from_epoch(self.epoch)
            .ok_or_else(|| ReplayError::malformed(format!("bad epoch {:?}", self.epoch)))
    }

    /// Match and participant ids equal the key's. Cheap, so callers check
    /// this before normalizing the epoch.
    pub fn ids_match(&self, key: &MatchKey) -> bool {
        self.match_id == key.match_id && self.participant_id == key.participant_id
    }
}
