use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::event::{Position, SegmentKind};

/// Board size used when the logs never reach past it.
pub const DEFAULT_BOARD_SIZE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub x: u16,
    pub y: u16,
}

impl Segment {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeState {
    pub id: String,
    pub name: Option<String>,
    pub length: Option<u32>,
    pub health: Option<u32>,
    pub segments: Vec<Segment>,
}

impl SnakeState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            length: None,
            health: None,
            segments: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn head(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.kind == SegmentKind::Head)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFrame {
    pub turn: u32,
    pub width: u16,
    pub height: u16,
    pub snakes: BTreeMap<String, SnakeState>,
    pub food: BTreeSet<Position>,
}

impl TurnFrame {
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            width: DEFAULT_BOARD_SIZE,
            height: DEFAULT_BOARD_SIZE,
            snakes: BTreeMap::new(),
            food: BTreeSet::new(),
        }
    }

    pub fn snake(&self, id: &str) -> Option<&SnakeState> {
        self.snakes.get(id)
    }
}

/// Frames indexed by turn. A `None` slot means nothing was logged for that turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    frames: Vec<Option<TurnFrame>>,
}

impl Timeline {
    pub fn from_frames(frames: Vec<Option<TurnFrame>>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(Option::is_none)
    }

    pub fn frame(&self, turn: usize) -> Option<&TurnFrame> {
        self.frames.get(turn).and_then(Option::as_ref)
    }

    pub fn frames(&self) -> &[Option<TurnFrame>] {
        &self.frames
    }

    /// Highest turn that has a frame.
    pub fn last_turn(&self) -> Option<usize> {
        self.frames.iter().rposition(Option::is_some)
    }

    pub fn present_turns(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }
}
