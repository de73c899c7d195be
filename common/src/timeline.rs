use log::debug;
use std::collections::btree_map::Entry;

use crate::event::{FoodEvent, GameEvent, SegmentEvent};
use crate::frame::{DEFAULT_BOARD_SIZE, Segment, SnakeState, Timeline, TurnFrame};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub payloads: usize,
    pub food: usize,
    pub segments: usize,
    pub malformed: usize,
}

/// Turns an unordered bag of event payloads into a turn-indexed timeline.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    events: Vec<GameEvent>,
    stats: BuildStats,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_payload(&mut self, text: &str) {
        self.push(GameEvent::decode(text));
    }

    pub fn push(&mut self, event: GameEvent) {
        self.stats.payloads += 1;
        match &event {
            GameEvent::Malformed(reason) => {
                debug!("Dropping malformed payload: {}", reason);
                self.stats.malformed += 1;
            }
            GameEvent::Food(_) => {
                self.stats.food += 1;
                self.events.push(event);
            }
            GameEvent::Segment(_) => {
                self.stats.segments += 1;
                self.events.push(event);
            }
        }
    }

    pub fn build(self) -> Timeline {
        self.build_with_stats().0
    }

    pub fn build_with_stats(self) -> (Timeline, BuildStats) {
        let stats = self.stats;

        // Bounds discovery: arena size and board size
        let Some(max_turn) = self.events.iter().filter_map(GameEvent::turn).max() else {
            return (Timeline::default(), stats);
        };
        let (width, height) = board_size(&self.events);

        let mut frames: Vec<Option<TurnFrame>> = vec![None; max_turn as usize + 1];

        for event in self.events {
            match event {
                GameEvent::Food(food) => apply_food(&mut frames, food),
                GameEvent::Segment(segment) => apply_segment(&mut frames, segment),
                GameEvent::Malformed(_) => {}
            }
        }

        for frame in frames.iter_mut().flatten() {
            frame.width = width;
            frame.height = height;
            for snake in frame.snakes.values_mut() {
                snake.segments.sort_unstable();
            }
        }

        (Timeline::from_frames(frames), stats)
    }
}

/// Reconstructs a timeline from raw payload texts.
pub fn reconstruct<I, S>(payloads: I) -> Timeline
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TimelineBuilder::new();
    for payload in payloads {
        builder.push_payload(payload.as_ref());
    }
    builder.build()
}

fn frame_at(frames: &mut [Option<TurnFrame>], turn: u32) -> &mut TurnFrame {
    frames[turn as usize].get_or_insert_with(|| TurnFrame::new(turn))
}

fn apply_food(frames: &mut [Option<TurnFrame>], food: FoodEvent) {
    frame_at(frames, food.turn).food.insert(food.position);
}

fn apply_segment(frames: &mut [Option<TurnFrame>], event: SegmentEvent) {
    let frame = frame_at(frames, event.turn);
    let snake = match frame.snakes.entry(event.entity_id) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            let id = entry.key().clone();
            entry.insert(SnakeState::new(id))
        }
    };

    // Merge so the outcome does not depend on which segment arrived first
    snake.length = snake.length.max(event.length);
    snake.health = snake.health.max(event.health);
    snake.name = match (snake.name.take(), event.name) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    snake.segments.push(Segment {
        kind: event.kind,
        x: event.position.x,
        y: event.position.y,
    });
}

fn board_size(events: &[GameEvent]) -> (u16, u16) {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Food(food) => Some(food.position),
            GameEvent::Segment(segment) => Some(segment.position),
            GameEvent::Malformed(_) => None,
        })
        .fold((DEFAULT_BOARD_SIZE, DEFAULT_BOARD_SIZE), |(w, h), p| {
            (w.max(p.x), h.max(p.y))
        })
}
