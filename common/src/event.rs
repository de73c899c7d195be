use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReplayError, ReplayResult};

/// Turn numbers past this are treated as corrupt rather than allocated for.
pub const MAX_TURN: u32 = 100_000;

/// Largest board coordinate accepted; anything past it is a corrupt record.
pub const MAX_COORDINATE: u16 = 255;

/// 1-based grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Head,
    Body,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Food,
    Head,
    Body,
    Tail,
}

impl ItemKind {
    pub fn segment(self) -> Option<SegmentKind> {
        match self {
            ItemKind::Food => None,
            ItemKind::Head => Some(SegmentKind::Head),
            ItemKind::Body => Some(SegmentKind::Body),
            ItemKind::Tail => Some(SegmentKind::Tail),
        }
    }
}

/// Wire shape of one game event line's payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    pub turn: u32,
    #[serde(default)]
    pub who: Option<String>,
    pub item: ItemKind,
    pub coordinates: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodEvent {
    pub turn: u32,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentEvent {
    pub turn: u32,
    pub entity_id: String,
    pub kind: SegmentKind,
    pub position: Position,
    pub length: Option<u32>,
    pub health: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Food(FoodEvent),
    Segment(SegmentEvent),
    Malformed(String),
}

impl GameEvent {
    /// Decodes one payload. Never fails: anything unusable becomes `Malformed`.
    pub fn decode(text: &str) -> Self {
        match Self::try_decode(text) {
            Ok(event) => event,
            Err(ReplayError::MalformedRecord { reason }) => GameEvent::Malformed(reason),
            Err(other) => GameEvent::Malformed(other.to_string()),
        }
    }

    fn try_decode(text: &str) -> ReplayResult<Self> {
        let value: Value = serde_json::from_str(text.trim())
            .map_err(|e| ReplayError::malformed(format!("payload is not JSON: {e}")))?;

        // Upstream occasionally logs a bare string instead of an object
        if !value.is_object() {
            return Err(ReplayError::malformed("payload is not an object"));
        }

        let payload: EventPayload = serde_json::from_value(value)
            .map_err(|e| ReplayError::malformed(format!("unexpected payload shape: {e}")))?;
        Self::from_payload(payload)
    }

    pub fn from_payload(payload: EventPayload) -> ReplayResult<Self> {
        if payload.turn > MAX_TURN {
            return Err(ReplayError::malformed(format!(
                "turn {} exceeds {MAX_TURN}",
                payload.turn
            )));
        }

        let Position { x, y } = payload.coordinates;
        if x > MAX_COORDINATE || y > MAX_COORDINATE {
            return Err(ReplayError::malformed(format!(
                "coordinates ({x}, {y}) exceed {MAX_COORDINATE}"
            )));
        }

        match payload.item.segment() {
            None => Ok(GameEvent::Food(FoodEvent {
                turn: payload.turn,
                position: payload.coordinates,
            })),
            Some(kind) => {
                let entity_id = payload
                    .who
                    .filter(|who| !who.is_empty())
                    .ok_or_else(|| ReplayError::malformed("snake segment without `who`"))?;
                Ok(GameEvent::Segment(SegmentEvent {
                    turn: payload.turn,
                    entity_id,
                    kind,
                    position: payload.coordinates,
                    length: payload.length,
                    health: payload.health,
                    name: payload.name.filter(|name| !name.is_empty()),
                }))
            }
        }
    }

    pub fn turn(&self) -> Option<u32> {
        match self {
            GameEvent::Food(food) => Some(food.turn),
            GameEvent::Segment(segment) => Some(segment.turn),
            GameEvent::Malformed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_food() {
        let event = GameEvent::decode(r#"{"item":"food","turn":2,"coordinates":{"x":3,"y":5}}"#);
        assert_eq!(
            event,
            GameEvent::Food(FoodEvent {
                turn: 2,
                position: Position::new(3, 5),
            })
        );
    }

    #[test]
    fn decodes_segment_with_metadata() {
        let event = GameEvent::decode(
            r#"{"who":"S1","item":"head","turn":2,"coordinates":{"x":4,"y":4},"length":3,"health":97,"name":"robo"}"#,
        );
        let GameEvent::Segment(segment) = event else {
            panic!("expected a segment, got {event:?}");
        };
        assert_eq!(segment.entity_id, "S1");
        assert_eq!(segment.kind, SegmentKind::Head);
        assert_eq!(segment.length, Some(3));
        assert_eq!(segment.health, Some(97));
        assert_eq!(segment.name.as_deref(), Some("robo"));
    }

    #[test]
    fn bare_string_payload_is_malformed() {
        assert!(matches!(GameEvent::decode(r#""snake died""#), GameEvent::Malformed(_)));
    }

    #[test]
    fn truncated_and_unknown_payloads_are_malformed() {
        assert!(matches!(GameEvent::decode(r#"{"item":"food","tu"#), GameEvent::Malformed(_)));
        assert!(matches!(
            GameEvent::decode(r#"{"item":"wall","turn":1,"coordinates":{"x":1,"y":1}}"#),
            GameEvent::Malformed(_)
        ));
        assert!(matches!(
            GameEvent::decode(r#"{"item":"body","turn":1,"coordinates":{"x":1,"y":1}}"#),
            GameEvent::Malformed(_)
        ));
    }

    #[test]
    fn absurd_turn_is_malformed() {
        let text = format!(
            r#"{{"item":"food","turn":{},"coordinates":{{"x":1,"y":1}}}}"#,
            MAX_TURN + 1
        );
        assert!(matches!(GameEvent::decode(&text), GameEvent::Malformed(_)));
    }

    #[test]
    fn far_off_board_coordinates_are_malformed() {
        let food = format!(
            r#"{{"item":"food","turn":1,"coordinates":{{"x":{},"y":3}}}}"#,
            MAX_COORDINATE + 1
        );
        assert!(matches!(GameEvent::decode(&food), GameEvent::Malformed(_)));

        let head = r#"{"who":"S1","item":"head","turn":1,"coordinates":{"x":4,"y":65000}}"#;
        assert!(matches!(GameEvent::decode(head), GameEvent::Malformed(_)));

        let edge = format!(
            r#"{{"item":"food","turn":1,"coordinates":{{"x":{0},"y":{0}}}}}"#,
            MAX_COORDINATE
        );
        assert!(matches!(GameEvent::decode(&edge), GameEvent::Food(_)));
    }
}
