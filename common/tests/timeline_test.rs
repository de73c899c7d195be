use common::{reconstruct, Position, SegmentKind, Timeline};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Item {
    Food { turn: u32, x: u16, y: u16 },
    Part { who: u8, kind: &'static str, turn: u32, x: u16, y: u16, health: u32 },
}

impl Item {
    fn turn(&self) -> u32 {
        match self {
            Item::Food { turn, .. } | Item::Part { turn, .. } => *turn,
        }
    }

    fn to_payload(&self) -> String {
        match self {
            Item::Food { turn, x, y } => format!(
                r#"{{"item":"food","turn":{turn},"coordinates":{{"x":{x},"y":{y}}}}}"#
            ),
            Item::Part { who, kind, turn, x, y, health } => format!(
                r#"{{"who":"snake-{who}","item":"{kind}","turn":{turn},"coordinates":{{"x":{x},"y":{y}}},"length":4,"health":{health}}}"#
            ),
        }
    }
}

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![
        (0u32..30, 1u16..20, 1u16..20).prop_map(|(turn, x, y)| Item::Food { turn, x, y }),
        (
            0u8..4,
            prop::sample::select(vec!["head", "body", "tail"]),
            0u32..30,
            1u16..20,
            1u16..20,
            0u32..=100,
        )
            .prop_map(|(who, kind, turn, x, y, health)| Item::Part {
                who,
                kind,
                turn,
                x,
                y,
                health,
            }),
    ]
}

fn build(items: &[Item]) -> Timeline {
    reconstruct(items.iter().map(Item::to_payload))
}

proptest! {
    #[test]
    fn length_is_max_turn_plus_one(items in prop::collection::vec(item(), 1..60)) {
        let timeline = build(&items);
        let max_turn = items.iter().map(Item::turn).max().unwrap();
        prop_assert_eq!(timeline.len(), max_turn as usize + 1);

        for turn in 0..timeline.len() {
            let referenced = items.iter().any(|i| i.turn() as usize == turn);
            prop_assert_eq!(timeline.frame(turn).is_some(), referenced);
        }
    }

    #[test]
    fn arrival_order_does_not_matter(
        items in prop::collection::vec(item(), 0..60),
        seed in any::<u64>(),
    ) {
        let forward = build(&items);

        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(&forward, &build(&reversed));

        // Deterministic shuffle without pulling in an RNG
        let mut shuffled = items.clone();
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            shuffled.swap(i, (state % (i as u64 + 1)) as usize);
        }
        prop_assert_eq!(&forward, &build(&shuffled));
    }

    #[test]
    fn reconstruction_is_repeatable(items in prop::collection::vec(item(), 0..40)) {
        prop_assert_eq!(build(&items), build(&items));
    }
}

#[test]
fn snake_segments_for_one_turn_collect_under_one_entity() {
    let items = vec![
        Item::Part { who: 1, kind: "tail", turn: 3, x: 2, y: 4, health: 80 },
        Item::Part { who: 1, kind: "head", turn: 3, x: 2, y: 2, health: 80 },
        Item::Part { who: 1, kind: "body", turn: 3, x: 2, y: 3, health: 80 },
        Item::Part { who: 2, kind: "head", turn: 3, x: 7, y: 7, health: 55 },
    ];
    let timeline = build(&items);
    let frame = timeline.frame(3).unwrap();

    assert_eq!(frame.snakes.len(), 2);
    let snake = frame.snake("snake-1").unwrap();
    let kinds: Vec<SegmentKind> = snake.segments.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SegmentKind::Head, SegmentKind::Body, SegmentKind::Tail]);
    assert_eq!(snake.head().map(|s| s.position()), Some(Position::new(2, 2)));
    assert_eq!(snake.health, Some(80));
    assert_eq!(frame.snake("snake-2").unwrap().health, Some(55));
}

#[test]
fn duplicate_food_is_harmless() {
    let items = vec![
        Item::Food { turn: 0, x: 5, y: 5 },
        Item::Food { turn: 0, x: 5, y: 5 },
    ];
    let timeline = build(&items);
    assert_eq!(timeline.frame(0).unwrap().food.len(), 1);
}
