use common::{Position, Segment, SegmentKind, SnakeState, TurnFrame};
use terminal::render::{
    board::{frame_summary, BoardRenderer},
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig},
};

fn snake(id: &str, health: u32, body: &[(SegmentKind, u16, u16)]) -> SnakeState {
    let mut snake = SnakeState::new(id);
    snake.name = Some(format!("{id}-bot"));
    snake.health = Some(health);
    snake.length = Some(body.len() as u32);
    snake.segments = body
        .iter()
        .map(|&(kind, x, y)| Segment { kind, x, y })
        .collect();
    snake
}

fn main() {
    let mut frame = TurnFrame::new(12);
    frame.width = 14;
    frame.height = 10;

    for state in [
        snake(
            "robo",
            88,
            &[
                (SegmentKind::Head, 5, 5),
                (SegmentKind::Body, 5, 6),
                (SegmentKind::Body, 5, 7),
                (SegmentKind::Body, 4, 7),
                (SegmentKind::Tail, 3, 7),
            ],
        ),
        snake(
            "rival",
            61,
            &[
                (SegmentKind::Head, 12, 3),
                (SegmentKind::Body, 11, 3),
                (SegmentKind::Tail, 10, 3),
            ],
        ),
    ] {
        frame.snakes.insert(state.id.clone(), state);
    }
    frame.food.extend([Position::new(9, 5), Position::new(2, 2), Position::new(13, 9)]);

    println!("=== 1x1 Rendering (Classic) ===");
    render_with_dimensions(&frame, CharDimensions::new(1, 1));

    println!("\n=== 2x1 Rendering (Wide) ===");
    render_with_dimensions(&frame, CharDimensions::new(2, 1));

    println!("\n=== 3x2 Rendering (Large) ===");
    render_with_dimensions(&frame, CharDimensions::new(3, 2));

    println!();
    for line in frame_summary(Some(&frame)) {
        println!("{line}");
    }
}

fn render_with_dimensions(frame: &TurnFrame, char_dims: CharDimensions) {
    let board = BoardRenderer::new(StandardRenderer::new(char_dims), "robo");
    let config = RenderConfig { chars_per_point: char_dims };

    let grid = board.render(frame, &config);
    println!(
        "Turn {} | {}x{} chars per point | {}x{} characters",
        frame.turn,
        char_dims.horizontal,
        char_dims.vertical,
        grid.physical_width(),
        grid.physical_height()
    );

    let border = "─".repeat(grid.physical_width());
    println!("┌{border}┐");
    for line in grid.into_lines() {
        println!("│{}│", line.into_iter().collect::<String>());
    }
    println!("└{border}┘");
}
