use super::traits::{GlyphSet, Owner};
use super::types::{CharGrid, RenderConfig};
use common::{SnakeState, TurnFrame};

pub struct BoardRenderer<R: GlyphSet> {
    renderer: R,
    own_id: String,
}

impl<R: GlyphSet> BoardRenderer<R> {
    /// `own_id` is the participant whose replay this is; their snake is drawn
    /// with the "own" glyphs.
    pub fn new(renderer: R, own_id: impl Into<String>) -> Self {
        Self {
            renderer,
            own_id: own_id.into(),
        }
    }

    pub fn render(&self, frame: &TurnFrame, config: &RenderConfig) -> CharGrid {
        let mut grid = CharGrid::new(
            frame.width as usize,
            frame.height as usize,
            config.chars_per_point,
            &self.renderer.render_empty(),
        );

        let food = self.renderer.render_food();
        for position in &frame.food {
            if let Some((x, y)) = to_cell(position.x, position.y) {
                grid.set_cell(x, y, &food);
            }
        }

        for snake in frame.snakes.values() {
            let owner = if snake.id == self.own_id {
                Owner::Own
            } else {
                Owner::Enemy
            };

            // Tail first so the head stays visible where segments overlap
            for segment in snake.segments.iter().rev() {
                if let Some((x, y)) = to_cell(segment.x, segment.y) {
                    grid.set_cell(x, y, &self.renderer.render_segment(segment.kind, owner));
                }
            }
        }

        grid
    }

    /// Board for a turn that may have no frame: absent turns draw as an empty board.
    pub fn render_or_blank(
        &self,
        frame: Option<&TurnFrame>,
        turn: usize,
        config: &RenderConfig,
    ) -> CharGrid {
        match frame {
            Some(frame) => self.render(frame, config),
            None => self.render(&TurnFrame::new(turn as u32), config),
        }
    }
}

/// Log coordinates are 1-based.
fn to_cell(x: u16, y: u16) -> Option<(usize, usize)> {
    Some((x.checked_sub(1)? as usize, y.checked_sub(1)? as usize))
}

pub fn snake_summary(snake: &SnakeState) -> String {
    fn or_unknown(value: Option<u32>) -> String {
        value.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
    }

    format!(
        "Snake: {}\tHealth: {}\tLength: {}",
        snake.display_name(),
        or_unknown(snake.health),
        or_unknown(snake.length)
    )
}

/// One summary line per snake; empty for absent frames.
pub fn frame_summary(frame: Option<&TurnFrame>) -> Vec<String> {
    frame
        .map(|f| f.snakes.values().map(snake_summary).collect())
        .unwrap_or_default()
}
