use super::traits::{GlyphSet, Owner};
use super::types::{CharDimensions, CharPattern};
use common::SegmentKind;

pub const EMPTY_GLYPH: char = '◦';
pub const FOOD_GLYPH: char = '•';

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }

    pub fn segment_glyph(kind: SegmentKind, owner: Owner) -> char {
        match (kind, owner) {
            (SegmentKind::Head, Owner::Own) => '@',
            (SegmentKind::Head, Owner::Enemy) => '✱',
            (SegmentKind::Body, Owner::Own) => '■',
            (SegmentKind::Body, Owner::Enemy) => '□',
            (SegmentKind::Tail, Owner::Own) => '◘',
            (SegmentKind::Tail, Owner::Enemy) => '⌗',
        }
    }
}

impl Default for StandardRenderer {
    fn default() -> Self {
        Self::new(CharDimensions::new(1, 1))
    }
}

impl GlyphSet for StandardRenderer {
    fn render_segment(&self, kind: SegmentKind, owner: Owner) -> CharPattern {
        CharPattern::single(Self::segment_glyph(kind, owner), self.char_dims)
    }

    fn render_food(&self) -> CharPattern {
        if self.char_dims.horizontal == 1 && self.char_dims.vertical == 1 {
            return CharPattern::single(FOOD_GLYPH, self.char_dims);
        }

        // Checkerboard so larger cells still read as a single pellet
        let mut pattern = CharPattern::single(' ', self.char_dims);
        for (y, row) in pattern.chars.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if (x + y) % 2 == 0 {
                    *cell = FOOD_GLYPH;
                }
            }
        }
        pattern
    }

    fn render_empty(&self) -> CharPattern {
        CharPattern::single(EMPTY_GLYPH, self.char_dims)
    }
}
