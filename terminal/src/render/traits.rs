use super::types::CharPattern;
use common::SegmentKind;

/// Whose snake a segment belongs to, from the replayed participant's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Own,
    Enemy,
}

pub trait GlyphSet {
    fn render_segment(&self, kind: SegmentKind, owner: Owner) -> CharPattern;

    fn render_food(&self) -> CharPattern;

    fn render_empty(&self) -> CharPattern;
}
