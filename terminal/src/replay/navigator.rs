use super::*;
use common::TurnFrame;

pub const JUMP_STRIDE: usize = 5;
pub const END_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Forward,
    Backward,
    JumpForward,
    /// Jump to the start of the final few turns.
    JumpToEnd,
    Exit,
}

impl Move {
    /// Line-prompt codes: 2 next, 1 previous, 5 skip ahead, 7 near the end.
    /// Anything else ends the session.
    pub fn from_input(input: &str) -> Self {
        match input.trim() {
            "2" => Move::Forward,
            "1" => Move::Backward,
            "5" => Move::JumpForward,
            "7" => Move::JumpToEnd,
            _ => Move::Exit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoFutureMoves,
    NoOlderMoves,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NoFutureMoves => "There are no future moves to show.",
            Notice::NoOlderMoves => "There are no older moves to show.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(usize),
    Rejected(Notice),
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Exited,
}

pub struct ReplayNavigator {
    timeline: Timeline,
    current_turn: usize,
    last_turn: usize,
    state: SessionState,
}

impl ReplayNavigator {
    pub fn new(timeline: Timeline) -> Self {
        let last_turn = timeline.last_turn().unwrap_or(0);
        Self {
            timeline,
            current_turn: 0,
            last_turn,
            state: SessionState::Active,
        }
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn last_turn(&self) -> usize {
        self.last_turn
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Frame for the current turn; `None` when nothing was logged for it.
    pub fn current_frame(&self) -> Option<&TurnFrame> {
        self.timeline.frame(self.current_turn)
    }

    pub fn apply(&mut self, mv: Move) -> MoveOutcome {
        if self.state == SessionState::Exited {
            return MoveOutcome::Exited;
        }

        let target = match mv {
            Move::Forward => {
                if self.current_turn >= self.last_turn {
                    return MoveOutcome::Rejected(Notice::NoFutureMoves);
                }
                self.current_turn + 1
            }
            Move::Backward => {
                if self.current_turn == 0 {
                    return MoveOutcome::Rejected(Notice::NoOlderMoves);
                }
                self.current_turn - 1
            }
            Move::JumpForward => {
                if self.current_turn >= self.last_turn {
                    return MoveOutcome::Rejected(Notice::NoFutureMoves);
                }
                (self.current_turn + JUMP_STRIDE).min(self.last_turn)
            }
            Move::JumpToEnd => self.last_turn.saturating_sub(END_WINDOW),
            Move::Exit => {
                self.state = SessionState::Exited;
                return MoveOutcome::Exited;
            }
        };

        self.current_turn = target;
        MoveOutcome::Moved(target)
    }

    /// Absolute jump, clamped to the navigable range.
    pub fn goto(&mut self, turn: usize) -> MoveOutcome {
        if self.state == SessionState::Exited {
            return MoveOutcome::Exited;
        }
        self.current_turn = turn.min(self.last_turn);
        MoveOutcome::Moved(self.current_turn)
    }
}
