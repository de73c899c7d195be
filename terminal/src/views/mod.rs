pub mod match_selector;
pub mod replay_viewer;

pub use match_selector::MatchSelectorState;
pub use replay_viewer::ReplayViewerState;

use crate::app::AppCommand;
use crossterm::event::KeyEvent;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand>;
    fn render(&self, frame: &mut Frame);
}
