use super::View;
use crate::app::AppCommand;
use crate::replay::catalog::MatchCatalog;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub struct MatchSelectorState {
    catalog: MatchCatalog,
    selected_index: usize,
    scroll_offset: usize,
    status: Option<String>,
}

impl MatchSelectorState {
    pub fn new(catalog: MatchCatalog) -> Self {
        // Most recent match first in the cursor, like `-1` on the prompt
        let selected_index = catalog.len().saturating_sub(1);
        Self {
            catalog,
            selected_index,
            scroll_offset: 0,
            status: None,
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Shown under the list, e.g. after a match turned out to have no log data.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            if self.selected_index < self.scroll_offset {
                self.scroll_offset = self.selected_index;
            }
        }
    }

    fn move_selection_down(&mut self) {
        if self.selected_index < self.catalog.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }
}

impl View for MatchSelectorState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
                None
            }
            KeyCode::Enter => {
                self.status = None;
                self.catalog
                    .select(self.selected_index as i64)
                    .ok()
                    .cloned()
                    .map(AppCommand::OpenMatch)
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let title = Paragraph::new("ROBOSNAKE | INSTANT REPLAY")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let list_area = chunks[1];
        let visible_height = list_area.height.saturating_sub(2) as usize;

        let scroll_offset = if visible_height == 0 {
            self.selected_index
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.selected_index + 1 - visible_height
        } else if self.selected_index < self.scroll_offset {
            self.selected_index
        } else {
            self.scroll_offset
        };

        let items: Vec<ListItem> = self
            .catalog
            .entries()
            .iter()
            .enumerate()
            .skip(scroll_offset)
            .take(visible_height)
            .map(|(i, key)| {
                let style = if i == self.selected_index {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{:>3}] ", i), Style::default().fg(Color::DarkGray)),
                    Span::styled(key.start_time.to_string(), style),
                    Span::styled(
                        format!("  match {}  snake {}", key.match_id, key.participant_id),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!("Select Match ({} played)", self.catalog.len()))
                .borders(Borders::ALL),
        );
        frame.render_widget(list, list_area);

        let help_text = match &self.status {
            Some(status) => status.clone(),
            None => "↑/k: Up | ↓/j: Down | Enter: Replay | q: Quit".to_string(),
        };
        let help_style = if self.status.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let help = Paragraph::new(help_text)
            .style(help_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }
}
