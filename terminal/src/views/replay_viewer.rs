use super::View;
use crate::app::AppCommand;
use crate::render::board::{frame_summary, BoardRenderer};
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::{CharDimensions, RenderConfig};
use crate::replay::navigator::{Move, MoveOutcome, ReplayNavigator};
use common::{MatchKey, Timeline};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct ReplayViewerState {
    key: MatchKey,
    navigator: ReplayNavigator,
    board: BoardRenderer<StandardRenderer>,
    config: RenderConfig,
    notice: Option<&'static str>,
}

impl ReplayViewerState {
    pub fn new(key: MatchKey, timeline: Timeline) -> Self {
        // Two columns per cell keeps the board roughly square in a terminal
        let char_dims = CharDimensions::new(2, 1);
        Self {
            board: BoardRenderer::new(StandardRenderer::new(char_dims), key.participant_id.clone()),
            key,
            navigator: ReplayNavigator::new(timeline),
            config: RenderConfig {
                chars_per_point: char_dims,
            },
            notice: None,
        }
    }

    pub fn navigator(&self) -> &ReplayNavigator {
        &self.navigator
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    fn key_to_move(key: KeyEvent) -> Move {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('2') => Move::Forward,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('1') => Move::Backward,
            KeyCode::PageDown | KeyCode::Char('L') | KeyCode::Char('5') => Move::JumpForward,
            KeyCode::End | KeyCode::Char('e') | KeyCode::Char('7') => Move::JumpToEnd,
            _ => Move::Exit,
        }
    }
}

impl View for ReplayViewerState {
    fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match self.navigator.apply(Self::key_to_move(key)) {
            MoveOutcome::Moved(_) => {
                self.notice = None;
                None
            }
            MoveOutcome::Rejected(notice) => {
                self.notice = Some(notice.message());
                None
            }
            MoveOutcome::Exited => Some(AppCommand::BackToSelector),
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(6),
                Constraint::Length(3),
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(), chunks[0]);
        self.render_board(frame, chunks[1]);
        frame.render_widget(self.render_snakes(), chunks[2]);
        frame.render_widget(self.render_controls(), chunks[3]);
    }
}

impl ReplayViewerState {
    fn render_header(&self) -> Paragraph {
        let title = format!(
            "Turn {} / {} | match {} | snake {} | {}",
            self.navigator.current_turn(),
            self.navigator.last_turn(),
            self.key.match_id,
            self.key.participant_id,
            self.key.start_time
        );

        Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_board(&self, frame: &mut Frame, area: Rect) {
        let turn = self.navigator.current_turn();
        let current = self.navigator.current_frame();
        let title = if current.is_some() {
            "Board".to_string()
        } else {
            format!("Board (nothing logged for turn {turn})")
        };

        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let grid = self.board.render_or_blank(current, turn, &self.config);
        let grid_height = u16::try_from(grid.physical_height()).unwrap_or(u16::MAX);
        let lines: Vec<Line> = grid
            .into_lines()
            .into_iter()
            .map(|row| Line::from(row.into_iter().collect::<String>()))
            .collect();

        let y_offset = inner.height.saturating_sub(grid_height) / 2;
        let board_area = Rect {
            y: inner.y + y_offset,
            height: inner.height - y_offset,
            ..inner
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), board_area);
    }

    fn render_snakes(&self) -> Paragraph {
        let mut lines: Vec<Line> = frame_summary(self.navigator.current_frame())
            .into_iter()
            .map(Line::from)
            .collect();
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No snakes this turn",
                Style::default().fg(Color::DarkGray),
            )));
        }

        Paragraph::new(lines).block(Block::default().title("Snakes").borders(Borders::ALL))
    }

    fn render_controls(&self) -> Paragraph {
        let line = match self.notice {
            Some(notice) => Line::from(Span::styled(notice, Style::default().fg(Color::Yellow))),
            None => Line::from(
                "→/l: next | ←/h: previous | L/PgDn: +5 turns | e/End: last 7 turns | any other key: back",
            ),
        };

        Paragraph::new(line)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }
}
