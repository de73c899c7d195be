use anyhow::Result;
use common::{MatchKey, ReplayError};
use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::replay::catalog::MatchCatalog;
use crate::replay::reader::ReplayReader;
use crate::replay::ReplaySource;
use crate::views::{MatchSelectorState, ReplayViewerState, View};

#[derive(Debug)]
pub enum AppCommand {
    Quit,
    BackToSelector,
    OpenMatch(MatchKey),
}

pub enum AppState {
    MatchSelector(Box<MatchSelectorState>),
    ReplayViewer(Box<ReplayViewerState>),
}

pub struct App {
    pub state: AppState,
    pub source: ReplaySource,
    catalog: MatchCatalog,
}

impl App {
    pub fn new(source: ReplaySource, catalog: MatchCatalog) -> Self {
        Self {
            state: AppState::MatchSelector(Box::new(MatchSelectorState::new(catalog.clone()))),
            source,
            catalog,
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent) -> Option<AppCommand> {
        match &mut self.state {
            AppState::MatchSelector(selector) => selector.handle_input(key),
            AppState::ReplayViewer(viewer) => viewer.handle_input(key),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        match &self.state {
            AppState::MatchSelector(selector) => selector.render(frame),
            AppState::ReplayViewer(viewer) => viewer.render(frame),
        }
    }

    pub fn handle_command(&mut self, command: AppCommand) -> Result<()> {
        match command {
            AppCommand::OpenMatch(key) => match ReplayReader::load_match(&self.source, &key) {
                Ok(timeline) => {
                    let viewer = ReplayViewerState::new(key, timeline);
                    self.state = AppState::ReplayViewer(Box::new(viewer));
                }
                // Let the user pick another match instead of bailing out
                Err(e @ ReplayError::NoMatchingRecords { .. }) => {
                    if let AppState::MatchSelector(selector) = &mut self.state {
                        selector.set_status(format!("FATAL: {e}. Pick another match."));
                    }
                }
                Err(e) => return Err(e.into()),
            },
            AppCommand::BackToSelector => {
                let selector = MatchSelectorState::new(self.catalog.clone());
                self.state = AppState::MatchSelector(Box::new(selector));
            }
            AppCommand::Quit => {
                // Handled in main loop
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StartTime;
    use std::fs;

    fn key(match_id: &str) -> MatchKey {
        MatchKey::new(match_id, "robo", StartTime::from_epoch("1519512345").unwrap())
    }

    fn app_with_log(dir: &tempfile::TempDir) -> App {
        fs::write(
            dir.path().join("luasnake.20180224"),
            "t\tluasnake.info.7:robo:1519512345\t{\"item\":\"food\",\"turn\":3,\"coordinates\":{\"x\":2,\"y\":2}}\n",
        )
        .unwrap();
        let source = ReplaySource {
            log_dir: dir.path().to_path_buf(),
            workers: 2,
            ..ReplaySource::default()
        };
        App::new(source, MatchCatalog::from_entries(vec![key("7"), key("8")]))
    }

    #[test]
    fn match_without_records_stays_on_selector_with_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_log(&dir);

        app.handle_command(AppCommand::OpenMatch(key("8"))).unwrap();

        let AppState::MatchSelector(selector) = &app.state else {
            panic!("expected the selector to stay open");
        };
        let status = selector.status().expect("status explains the failure");
        assert!(status.starts_with("FATAL: no log data found for match"));
    }

    #[test]
    fn open_and_leave_a_replay() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_log(&dir);

        app.handle_command(AppCommand::OpenMatch(key("7"))).unwrap();
        let AppState::ReplayViewer(viewer) = &app.state else {
            panic!("expected the replay viewer");
        };
        assert_eq!(viewer.navigator().last_turn(), 3);

        app.handle_command(AppCommand::BackToSelector).unwrap();
        assert!(matches!(app.state, AppState::MatchSelector(_)));
    }
}
