use anyhow::Result;
use common::{MatchKey, ReplayError};
use std::io::{BufRead, Write};

use crate::render::board::{frame_summary, BoardRenderer};
use crate::render::standard_renderer::StandardRenderer;
use crate::render::types::RenderConfig;
use crate::replay::catalog::MatchCatalog;
use crate::replay::navigator::{Move, MoveOutcome, ReplayNavigator};

/// Line-oriented front end: pick a match by index, then step through turns.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-prompts until a valid index is entered. `None` means input ended.
    pub fn choose_match(&mut self, catalog: &MatchCatalog) -> Result<Option<MatchKey>> {
        writeln!(
            self.output,
            "\nEnter INDEX for which game logfiles to lookup or -1 to replay the most recent"
        )?;
        writeln!(self.output, "\n[INDEX]\ttimestamp, game_id, robosnake_id")?;
        for (index, key) in catalog.entries().iter().enumerate() {
            writeln!(self.output, "[{}]\t{}", index, key)?;
        }

        loop {
            write!(self.output, "Choice: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            let choice = match line.parse::<i64>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Please enter a number.")?;
                    continue;
                }
            };

            match catalog.select(choice) {
                Ok(key) => return Ok(Some(key.clone())),
                Err(e @ ReplayError::ChoiceOutOfRange { .. }) => writeln!(self.output, "{e}")?,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Runs the turn-by-turn loop until the user exits or input ends.
    pub fn navigate(&mut self, key: &MatchKey, navigator: &mut ReplayNavigator) -> Result<()> {
        let board = BoardRenderer::new(StandardRenderer::default(), key.participant_id.clone());
        let config = RenderConfig::default();

        writeln!(
            self.output,
            "\n\nROBOSNAKE | INSTANT REPLAY\n\nEnter 2 for NEXT turn, 1 for PREVIOUS, 5 to skip ahead 5 turns, 7 for the final turns, anything else to EXIT."
        )?;
        writeln!(
            self.output,
            "(This match played {} turns.)",
            navigator.last_turn() + 1
        )?;
        self.render_turn(&board, &config, navigator)?;

        loop {
            write!(self.output, "Input: ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match navigator.apply(Move::from_input(&line)) {
                MoveOutcome::Moved(_) => self.render_turn(&board, &config, navigator)?,
                MoveOutcome::Rejected(notice) => writeln!(self.output, "{}", notice.message())?,
                MoveOutcome::Exited => return Ok(()),
            }
        }
    }

    fn render_turn(
        &mut self,
        board: &BoardRenderer<StandardRenderer>,
        config: &RenderConfig,
        navigator: &ReplayNavigator,
    ) -> Result<()> {
        let turn = navigator.current_turn();
        let frame = navigator.current_frame();

        writeln!(self.output, "\nTurn {}\n", turn)?;
        for row in board.render_or_blank(frame, turn, config).to_spaced_rows() {
            writeln!(self.output, "{}", row)?;
        }

        writeln!(self.output)?;
        for line in frame_summary(frame) {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }
}
