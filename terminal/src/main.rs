use anyhow::{Context, Result};
use clap::Parser;
use common::ReplayError;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::app::{App, AppCommand};
use terminal::config::ReplayConfig;
use terminal::prompt::LinePrompt;
use terminal::replay::navigator::ReplayNavigator;
use terminal::replay::reader::ReplayReader;
use terminal::replay::ReplaySource;

fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    let config = ReplayConfig::parse();
    init_tracing(&config)?;

    let source = config.source();
    info!(
        "Reading replays from {:?} with {} search workers",
        source.log_dir, source.workers
    );

    let catalog = ReplayReader::list_matches(&source).context("Failed to read the replay index")?;

    if config.plain {
        run_plain(&config, &source, catalog)
    } else {
        run_tui(source, catalog)
    }
}

fn init_tracing(config: &ReplayConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn run_plain(
    config: &ReplayConfig,
    source: &ReplaySource,
    catalog: terminal::replay::catalog::MatchCatalog,
) -> Result<()> {
    let stdin = io::stdin();
    let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());

    let (key, timeline) = loop {
        let key = match config.select {
            Some(choice) => catalog.select(choice)?.clone(),
            None => match prompt.choose_match(&catalog)? {
                Some(key) => key,
                None => return Ok(()),
            },
        };

        match ReplayReader::load_match(source, &key) {
            Ok(timeline) => break (key, timeline),
            // Offer another selection when prompting interactively
            Err(e @ ReplayError::NoMatchingRecords { .. }) if config.select.is_none() => {
                eprintln!("FATAL: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    };

    let mut navigator = ReplayNavigator::new(timeline);
    prompt.navigate(&key, &mut navigator)
}

fn run_tui(source: ReplaySource, catalog: terminal::replay::catalog::MatchCatalog) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, catalog);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(command) = app.handle_input(key) {
                match command {
                    AppCommand::Quit => return Ok(()),
                    _ => app.handle_command(command)?,
                }
            }
        }
    }
}
