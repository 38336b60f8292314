use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dropboard::{app::App, config::Config, error::AppError, logging, ui};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tracing::{debug, info};

fn main() -> Result<(), AppError> {
    let config = Config::parse();
    logging::init(&config)?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.initial_board());
    info!(tasks = app.board.len(), "board ready");

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match serde_json::to_string(&app.board) {
        Ok(snapshot) => debug!(%snapshot, "final board"),
        Err(err) => debug!(%err, "could not serialize final board"),
    }

    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), AppError> {
    while !app.should_quit {
        terminal.draw(|frame| {
            app.viewport = frame.area();
            ui::draw(frame, app);
        })?;
        app.handle_event(event::read()?);
    }
    Ok(())
}
