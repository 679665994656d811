//! bcrisk - Breast Cancer Risk Self-Assessment
//!
//! Terminal front end for a breast cancer risk prediction service. The user
//! fills in BRCA result, weight, height, age, province and gender; the form
//! is posted as JSON and the returned prediction is shown in an overlay.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use bcrisk::application::{App, Dispatcher};
use bcrisk::infrastructure::{Config, HttpPredictionClient, init_file_logger};
use bcrisk::presentation::{InputAction, InputHandler, render_ui};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Entry point.
///
/// Configuration and logging are set up before the terminal is switched to
/// raw mode, so bad arguments are reported on a normal screen.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log file cannot be
/// opened, or the terminal fails during setup or runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let endpoint = config.endpoint_url()?;
    init_file_logger(&config.log_file, config.verbose)?;

    let client = HttpPredictionClient::new(endpoint, config.timeout())?;
    tracing::info!(endpoint = %client.endpoint(), timeout = ?config.timeout(), "starting bcrisk");
    let dispatcher = Dispatcher::new(Arc::new(client));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::default();
    let res = run_app(&mut terminal, &mut app, &dispatcher);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("terminal failure: {err}");
        println!("{err:?}");
    }
    tracing::info!("bcrisk stopped");

    Ok(())
}

/// Main event loop.
///
/// Polls for key presses with a short timeout so that finished predictions
/// are picked up and the busy spinner keeps turning while a request runs.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &Dispatcher,
) -> io::Result<()> {
    loop {
        while let Some(outcome) = dispatcher.try_collect() {
            app.complete_submission(outcome);
        }

        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match InputHandler::handle_key_event(app, key.code, key.modifiers) {
                        InputAction::Submit(request) => dispatcher.dispatch(request),
                        InputAction::Quit => return Ok(()),
                        InputAction::None => {}
                    }
                }
            }
        } else {
            app.tick();
        }
    }
}
