//! mentor-edit - Mentor Application Editor
//!
//! Terminal front end for viewing and updating a mentor application.
//! Loads the program and any existing application on start, lets the
//! user edit the form, and submits the update to the backend.

use std::io;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{info, warn};

use mentor_edit::application::{run_pending_task, App};
use mentor_edit::infrastructure::{telemetry, AppConfig, HttpMentorshipApi, MentorshipApi, SessionRepository};
use mentor_edit::presentation::{render_ui, InputHandler};

/// Entry point for the mentor application editor.
///
/// Reads configuration, installs file logging, loads the signed-in session,
/// then runs the terminal interface until the user goes home or quits.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the session file cannot be
/// read, or terminal setup fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let session = SessionRepository::load(&config.session_file)?;
    if session.is_none() {
        warn!(path = %config.session_file.display(), "no session found; login required");
    }
    let api = HttpMentorshipApi::new(config.api_url.clone(), session.as_ref())?;
    info!(program = %config.program_id, api = %config.api_url, "starting mentor application editor");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.program_id.clone(), session);
    app.mount();
    let res = run_app(&mut terminal, &mut app, &api);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if app.exit_to_home {
        info!("returned to home");
    }

    Ok(())
}

/// Main application event loop.
///
/// Each pass draws the screen, then runs the editor's queued load or submit
/// (so the loading indicator is visible while it runs), and otherwise waits
/// for a key. Ends on back-navigation or Ctrl+C.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend, A: MentorshipApi>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api: &A,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if app.exit_to_home {
            return Ok(());
        }
        if run_pending_task(app, api) {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
