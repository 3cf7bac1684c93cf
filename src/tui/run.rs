//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module that touches the terminal. Everything runs
//! on one thread: the loop waits for input for at most as long as the
//! next scheduled task allows, then fires whatever timers are due.

use std::io;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::assets::AssetList;
use crate::error::Result;
use crate::types::{AppConfig, Now, PageId};

use super::state::{Action, App, AppEvent, Transition};
use super::update::{handle_tick, update};
use super::view::render;

/// Upper bound on how long the loop blocks when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Pages
        KeyCode::Char('1') | KeyCode::Char('h') => Some(Action::Navigate(PageId::Home)),
        KeyCode::Char('2') | KeyCode::Char('b') => Some(Action::Navigate(PageId::Subject)),
        KeyCode::Char('3') | KeyCode::Char('d') => Some(Action::Navigate(PageId::Author)),

        // Controls
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('s') => Some(Action::Shuffle),
        KeyCode::Char('p') => Some(Action::Celebrate),
        KeyCode::Char('m') => Some(Action::ToggleMenu),
        KeyCode::Esc => Some(Action::CloseMenu),

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::ScrollTop),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    Terminal::new(backend)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT SOURCE
// ============================================================================

/// Wait for the next event, but no later than `deadline`.
fn next_event(deadline: Option<Instant>) -> io::Result<AppEvent> {
    let timeout = match deadline {
        Some(at) => at.saturating_duration_since(Instant::now()).min(IDLE_POLL),
        None => IDLE_POLL,
    };

    if !event::poll(timeout)? {
        return Ok(AppEvent::Tick);
    }

    Ok(match event::read()? {
        // Ignore key releases on platforms that report them
        Event::Key(key) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
        Event::Resize(..) => AppEvent::Resize,
        _ => AppEvent::Tick,
    })
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the user quits.
pub fn run(config: &AppConfig, assets: AssetList) -> Result<()> {
    tracing::info!(
        photos = assets.discovered(),
        dark = config.dark_mode,
        reference = %config.reference,
        "starting tui"
    );

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let mut app = App::new(
        assets,
        config.reference,
        config.dark_mode,
        Box::new(rand::thread_rng()),
        Now::capture(),
    );

    let outcome = event_loop(&mut terminal, &mut app);

    // Restore even if the loop failed
    let restored = restore_terminal();
    outcome?;
    restored?;

    tracing::info!("tui exited");
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut dirty = true;

    loop {
        if dirty {
            let mut limit = 0;
            terminal.draw(|frame| limit = render(app, frame))?;
            app.router.scroll = app.router.scroll.min(limit);
            dirty = false;
        }

        if app.should_quit {
            break;
        }

        let event = next_event(app.next_wakeup(Instant::now()))?;

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key) {
                    match update(app, &action, Now::capture()) {
                        Transition::Redraw => dirty = true,
                        Transition::Ignored => {}
                        Transition::Quit => app.should_quit = true,
                    }
                }
            }
            AppEvent::Resize => dirty = true,
            AppEvent::Tick => {}
        }

        // Timers fire on every pass, not only on idle wakeups
        dirty |= handle_tick(app, Now::capture());
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
