//! TUI entry point and terminal setup.

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::subscriber::NoSubscriber;

use crate::tui::app::App;

/// Initialise the terminal, run the task list screen until the user quits, then
/// restore the terminal.
///
/// Log output is suppressed while the alternate screen is active.
pub fn run_tui(seed: &[String]) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_tasks(seed);
    let result = tracing::subscriber::with_default(NoSubscriber::default(), || app.run(&mut terminal));

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.context("terminal UI failed")
}
