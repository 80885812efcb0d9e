//! # todo - single-screen to-do list
//!
//! A terminal to-do list that holds its tasks in memory for as long as the screen is
//! open: add, edit, save and delete short text tasks. Nothing is persisted.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the screen
//! todo
//!
//! # Open it with a couple of tasks already in place
//! todo ui --task "Buy milk" --task "Walk dog"
//!
//! # Drive the screen headlessly and print the resulting view as JSON
//! printf '{"op":"add","text":"Buy milk"}\n' | todo replay
//! ```
//!
//! ## Keys
//!
//! - Compose row: type, `Enter` to add, `Tab` to move to the list
//! - List: `Up`/`Down` to select, `e` to edit, `d` to delete, `Tab` back to compose, `q` to quit
//! - Editing a row: type, `Enter` to save, `Esc` to cancel, `Ctrl+D` to delete
//!
//! Set `RUST_LOG=debug` to see every state transition on stderr (`replay` mode only;
//! logging is muted while the interactive screen owns the terminal).

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

pub mod cli;
pub mod cmd;
pub mod error;
pub mod intent;
pub mod screen;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
}

use cli::Cli;
use cmd::*;

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing();

    match cli.command.unwrap_or(Commands::Ui { tasks: Vec::new() }) {
        Commands::Ui { tasks } => cmd_ui(&tasks),
        Commands::Replay { input, each } => cmd_replay(input, each),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

fn install_tracing() {
    // RUST_LOG overrides the default INFO level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
