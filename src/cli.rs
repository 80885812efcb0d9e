use clap::Parser;

use crate::cmd::Commands;

/// In-memory to-do list for the terminal.
/// Tasks last until the screen is closed; nothing is written to disk.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Single-screen to-do list")]
pub struct Cli {
    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
