//! Command implementations for the CLI interface.
//!
//! `ui` runs the interactive screen, `replay` drives the same screen headlessly from an
//! intent script, and `completions` prints shell completion scripts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::{debug, info};

use crate::error::ReplayError;
use crate::intent::Intent;
use crate::screen::TaskListScreen;
use crate::tui::run::run_tui;
use crate::view::ScreenView;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive to-do screen.
    Ui {
        /// Task to add before the screen opens. May be repeated; later tasks end up on top.
        #[arg(long = "task")]
        tasks: Vec<String>,
    },

    /// Apply newline-delimited JSON intents to a fresh screen and print the result.
    Replay {
        /// Intent script to read. Reads stdin when omitted.
        input: Option<PathBuf>,
        /// Print the view after every intent instead of only at the end.
        #[arg(long)]
        each: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal UI, seeded with the given tasks.
pub fn cmd_ui(tasks: &[String]) -> Result<()> {
    info!(seeded = tasks.len(), "starting to-do screen");
    run_tui(tasks)?;
    info!("to-do screen closed");
    Ok(())
}

/// Replay an intent script from a file or stdin and print the resulting view(s).
pub fn cmd_replay(input: Option<PathBuf>, each: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match input {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
            replay(BufReader::new(file), &mut out, each)
                .with_context(|| format!("failed to replay {}", path.display()))?;
        }
        None => {
            replay(io::stdin().lock(), &mut out, each).context("failed to replay stdin")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Print completions for the requested shell to stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

/// Apply every intent in `reader` to a fresh screen.
///
/// With `each`, one compact JSON view is written per applied intent; otherwise only the
/// final view is written, pretty-printed. Returns the final view.
pub fn replay<R: BufRead, W: Write>(reader: R, out: &mut W, each: bool) -> Result<ScreenView, ReplayError> {
    let mut screen = TaskListScreen::new();
    let mut applied = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let intent = Intent::parse_line(&line).map_err(|source| ReplayError::InvalidIntent { line: idx + 1, source })?;
        let Some(intent) = intent else {
            continue;
        };
        debug!(line = idx + 1, ?intent, "applying intent");
        screen.apply(intent);
        applied += 1;

        if each {
            serde_json::to_writer(&mut *out, &screen.render()).map_err(ReplayError::Encode)?;
            writeln!(out)?;
        }
    }

    let view = screen.render();
    if !each {
        serde_json::to_writer_pretty(&mut *out, &view).map_err(ReplayError::Encode)?;
        writeln!(out)?;
    }
    info!(applied, tasks = view.rows.len(), "replay finished");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{RowMode, EMPTY_MESSAGE};

    fn run(script: &str, each: bool) -> (Result<ScreenView, ReplayError>, String) {
        let mut out = Vec::new();
        let result = replay(script.as_bytes(), &mut out, each);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn replays_shopping_script() {
        let script = r#"
# two tasks, ids are issued 1, 2, ...
{"op":"add","text":"Buy milk"}
{"op":"compose","text":"Walk dog"}
{"op":"submit"}
{"op":"begin_edit","id":"1"}
{"op":"update_draft","text":"Buy oat milk"}
{"op":"save_edit"}
{"op":"remove","id":"2"}
"#;
        let (result, output) = run(script, false);
        let view = result.unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].mode, RowMode::Display { name: "Buy oat milk".to_string() });
        assert_eq!(view.compose, "");

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["rows"][0]["name"], "Buy oat milk");
        assert_eq!(json["rows"][0]["mode"], "display");
        assert_eq!(json["rows"][0]["id"], "1");
        assert!(json.get("empty_message").is_none());
    }

    #[test]
    fn each_mode_writes_one_view_per_intent() {
        let script = "{\"op\":\"add\",\"text\":\"a\"}\n\n{\"op\":\"begin_edit\",\"id\":\"1\"}\n";
        let (result, output) = run(script, true);
        assert!(result.is_ok());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["rows"][0]["mode"], "editing");
        assert_eq!(last["rows"][0]["draft"], "a");
    }

    #[test]
    fn empty_script_renders_placeholder() {
        let (result, output) = run("", false);
        assert_eq!(result.unwrap().empty_message, Some(EMPTY_MESSAGE));
        assert!(output.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn invalid_line_reports_line_number() {
        let script = "{\"op\":\"add\",\"text\":\"a\"}\n{\"op\":\"shuffle\"}\n";
        let (result, _) = run(script, false);
        match result {
            Err(ReplayError::InvalidIntent { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected invalid intent error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let script = "{\"op\":\"remove\",\"id\":\"9\"}\n{\"op\":\"begin_edit\",\"id\":\"9\"}\n{\"op\":\"save_edit\"}\n";
        let (result, _) = run(script, false);
        let view = result.unwrap();
        assert!(view.rows.is_empty());
    }
}
