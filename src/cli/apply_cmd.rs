//! Replays engine commands from a JSON Lines file
//!
//! One command per line, e.g.
//! `{"type": "drag_end", "active_id": "w-101", "over_id": "w-103"}`.
//! Blank lines and lines starting with `#` are skipped. Nothing is written
//! unless every line parses.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::output::Output;
use super::session::{step, Session};
use crate::domain::{Board, BoardItem, Command};
use crate::storage::AnyBoard;

pub fn run(file: Option<&Path>, board: Option<&str>, output: &Output) -> Result<()> {
    let input = match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read commands: {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read commands from stdin")?;
            buf
        }
    };

    let mut session = Session::open(board, output)?;
    let applied = match session.board_mut() {
        AnyBoard::Work(board) => apply_all(board, &input, output)?,
        AnyBoard::Sales(board) => apply_all(board, &input, output)?,
    };

    session.save(output)?;
    output.verbose_ctx("apply", &format!("Applied {} commands", applied));
    Ok(())
}

/// Parses each non-comment line as a command, then steps through them in order
fn apply_all<T>(board: &mut Board<T>, input: &str, output: &Output) -> Result<usize>
where
    T: BoardItem + DeserializeOwned,
{
    let commands = parse_commands::<T>(input)?;
    let count = commands.len();

    for command in commands {
        let name = command.name();
        let outcome = step(board, command, output);
        output.outcome(name, &outcome);
    }

    Ok(count)
}

fn parse_commands<T: DeserializeOwned>(input: &str) -> Result<Vec<Command<T>>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid command on line {}", index + 1))
        })
        .collect()
}
