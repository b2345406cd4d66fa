//! Container (lane) CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use super::session::{step, Session};
use crate::domain::{Board, BoardItem, Command, ContainerId, Outcome};
use crate::storage::AnyBoard;

#[derive(Subcommand)]
pub enum ContainerCommands {
    /// Add an empty lane
    ///
    /// Examples:
    ///   lanes container add "Review"               # Append at the end
    ///   lanes container add "Triage" --position 1  # Insert as first lane
    Add {
        /// Lane title
        title: String,

        /// 1-based position (defaults to the end)
        #[arg(long)]
        position: Option<usize>,
    },

    /// Rename a lane
    Rename {
        /// Lane ID
        id: ContainerId,

        /// New title
        title: String,
    },

    /// Toggle a lane's compact mode
    Compact {
        /// Lane ID
        id: ContainerId,
    },
}

pub fn run(cmd: ContainerCommands, board: Option<&str>, output: &Output) -> Result<()> {
    let mut session = Session::open(board, output)?;

    let (name, outcome) = match session.board_mut() {
        AnyBoard::Work(board) => run_on(board, cmd, output),
        AnyBoard::Sales(board) => run_on(board, cmd, output),
    };

    if outcome.changed_structure() {
        session.save(output)?;
    }
    output.outcome(name, &outcome);
    Ok(())
}

fn run_on<T: BoardItem>(
    board: &mut Board<T>,
    cmd: ContainerCommands,
    output: &Output,
) -> (&'static str, Outcome) {
    let command = match cmd {
        ContainerCommands::Add { title, position } => Command::AppendContainer { title, position },
        ContainerCommands::Rename { id, title } => Command::RenameContainer {
            container_id: id,
            title,
        },
        ContainerCommands::Compact { id } => Command::ToggleCompactMode { container_id: id },
    };

    let name = command.name();
    (name, step(board, command, output))
}
