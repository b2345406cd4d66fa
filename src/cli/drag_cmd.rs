//! Drag CLI commands
//!
//! A drag spans several invocations: `start` records the active entity in the
//! board file, `over` relocates it between lanes, `end` finalizes the drop and
//! clears the drag state.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::output::Output;
use super::session::{step, Session};
use crate::domain::{Board, BoardItem, Command, DragTarget, Outcome, Rect};
use crate::storage::AnyBoard;

#[derive(Subcommand)]
pub enum DragCommands {
    /// Pick up an item or lane
    Start {
        /// Item or lane ID
        id: String,
    },

    /// Hover the active item over another item or lane
    Over(OverArgs),

    /// Drop the active item or lane
    End {
        /// Active item or lane ID
        active: String,

        /// Item or lane ID under the pointer
        #[arg(long)]
        over: Option<String>,
    },
}

#[derive(Args)]
pub struct OverArgs {
    /// Active item ID
    active: String,

    /// Item or lane ID under the pointer
    #[arg(long)]
    over: Option<String>,

    /// Top edge of the dragged item
    #[arg(long, allow_negative_numbers = true)]
    active_top: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    active_height: f64,

    /// Top edge of the hovered item
    #[arg(long, allow_negative_numbers = true)]
    over_top: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    over_height: f64,
}

pub fn run(cmd: DragCommands, board: Option<&str>, output: &Output) -> Result<()> {
    let mut session = Session::open(board, output)?;

    let (name, outcome) = match session.board_mut() {
        AnyBoard::Work(board) => run_on(board, cmd, output)?,
        AnyBoard::Sales(board) => run_on(board, cmd, output)?,
    };

    session.save(output)?;
    output.outcome(name, &outcome);
    Ok(())
}

fn run_on<T: BoardItem>(
    board: &mut Board<T>,
    cmd: DragCommands,
    output: &Output,
) -> Result<(&'static str, Outcome)> {
    let command = match cmd {
        DragCommands::Start { id } => Command::DragStart {
            target: drag_target(board, &id)?,
        },
        DragCommands::Over(args) => Command::DragOver {
            active_id: args.active,
            over_id: args.over,
            active_rect: args.active_top.map(|top| Rect::vertical(top, args.active_height)),
            over_rect: args.over_top.map(|top| Rect::vertical(top, args.over_height)),
        },
        DragCommands::End { active, over } => Command::DragEnd {
            active_id: active,
            over_id: over,
        },
    };

    let name = command.name();
    Ok((name, step(board, command, output)))
}

/// Snapshot of the entity to drag, looked up by id
fn drag_target<T: BoardItem>(board: &Board<T>, id: &str) -> Result<DragTarget<T>> {
    if let Some(container) = board.container(id) {
        return Ok(DragTarget::Container(container.clone()));
    }
    if let Some(item) = board.item(id) {
        return Ok(DragTarget::Item(item.clone()));
    }
    bail!("No item or lane with ID '{}'", id)
}
