//! Board CLI commands

use anyhow::{bail, Result};
use clap::Subcommand;
use serde::Serialize;

use super::output::Output;
use super::render::{format_amount, print_board, summarize, LaneSummary};
use super::session::Session;
use crate::storage::{AnyBoard, BoardFlavor, Config, DisplayConfig, Project};

#[derive(Subcommand)]
pub enum BoardCommands {
    /// List boards in this project
    List,

    /// Show a board's lanes and items
    Show,

    /// Create a new board
    New {
        /// Board name (letters, digits, '-' and '_')
        name: String,

        /// Item flavor: work or sales
        #[arg(long, default_value = "work")]
        flavor: BoardFlavor,

        /// Fill the board with sample lanes and items
        #[arg(long)]
        sample: bool,
    },

    /// Per-lane item counts (and totals for sales boards)
    Summary,

    /// Make a board the project default
    Use {
        /// Board name
        name: String,
    },
}

#[derive(Serialize)]
struct BoardEntry {
    name: String,
    flavor: BoardFlavor,
    lanes: usize,
    items: usize,
    dragging: bool,
}

pub fn run(cmd: BoardCommands, board: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        BoardCommands::List => list_boards(output),
        BoardCommands::Show => show_board(output, board),
        BoardCommands::New {
            name,
            flavor,
            sample,
        } => new_board(output, &name, flavor, sample),
        BoardCommands::Summary => board_summary(output, board),
        BoardCommands::Use { name } => use_board(output, &name),
    }
}

fn list_boards(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.board_store();
    let default = project.board_name(None);

    let mut entries = Vec::new();
    for name in store.list()? {
        let board = store.read(&name)?;
        entries.push(BoardEntry {
            flavor: board.flavor(),
            lanes: board.container_count(),
            items: board.item_count(),
            dragging: board.is_dragging(),
            name,
        });
    }

    if output.is_json() {
        output.data(&entries);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No boards. Create one with 'lanes board new <NAME>'.");
        return Ok(());
    }

    for entry in &entries {
        let marker = if entry.name == default { "*" } else { " " };
        println!(
            "{} {:<16} {:<6} {:>3} lanes {:>4} items{}",
            marker,
            entry.name,
            entry.flavor,
            entry.lanes,
            entry.items,
            if entry.dragging { "  (dragging)" } else { "" }
        );
    }

    Ok(())
}

fn show_board(output: &Output, board: Option<&str>) -> Result<()> {
    let session = Session::open(board, output)?;

    if output.is_json() {
        output.data(session.board());
        return Ok(());
    }

    let display = &session.project().config().project.display;
    match session.board() {
        AnyBoard::Work(board) => print_board(session.name(), board, display),
        AnyBoard::Sales(board) => print_board(session.name(), board, display),
    }

    Ok(())
}

fn new_board(output: &Output, name: &str, flavor: BoardFlavor, sample: bool) -> Result<()> {
    let project = Project::open_current()?;
    let board = if sample {
        AnyBoard::sample(flavor)
    } else {
        AnyBoard::empty(flavor)
    };

    output.verbose_ctx(
        "board",
        &format!("Creating {} board '{}' (sample={})", flavor, name, sample),
    );
    project.board_store().create(name, &board)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "flavor": flavor,
            "lanes": board.container_count(),
            "items": board.item_count(),
        }));
    } else {
        println!("Created {} board '{}'", flavor, name);
    }

    Ok(())
}

fn board_summary(output: &Output, board: Option<&str>) -> Result<()> {
    let session = Session::open(board, output)?;
    let display = &session.project().config().project.display;

    let lanes = match session.board() {
        AnyBoard::Work(board) => summarize(board),
        AnyBoard::Sales(board) => summarize(board),
    };

    let total = lanes
        .iter()
        .map(|lane| lane.value)
        .try_fold(0u64, |sum, value| value.map(|v| sum.saturating_add(v)));

    if output.is_json() {
        output.data(&serde_json::json!({
            "board": session.name(),
            "flavor": session.board().flavor(),
            "lanes": lanes,
            "total": total,
        }));
        return Ok(());
    }

    println!("Board '{}' ({})", session.name(), session.board().flavor());
    print_summary(&lanes, display);
    if let Some(total) = total.filter(|_| !lanes.is_empty()) {
        println!(
            "  {:<20} {:>4} items  {}",
            "Total",
            count_items(&lanes),
            format_amount(total, &display.currency)
        );
    }

    if session.board().is_dragging() {
        println!("  drag in progress");
    }

    Ok(())
}

fn count_items(lanes: &[LaneSummary]) -> usize {
    lanes.iter().map(|lane| lane.items).sum()
}

fn print_summary(lanes: &[LaneSummary], display: &DisplayConfig) {
    for lane in lanes {
        let mut line = format!("  {:<20} {:>4} items", lane.title, lane.items);
        if let Some(value) = lane.value {
            line.push_str(&format!("  {}", format_amount(value, &display.currency)));
        }
        if lane.compact {
            line.push_str("  (compact)");
        }
        println!("{}", line);
    }
}

fn use_board(output: &Output, name: &str) -> Result<()> {
    let project = Project::open_current()?;
    if !project.board_store().exists(name) {
        bail!("Board '{}' not found", name);
    }

    let mut config = Config::for_project(project.root())?;
    config.project.default_board = name.to_string();
    config.save_project()?;

    output.verbose_ctx("board", &format!("Default board set to '{}'", name));
    output.success(&format!("Default board is now '{}'", name));
    Ok(())
}
