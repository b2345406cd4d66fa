//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{apply_cmd, board_cmd, container_cmd, drag_cmd, item_cmd};
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "lanes")]
#[command(author, version, about = "Kanban boards with drag-and-drop reordering")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Board to operate on (defaults to the project's default_board)
    #[arg(long, short = 'b', global = true, env = "LANES_BOARD")]
    pub board: Option<String>,

    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new lanes project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Skip the sample work and sales boards
        #[arg(long)]
        empty: bool,
    },

    /// Manage boards
    #[command(subcommand)]
    Board(board_cmd::BoardCommands),

    /// Manage lanes
    #[command(subcommand)]
    Container(container_cmd::ContainerCommands),

    /// Manage items
    #[command(subcommand)]
    Item(item_cmd::ItemCommands),

    /// Drag items and lanes
    #[command(subcommand)]
    Drag(drag_cmd::DragCommands),

    /// Apply commands from a JSON Lines file (or stdin)
    Apply {
        /// Command file; '-' or omitted reads stdin
        file: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()?.default_format.into(),
    };
    let output = Output::new(format, cli.verbose);
    let board = cli.board.as_deref();

    output.verbose("Lanes CLI starting");

    match cli.command {
        Commands::Init { path, empty } => {
            output.verbose_ctx(
                "init",
                &format!("Initializing project at: {} (seed={})", path.display(), !empty),
            );
            let project = Project::init(&path, !empty)?;
            output.verbose_ctx(
                "init",
                &format!("Created .lanes directory at: {}", project.lanes_dir().display()),
            );
            output.success(&format!(
                "Initialized lanes project at {}",
                project.root().display()
            ));
        }

        Commands::Board(cmd) => board_cmd::run(cmd, board, &output)?,
        Commands::Container(cmd) => container_cmd::run(cmd, board, &output)?,
        Commands::Item(cmd) => item_cmd::run(cmd, board, &output)?,
        Commands::Drag(cmd) => drag_cmd::run(cmd, board, &output)?,

        Commands::Apply { file } => {
            output.verbose_ctx("apply", &format!("Reading commands from: {:?}", file));
            apply_cmd::run(file.as_deref(), board, &output)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}
