//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project setup | `init` |
//! | Board | Board files | `board list`, `board show`, `board summary` |
//! | Container | Lane edits | `container add`, `container rename`, `container compact` |
//! | Item | Item edits | `item add`, `item show` |
//! | Drag | Drag lifecycle | `drag start`, `drag over`, `drag end` |
//! | Apply | Scripted replay | `apply commands.jsonl` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! lanes --verbose drag end w-101 --over w-103
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod render;
mod session;
mod board_cmd;
mod container_cmd;
mod item_cmd;
mod drag_cmd;
mod apply_cmd;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use render::{format_amount, parse_amount, summarize, ItemLine, LaneSummary};
