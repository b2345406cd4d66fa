//! Lanes CLI - Kanban boards with drag-and-drop reordering

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = lanes_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
