//! Loads a board for a command, runs engine commands against it, saves it back

use anyhow::Result;

use super::output::Output;
use crate::domain::{Board, BoardItem, Command, Outcome};
use crate::storage::{AnyBoard, BoardLock, Project, StoreError};

/// An opened board within the current project.
///
/// Holds the board's lock from open until the session is dropped, so a
/// concurrent command waits instead of overwriting this one's save.
pub struct Session {
    project: Project,
    name: String,
    board: AnyBoard,
    _lock: BoardLock,
}

impl Session {
    /// Opens the named board, or the configured default
    pub fn open(board: Option<&str>, output: &Output) -> Result<Self> {
        let project = Project::open_current()?;
        let name = project.board_name(board).to_string();
        output.verbose_ctx(
            "session",
            &format!("Opening board '{}' in {}", name, project.root().display()),
        );

        let store = project.board_store();
        if !store.exists(&name) {
            return Err(StoreError::NotFound(name).into());
        }
        let lock = store.lock(&name)?;
        let board = store.read(&name)?;
        output.verbose_ctx(
            "session",
            &format!(
                "Loaded {} board: {} lanes, {} items",
                board.flavor(),
                board.container_count(),
                board.item_count()
            ),
        );

        Ok(Self {
            project,
            name,
            board,
            _lock: lock,
        })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &AnyBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut AnyBoard {
        &mut self.board
    }

    /// Writes the board back to its file
    pub fn save(&self, output: &Output) -> Result<()> {
        self.project.board_store().write(&self.name, &self.board)?;
        output.verbose_ctx("session", &format!("Saved board '{}'", self.name));
        Ok(())
    }
}

/// Applies one command, logging its outcome
pub fn step<T: BoardItem>(board: &mut Board<T>, command: Command<T>, output: &Output) -> Outcome {
    let name = command.name();
    let outcome = board.step(command);
    output.verbose_ctx(name, &outcome.to_string());
    outcome
}
