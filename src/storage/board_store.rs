//! Board snapshot storage
//!
//! Each board lives in `.lanes/boards/{name}.json`, tagged with its flavor.
//! A read-modify-write cycle holds [`BoardLock`] on `{name}.lock` from before
//! the read until after the rename. Writes go through a temp file + rename.
//! Every snapshot is validated on read.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{sample, Board, BoardError, Deal, WorkItem};

use super::config::LANES_DIR;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Board not found: {0}")]
    NotFound(String),

    #[error("Board already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid board name '{0}': use letters, digits, '-' or '_'")]
    InvalidName(String),

    #[error("Board '{name}' is inconsistent: {source}")]
    Invalid {
        name: String,
        #[source]
        source: BoardError,
    },
}

/// Which item payload a board holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardFlavor {
    Work,
    Sales,
}

impl BoardFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardFlavor::Work => "work",
            BoardFlavor::Sales => "sales",
        }
    }
}

impl fmt::Display for BoardFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(BoardFlavor::Work),
            "sales" => Ok(BoardFlavor::Sales),
            other => Err(format!("unknown board flavor '{}' (expected work or sales)", other)),
        }
    }
}

/// A stored board of either flavor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "flavor", rename_all = "snake_case")]
pub enum AnyBoard {
    Work(Board<WorkItem>),
    Sales(Board<Deal>),
}

impl AnyBoard {
    /// Empty board of the given flavor
    pub fn empty(flavor: BoardFlavor) -> Self {
        match flavor {
            BoardFlavor::Work => AnyBoard::Work(Board::new()),
            BoardFlavor::Sales => AnyBoard::Sales(Board::new()),
        }
    }

    /// Sample board of the given flavor
    pub fn sample(flavor: BoardFlavor) -> Self {
        match flavor {
            BoardFlavor::Work => AnyBoard::Work(sample::work_board()),
            BoardFlavor::Sales => AnyBoard::Sales(sample::sales_board()),
        }
    }

    pub fn flavor(&self) -> BoardFlavor {
        match self {
            AnyBoard::Work(_) => BoardFlavor::Work,
            AnyBoard::Sales(_) => BoardFlavor::Sales,
        }
    }

    pub fn validate(&self) -> Result<(), BoardError> {
        match self {
            AnyBoard::Work(board) => board.validate(),
            AnyBoard::Sales(board) => board.validate(),
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            AnyBoard::Work(board) => board.item_count(),
            AnyBoard::Sales(board) => board.item_count(),
        }
    }

    pub fn container_count(&self) -> usize {
        match self {
            AnyBoard::Work(board) => board.containers.len(),
            AnyBoard::Sales(board) => board.containers.len(),
        }
    }

    pub fn is_dragging(&self) -> bool {
        match self {
            AnyBoard::Work(board) => board.is_dragging(),
            AnyBoard::Sales(board) => board.is_dragging(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Exclusive hold on one board; released when dropped
#[derive(Debug)]
pub struct BoardLock {
    _file: File,
}

/// Store for board snapshots
pub struct BoardStore {
    dir: PathBuf,
}

impl BoardStore {
    /// Creates a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(LANES_DIR).join("boards"))
    }

    /// Path of a board file
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    /// Path of a board's lock file
    pub fn lock_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.lock", name))
    }

    /// Blocks until this process holds the board's lock
    pub fn lock(&self, name: &str) -> Result<BoardLock> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.lock_path(name);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open lock file: {}", path.display()))?;

        file.lock_exclusive()
            .with_context(|| format!("Failed to lock board '{}'", name))?;

        Ok(BoardLock { _file: file })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Lists board names, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read boards directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.extension().map(|ext| ext == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Reads and validates a board
    pub fn read(&self, name: &str) -> Result<AnyBoard> {
        validate_name(name)?;
        let path = self.path(name);
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()).into());
        }

        let file = File::open(&path)
            .with_context(|| format!("Failed to open board: {}", path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on board")?;

        let board: AnyBoard = serde_json::from_reader(BufReader::new(&file))
            .with_context(|| format!("Failed to parse board: {}", path.display()))?;

        board.validate().map_err(|source| StoreError::Invalid {
            name: name.to_string(),
            source,
        })?;

        Ok(board)
    }

    /// Writes a board (full rewrite)
    pub fn write(&self, name: &str, board: &AnyBoard) -> Result<()> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let path = self.path(name);
        let temp_path = path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Truncate only once the lock is held
            file.lock_exclusive()
                .context("Failed to acquire write lock on board")?;
            file.set_len(0).context("Failed to truncate temp file")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, board).context("Failed to serialize board")?;
            writeln!(writer).context("Failed to write board")?;
            writer.flush().context("Failed to flush board")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }

    /// Writes a new board, failing if one with this name exists
    pub fn create(&self, name: &str, board: &AnyBoard) -> Result<()> {
        validate_name(name)?;
        if self.exists(name) {
            return Err(StoreError::AlreadyExists(name.to_string()).into());
        }
        self.write(name, board)
    }
}
