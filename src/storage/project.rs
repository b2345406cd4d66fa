//! Project management
//!
//! Handles project initialization and provides access to the board store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::board_store::{AnyBoard, BoardFlavor, BoardStore};
use super::config::{Config, LANES_DIR};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a lanes project. Run 'lanes init' first.")]
    NotInProject,

    #[error("Failed to create project: {0}")]
    CreateFailed(String),
}

const DEFAULT_CONFIG: &str = r#"# Lanes configuration

# Board used when --board is not given
default_board = "work"

# Where 'lanes item add' places new items (start or end)
insert_at = "end"

[display]
# Print the items of compact lanes instead of only their count
expand_compact = false

# Currency shown next to deal values
currency = "USD"
"#;

const GITIGNORE: &str = r#"# Temp files left behind by interrupted writes
boards/*.tmp
boards/*.lock
"#;

/// A Lanes project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(LANES_DIR).is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path.
    ///
    /// With `seed`, sample `work` and `sales` boards are written unless boards
    /// with those names already exist.
    pub fn init(root: impl Into<PathBuf>, seed: bool) -> Result<Self> {
        let root = root.into();
        let lanes_dir = root.join(LANES_DIR);

        if lanes_dir.exists() && !lanes_dir.is_dir() {
            return Err(ProjectError::CreateFailed(format!(
                "{} exists and is not a directory",
                lanes_dir.display()
            ))
            .into());
        }

        let boards_dir = lanes_dir.join("boards");
        fs::create_dir_all(&boards_dir).with_context(|| {
            format!("Failed to create boards directory: {}", boards_dir.display())
        })?;

        let config_path = lanes_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = lanes_dir.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(&gitignore_path, GITIGNORE).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        let project = Self::open(root)?;

        if seed {
            let store = project.board_store();
            for flavor in [BoardFlavor::Work, BoardFlavor::Sales] {
                if !store.exists(flavor.as_str()) {
                    store.write(flavor.as_str(), &AnyBoard::sample(flavor))?;
                }
            }
        }

        Ok(project)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .lanes directory path
    pub fn lanes_dir(&self) -> PathBuf {
        self.root.join(LANES_DIR)
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the board store
    pub fn board_store(&self) -> BoardStore {
        BoardStore::for_project(&self.root)
    }

    /// Resolves an optional board name against the configured default
    pub fn board_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(self.config.project.default_board.as_str())
    }
}
