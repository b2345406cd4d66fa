//! # Storage Layer
//!
//! Host-side persistence for Lanes. The engine itself never touches disk;
//! snapshots are stored between CLI invocations so a drag gesture can span
//! several of them.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Boards | JSON, tagged with flavor | `.lanes/boards/{name}.json` |
//! | Config | TOML | `.lanes/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`BoardStore::lock`] serializes read-modify-write cycles per board (`fs2`)
//! - All writes are atomic (temp file + rename)
//!
//! ## Project Structure
//!
//! ```text
//! .lanes/
//! ├── boards/
//! │   ├── work.json         # Work-item board
//! │   └── sales.json        # Sales pipeline
//! ├── config.toml           # Project configuration
//! └── .gitignore
//! ```

mod config;
mod project;
mod board_store;

pub use config::{Config, ConfigError, DisplayConfig, GlobalConfig, OutputFormat, ProjectConfig, LANES_DIR};
pub use project::{Project, ProjectError};
pub use board_store::{AnyBoard, BoardFlavor, BoardLock, BoardStore, StoreError};
