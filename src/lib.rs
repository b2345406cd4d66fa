//! Lanes - Kanban boards with drag-and-drop reordering
//!
//! A board is an ordered list of containers (lanes), each holding an ordered
//! list of items. Every change is a [`Command`] applied by a pure transition
//! on [`Board`]; boards are stored as JSON snapshots under `.lanes/boards/`.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Board, Command, Container, ContainerId, Deal, ItemId, Outcome, WorkItem};
