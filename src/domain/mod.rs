//! Domain models for Lanes
//!
//! The board model and the reordering engine, without any I/O concerns.

mod id;
mod geometry;
mod item;
mod board;
mod command;
mod engine;
pub mod sample;

pub use id::{ContainerId, ItemId, IdError};
pub use geometry::Rect;
pub use item::{BoardItem, Deal, Priority, WorkItem};
pub use board::{Board, BoardError, Container};
pub use command::{Command, DragTarget, InsertAt, NoOpReason, Outcome};
pub use engine::{move_element, reduce};
