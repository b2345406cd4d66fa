//! Commands accepted by the reordering engine and the outcomes they report

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Container;
use super::geometry::Rect;
use super::id::{ContainerId, ItemId};

/// The entity picked up by a drag start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum DragTarget<T> {
    Item(T),
    Container(Container<T>),
}

/// Where `AppendItem` places the new item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertAt {
    Start,
    #[default]
    End,
}

/// A single engine input
///
/// Serialized internally tagged, e.g.
/// `{"type": "drag_end", "active_id": "x", "over_id": "z"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command<T> {
    /// Records the dragged entity
    DragStart { target: DragTarget<T> },

    /// Pointer moved while dragging; may relocate the active item across containers
    DragOver {
        active_id: String,
        #[serde(default)]
        over_id: Option<String>,
        #[serde(default)]
        active_rect: Option<Rect>,
        #[serde(default)]
        over_rect: Option<Rect>,
    },

    /// Drop; finalizes intra-container or container-level reorders
    DragEnd {
        active_id: String,
        #[serde(default)]
        over_id: Option<String>,
    },

    /// Inserts an item into the first container with a matching title
    AppendItem {
        container_title: String,
        item: T,
        #[serde(default)]
        insert_at: InsertAt,
    },

    /// Inserts an empty container at a 1-based position (end when absent)
    AppendContainer {
        title: String,
        #[serde(default)]
        position: Option<usize>,
    },

    ToggleCompactMode { container_id: ContainerId },

    RenameContainer { container_id: ContainerId, title: String },
}

impl<T> Command<T> {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::DragStart { .. } => "drag_start",
            Command::DragOver { .. } => "drag_over",
            Command::DragEnd { .. } => "drag_end",
            Command::AppendItem { .. } => "append_item",
            Command::AppendContainer { .. } => "append_container",
            Command::ToggleCompactMode { .. } => "toggle_compact_mode",
            Command::RenameContainer { .. } => "rename_container",
        }
    }
}

/// Why a command left the board untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    /// An ID did not name a container or an item on the board
    Unresolved,
    /// Hovering within the item's own container; settled at drop time
    SameContainer,
    /// Geometry for the active or hovered element was not supplied
    MissingGeometry,
    /// The active ID names a container; container moves settle at drop time
    ContainerHover,
    /// No container has the requested title
    NoMatchingTitle,
    /// No container has the requested ID
    UnknownContainer,
}

impl fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            NoOpReason::Unresolved => "id did not resolve to a container",
            NoOpReason::SameContainer => "hover within the same container",
            NoOpReason::MissingGeometry => "geometry not measured",
            NoOpReason::ContainerHover => "container hover",
            NoOpReason::NoMatchingTitle => "no container with that title",
            NoOpReason::UnknownContainer => "unknown container",
        };
        f.write_str(text)
    }
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    DragStarted { id: String },
    Relocated {
        item: ItemId,
        from: ContainerId,
        to: ContainerId,
        index: usize,
    },
    Reordered {
        container: ContainerId,
        from: usize,
        to: usize,
    },
    ContainerMoved {
        container: ContainerId,
        from: usize,
        to: usize,
    },
    /// Drop applied no reorder; drag state was cleared
    DragCleared,
    ContainerAppended { container: ContainerId, index: usize },
    ItemAppended { item: ItemId, container: ContainerId },
    CompactToggled { container: ContainerId, compact: bool },
    Renamed { container: ContainerId },
    Unchanged { reason: NoOpReason },
}

impl Outcome {
    pub(crate) fn unchanged(reason: NoOpReason) -> Self {
        Outcome::Unchanged { reason }
    }

    /// True if the container structure or a container's fields changed
    pub fn changed_structure(&self) -> bool {
        !matches!(
            self,
            Outcome::Unchanged { .. } | Outcome::DragStarted { .. } | Outcome::DragCleared
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::DragStarted { id } => write!(f, "dragging {}", id),
            Outcome::Relocated {
                item,
                from,
                to,
                index,
            } => write!(f, "moved {} from {} to {} at {}", item, from, to, index),
            Outcome::Reordered {
                container,
                from,
                to,
            } => write!(f, "reordered {}: {} -> {}", container, from, to),
            Outcome::ContainerMoved {
                container,
                from,
                to,
            } => write!(f, "moved container {}: {} -> {}", container, from, to),
            Outcome::DragCleared => f.write_str("drag ended without reorder"),
            Outcome::ContainerAppended { container, index } => {
                write!(f, "added container {} at {}", container, index + 1)
            }
            Outcome::ItemAppended { item, container } => {
                write!(f, "added item {} to {}", item, container)
            }
            Outcome::CompactToggled { container, compact } => {
                write!(f, "{} compact = {}", container, compact)
            }
            Outcome::Renamed { container } => write!(f, "renamed {}", container),
            Outcome::Unchanged { reason } => write!(f, "unchanged ({})", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::WorkItem;

    #[test]
    fn parses_drag_over_json() {
        let json = r#"{
            "type": "drag_over",
            "active_id": "x",
            "over_id": "p",
            "active_rect": {"top": 100, "height": 20},
            "over_rect": {"top": 50, "height": 40}
        }"#;

        let cmd: Command<WorkItem> = serde_json::from_str(json).unwrap();
        match cmd {
            Command::DragOver {
                active_id,
                over_id,
                active_rect,
                over_rect,
            } => {
                assert_eq!(active_id, "x");
                assert_eq!(over_id.as_deref(), Some("p"));
                assert_eq!(active_rect.map(|r| r.top), Some(100.0));
                assert_eq!(over_rect.map(|r| r.bottom()), Some(90.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn optional_fields_default() {
        let cmd: Command<WorkItem> =
            serde_json::from_str(r#"{"type": "drag_end", "active_id": "x"}"#).unwrap();
        assert_eq!(
            cmd,
            Command::DragEnd {
                active_id: "x".to_string(),
                over_id: None
            }
        );

        let cmd: Command<WorkItem> = serde_json::from_str(
            r#"{"type": "append_item", "container_title": "To Do", "item": {"id": "tmp", "title": "Call lab"}}"#,
        )
        .unwrap();
        assert!(matches!(
            cmd,
            Command::AppendItem {
                insert_at: InsertAt::End,
                ..
            }
        ));
    }

    #[test]
    fn parses_drag_start_target() {
        let cmd: Command<WorkItem> = serde_json::from_str(
            r#"{"type": "drag_start", "target": {"kind": "item", "payload": {"id": "x", "title": "X"}}}"#,
        )
        .unwrap();

        assert_eq!(cmd.name(), "drag_start");
        assert!(matches!(
            cmd,
            Command::DragStart {
                target: DragTarget::Item(_)
            }
        ));
    }

    #[test]
    fn outcome_display() {
        let outcome = Outcome::unchanged(NoOpReason::SameContainer);
        assert_eq!(outcome.to_string(), "unchanged (hover within the same container)");
        assert!(!outcome.changed_structure());
        assert!(!Outcome::DragCleared.changed_structure());
    }
}
