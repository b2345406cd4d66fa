//! Board and container model
//!
//! A board is an ordered sequence of containers (lanes), each holding an
//! ordered list of items. Ordering is display order. The board also carries
//! the transient drag state between a drag start and its drag end.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::{ContainerId, ItemId};
use super::item::BoardItem;

#[derive(Debug, Error, PartialEq)]
pub enum BoardError {
    #[error("Duplicate container ID: {0}")]
    DuplicateContainer(ContainerId),

    #[error("Item {item} appears more than once (in {first} and {second})")]
    DuplicateItem {
        item: ItemId,
        first: ContainerId,
        second: ContainerId,
    },

    #[error("Item ID {0} collides with a container ID")]
    AmbiguousId(ItemId),
}

/// An ordered, named group of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container<T> {
    pub id: ContainerId,

    pub title: String,

    /// Display-only flag
    #[serde(default)]
    pub compact: bool,

    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T: BoardItem> Container<T> {
    /// Creates an empty, non-compact container
    pub fn new(id: ContainerId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            compact: false,
            items: Vec::new(),
        }
    }

    /// Adds items, syncing their labels to this container's title
    pub fn with_items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for mut item in items {
            item.sync_label(&self.title);
            self.items.push(item);
        }
        self
    }

    /// Position of an item within this container
    pub fn position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == item_id)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.position(item_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates item IDs in display order
    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|item| item.id())
    }
}

/// The root aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board<T> {
    #[serde(default = "Vec::new")]
    pub containers: Vec<Container<T>>,

    /// Item being dragged, between an item drag start and its drag end
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub active_item: Option<T>,

    /// Container being dragged, between a container drag start and its drag end
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub active_container: Option<Container<T>>,
}

impl<T> Default for Board<T> {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            active_item: None,
            active_container: None,
        }
    }
}

impl<T: BoardItem> Board<T> {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board at rest from a list of containers
    pub fn with_containers(containers: Vec<Container<T>>) -> Self {
        Self {
            containers,
            active_item: None,
            active_container: None,
        }
    }

    /// Index of the container with this ID
    pub fn container_index(&self, id: &str) -> Option<usize> {
        self.containers.iter().position(|c| c.id == id)
    }

    pub fn container(&self, id: &str) -> Option<&Container<T>> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Container<T>> {
        self.containers.iter_mut().find(|c| c.id == id)
    }

    /// Resolves an ID to the index of its host container.
    ///
    /// A container ID resolves to itself; an item ID resolves to the container
    /// currently holding the item.
    pub fn resolve(&self, id: &str) -> Option<usize> {
        self.container_index(id)
            .or_else(|| self.containers.iter().position(|c| c.contains(id)))
    }

    /// Locates an item as `(container index, item index)`
    pub fn locate_item(&self, id: &str) -> Option<(usize, usize)> {
        self.containers
            .iter()
            .enumerate()
            .find_map(|(ci, c)| c.position(id).map(|ii| (ci, ii)))
    }

    pub fn item(&self, id: &str) -> Option<&T> {
        self.locate_item(id)
            .map(|(ci, ii)| &self.containers[ci].items[ii])
    }

    /// Total number of items across all containers
    pub fn item_count(&self) -> usize {
        self.containers.iter().map(Container::len).sum()
    }

    /// True while a drag gesture is in flight
    pub fn is_dragging(&self) -> bool {
        self.active_item.is_some() || self.active_container.is_some()
    }

    /// True if the ID is used by any container or item
    pub fn contains_id(&self, id: &str) -> bool {
        self.container_index(id).is_some() || self.locate_item(id).is_some()
    }

    /// Generates an item ID not yet used on this board
    pub fn fresh_item_id(&self, seed: &str) -> ItemId {
        let now = Utc::now();
        self.first_unused(|attempt| ItemId::generate(seed, now, attempt))
    }

    /// Generates a container ID not yet used on this board
    pub fn fresh_container_id(&self, seed: &str) -> ContainerId {
        let now = Utc::now();
        self.first_unused(|attempt| ContainerId::generate(seed, now, attempt))
    }

    /// Tries attempt 0, 1, 2, ... until the generated ID is free
    fn first_unused<I: Borrow<str>>(&self, generate: impl Fn(u32) -> I) -> I {
        let mut attempt = 0u32;
        loop {
            let id = generate(attempt);
            if !self.contains_id(id.borrow()) {
                return id;
            }
            attempt = attempt.wrapping_add(1);
        }
    }

    /// Checks the structural invariants of a board received from outside the engine
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut container_ids = HashSet::new();
        for container in &self.containers {
            if !container_ids.insert(container.id.as_str()) {
                return Err(BoardError::DuplicateContainer(container.id.clone()));
            }
        }

        let mut seen: HashMap<&str, &ContainerId> = HashMap::new();
        for container in &self.containers {
            for id in container.item_ids() {
                if container_ids.contains(id.as_str()) {
                    return Err(BoardError::AmbiguousId(id.clone()));
                }
                if let Some(first) = seen.insert(id.as_str(), &container.id) {
                    return Err(BoardError::DuplicateItem {
                        item: id.clone(),
                        first: first.clone(),
                        second: container.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{Deal, WorkItem};

    fn work(id: &str) -> WorkItem {
        WorkItem::new(id.parse().unwrap(), format!("Item {}", id))
    }

    fn lane(id: &str, items: &[&str]) -> Container<WorkItem> {
        Container::new(id.parse().unwrap(), id.to_uppercase())
            .with_items(items.iter().map(|i| work(i)))
    }

    fn board() -> Board<WorkItem> {
        Board::with_containers(vec![lane("a", &["x", "y"]), lane("b", &["p", "q"])])
    }

    #[test]
    fn resolve_container_and_item_ids() {
        let board = board();

        assert_eq!(board.resolve("a"), Some(0));
        assert_eq!(board.resolve("b"), Some(1));
        assert_eq!(board.resolve("y"), Some(0));
        assert_eq!(board.resolve("q"), Some(1));
        assert_eq!(board.resolve("missing"), None);
    }

    #[test]
    fn locate_and_count_items() {
        let board = board();

        assert_eq!(board.locate_item("q"), Some((1, 1)));
        assert_eq!(board.item("p").map(|i| i.title.as_str()), Some("Item p"));
        assert_eq!(board.item_count(), 4);
        assert!(!board.is_dragging());
    }

    #[test]
    fn with_items_syncs_labels() {
        let lane = Container::new("won".parse().unwrap(), "Won").with_items(vec![Deal::new(
            "d-1".parse().unwrap(),
            "Clinic renewal",
            "Acme",
            500,
        )]);

        assert_eq!(lane.items[0].stage, "Won");
    }

    #[test]
    fn validate_accepts_well_formed_board() {
        assert_eq!(board().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_duplicate_container() {
        let board = Board::with_containers(vec![lane("a", &[]), lane("a", &[])]);
        assert!(matches!(
            board.validate(),
            Err(BoardError::DuplicateContainer(_))
        ));
    }

    #[test]
    fn validate_rejects_item_in_two_containers() {
        let board = Board::with_containers(vec![lane("a", &["x"]), lane("b", &["x"])]);
        assert!(matches!(
            board.validate(),
            Err(BoardError::DuplicateItem { .. })
        ));
    }

    #[test]
    fn validate_rejects_item_named_like_container() {
        let board = Board::with_containers(vec![lane("a", &["b"]), lane("b", &[])]);
        assert!(matches!(board.validate(), Err(BoardError::AmbiguousId(_))));
    }

    #[test]
    fn fresh_ids_are_unused() {
        let board = board();
        let item = board.fresh_item_id("New item");
        let container = board.fresh_container_id("New lane");

        assert!(!board.contains_id(item.as_str()));
        assert!(!board.contains_id(container.as_str()));
    }

    #[test]
    fn fresh_ids_skip_every_taken_attempt() {
        let ts = Utc::now();
        let taken: Vec<ItemId> = (0..100).map(|a| ItemId::generate("Busy", ts, a)).collect();
        let mut lane = Container::<WorkItem>::new("a".parse().unwrap(), "A");
        lane.items = taken
            .iter()
            .map(|id| WorkItem::new(id.clone(), "Busy"))
            .collect();
        let board = Board::with_containers(vec![lane]);

        let id = board.first_unused(|a| ItemId::generate("Busy", ts, a));

        assert!(!board.contains_id(id.as_str()));
        assert!(!taken.contains(&id));
    }

    #[test]
    fn board_without_drag_fields_deserializes() {
        let json = r#"{"containers": [{"id": "lead", "title": "Lead", "items": [
            {"id": "d-1", "title": "Renewal", "company": "Acme", "value": 100, "stage": "Lead"}
        ]}]}"#;

        let board: Board<Deal> = serde_json::from_str(json).unwrap();
        assert!(!board.is_dragging());
        assert_eq!(board.item_count(), 1);

        let dragging = Board::<WorkItem>::with_containers(vec![lane("a", &["x"])]);
        let item = dragging.item("x").cloned();
        let dragging = Board {
            active_item: item,
            ..dragging
        };
        let json = serde_json::to_string(&dragging).unwrap();
        let back: Board<WorkItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dragging);
    }

    #[test]
    fn board_serde_omits_idle_drag_state() {
        let json = serde_json::to_value(board()).unwrap();

        assert!(json.get("active_item").is_none());
        assert!(json.get("active_container").is_none());
        assert_eq!(json["containers"][1]["items"][0]["id"], "p");
    }
}
