//! Reordering engine
//!
//! State transitions over a [`Board`]. Every command succeeds; references that
//! don't resolve leave the board untouched and report
//! [`Outcome::Unchanged`]. Drag hover across containers relocates the item
//! immediately (optimistic relocation); reorders within a container and
//! container moves settle on drop.
//!
//! ## Hover insertion rule
//!
//! When the pointer is over item `o` at index `i` of another container, the
//! dragged item lands at `i + 1` if its top edge is below `o`'s bottom edge,
//! else at `i`. Hovering the container itself (or empty space in it) lands at
//! index `0`.

use super::board::{Board, Container};
use super::command::{Command, DragTarget, InsertAt, NoOpReason, Outcome};
use super::geometry::Rect;
use super::item::BoardItem;

/// Moves the element at `from` to `to`, shifting the elements in between.
///
/// Out-of-range indices leave the slice untouched.
pub fn move_element<T>(items: &mut [T], from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
}

/// Applies a command to a borrowed board, returning the next snapshot
pub fn reduce<T: BoardItem>(board: &Board<T>, command: Command<T>) -> Board<T> {
    board.clone().apply(command)
}

impl<T: BoardItem> Board<T> {
    /// Applies a command and returns the next snapshot
    pub fn apply(mut self, command: Command<T>) -> Self {
        self.step(command);
        self
    }

    /// Applies a command in place, reporting what happened
    pub fn step(&mut self, command: Command<T>) -> Outcome {
        match command {
            Command::DragStart { target } => self.drag_start(target),
            Command::DragOver {
                active_id,
                over_id,
                active_rect,
                over_rect,
            } => self.drag_over(&active_id, over_id.as_deref(), active_rect, over_rect),
            Command::DragEnd { active_id, over_id } => {
                self.drag_end(&active_id, over_id.as_deref())
            }
            Command::AppendItem {
                container_title,
                item,
                insert_at,
            } => self.append_item(&container_title, item, insert_at),
            Command::AppendContainer { title, position } => {
                self.append_container(title, position)
            }
            Command::ToggleCompactMode { container_id } => {
                match self.container_mut(container_id.as_str()) {
                    Some(container) => {
                        container.compact = !container.compact;
                        Outcome::CompactToggled {
                            container: container_id,
                            compact: container.compact,
                        }
                    }
                    None => Outcome::unchanged(NoOpReason::UnknownContainer),
                }
            }
            Command::RenameContainer {
                container_id,
                title,
            } => match self.container_mut(container_id.as_str()) {
                // Items keep their synchronized labels until they move
                Some(container) => {
                    container.title = title;
                    Outcome::Renamed {
                        container: container_id,
                    }
                }
                None => Outcome::unchanged(NoOpReason::UnknownContainer),
            },
        }
    }

    fn drag_start(&mut self, target: DragTarget<T>) -> Outcome {
        match target {
            DragTarget::Item(item) => {
                let id = item.id().to_string();
                self.active_item = Some(item);
                self.active_container = None;
                Outcome::DragStarted { id }
            }
            DragTarget::Container(container) => {
                let id = container.id.to_string();
                self.active_container = Some(container);
                self.active_item = None;
                Outcome::DragStarted { id }
            }
        }
    }

    fn drag_over(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
        active_rect: Option<Rect>,
        over_rect: Option<Rect>,
    ) -> Outcome {
        let Some(over_id) = over_id else {
            return Outcome::unchanged(NoOpReason::Unresolved);
        };
        let (Some(from), Some(to)) = (self.resolve(active_id), self.resolve(over_id)) else {
            return Outcome::unchanged(NoOpReason::Unresolved);
        };
        if from == to {
            return Outcome::unchanged(NoOpReason::SameContainer);
        }
        let (Some(active_rect), Some(over_rect)) = (active_rect, over_rect) else {
            return Outcome::unchanged(NoOpReason::MissingGeometry);
        };
        let Some(active_index) = self.containers[from].position(active_id) else {
            return Outcome::unchanged(NoOpReason::ContainerHover);
        };

        let target = &self.containers[to];
        let index = match target.position(over_id) {
            Some(over_index) if active_rect.is_below(&over_rect) => over_index + 1,
            Some(over_index) => over_index,
            None => 0,
        };

        let mut item = self.containers[from].items.remove(active_index);
        let target = &mut self.containers[to];
        item.sync_label(&target.title);
        let index = index.min(target.items.len());
        let item_id = item.id().clone();
        target.items.insert(index, item);

        Outcome::Relocated {
            item: item_id,
            from: self.containers[from].id.clone(),
            to: self.containers[to].id.clone(),
            index,
        }
    }

    fn drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> Outcome {
        self.active_item = None;
        self.active_container = None;

        let Some(over_id) = over_id else {
            return Outcome::DragCleared;
        };
        let (Some(active_host), Some(over_host)) = (self.resolve(active_id), self.resolve(over_id))
        else {
            return Outcome::DragCleared;
        };

        if self.container_index(active_id).is_some() {
            return self.settle_container_drop(active_host, over_host);
        }

        if active_host != over_host {
            return Outcome::DragCleared;
        }

        let container = &mut self.containers[active_host];
        match (container.position(active_id), container.position(over_id)) {
            (Some(from), Some(to)) if from != to => {
                move_element(&mut container.items, from, to);
                Outcome::Reordered {
                    container: container.id.clone(),
                    from,
                    to,
                }
            }
            _ => Outcome::DragCleared,
        }
    }

    fn settle_container_drop(&mut self, from: usize, to: usize) -> Outcome {
        if from == to {
            return Outcome::DragCleared;
        }
        let container = self.containers[from].id.clone();
        move_element(&mut self.containers, from, to);
        Outcome::ContainerMoved {
            container,
            from,
            to,
        }
    }

    fn append_item(&mut self, container_title: &str, mut item: T, insert_at: InsertAt) -> Outcome {
        let Some(index) = self
            .containers
            .iter()
            .position(|c| c.title == container_title)
        else {
            return Outcome::unchanged(NoOpReason::NoMatchingTitle);
        };

        let id = self.fresh_item_id(item.title());
        item.set_id(id.clone());

        let container = &mut self.containers[index];
        item.sync_label(&container.title);
        match insert_at {
            InsertAt::Start => container.items.insert(0, item),
            InsertAt::End => container.items.push(item),
        }

        Outcome::ItemAppended {
            item: id,
            container: container.id.clone(),
        }
    }

    fn append_container(&mut self, title: String, position: Option<usize>) -> Outcome {
        let id = self.fresh_container_id(&title);
        let index = position
            .map(|p| p.saturating_sub(1))
            .unwrap_or(self.containers.len())
            .min(self.containers.len());

        self.containers
            .insert(index, Container::new(id.clone(), title));

        Outcome::ContainerAppended {
            container: id,
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::ContainerId;
    use crate::domain::item::{Deal, WorkItem};

    fn work(id: &str) -> WorkItem {
        WorkItem::new(id.parse().unwrap(), id.to_uppercase())
    }

    fn lane(id: &str, items: &[&str]) -> Container<WorkItem> {
        Container::new(id.parse().unwrap(), id.to_uppercase()).with_items(items.iter().map(|i| work(i)))
    }

    fn board(lanes: &[(&str, &[&str])]) -> Board<WorkItem> {
        Board::with_containers(lanes.iter().map(|(id, items)| lane(id, items)).collect())
    }

    fn ids(board: &Board<WorkItem>, container: &str) -> Vec<String> {
        board
            .container(container)
            .map(|c| c.item_ids().map(|id| id.to_string()).collect())
            .unwrap_or_default()
    }

    fn order(board: &Board<WorkItem>) -> Vec<String> {
        board.containers.iter().map(|c| c.id.to_string()).collect()
    }

    fn over<T>(active: &str, over: Option<&str>, active_top: f64, over_top: f64, over_height: f64) -> Command<T> {
        Command::DragOver {
            active_id: active.to_string(),
            over_id: over.map(str::to_string),
            active_rect: Some(Rect::vertical(active_top, 20.0)),
            over_rect: Some(Rect::vertical(over_top, over_height)),
        }
    }

    fn end<T>(active: &str, over: Option<&str>) -> Command<T> {
        Command::DragEnd {
            active_id: active.to_string(),
            over_id: over.map(str::to_string),
        }
    }

    #[test]
    fn move_element_shifts_between() {
        let mut v = vec!['x', 'y', 'z'];
        move_element(&mut v, 0, 2);
        assert_eq!(v, vec!['y', 'z', 'x']);

        move_element(&mut v, 2, 0);
        assert_eq!(v, vec!['x', 'y', 'z']);

        move_element(&mut v, 1, 5);
        assert_eq!(v, vec!['x', 'y', 'z']);
    }

    #[test]
    fn hover_from_below_inserts_after() {
        let board = board(&[("a", &["x", "y"]), ("b", &["p", "q"])]);

        let next = board.apply(over("x", Some("p"), 100.0, 50.0, 40.0));

        assert_eq!(ids(&next, "b"), vec!["p", "x", "q"]);
        assert_eq!(ids(&next, "a"), vec!["y"]);
    }

    #[test]
    fn hover_from_above_inserts_before() {
        let board = board(&[("a", &["x", "y"]), ("b", &["p", "q"])]);

        // 90 is not strictly below the bottom edge (50 + 40)
        let next = board.apply(over("x", Some("q"), 90.0, 50.0, 40.0));

        assert_eq!(ids(&next, "b"), vec!["p", "x", "q"]);
    }

    #[test]
    fn hover_over_container_inserts_at_start() {
        let board = board(&[("a", &["x"]), ("b", &["p", "q"])]);

        let mut next = board.clone();
        let outcome = next.step(over("x", Some("b"), 500.0, 0.0, 10.0));

        assert_eq!(ids(&next, "b"), vec!["x", "p", "q"]);
        assert!(ids(&next, "a").is_empty());
        assert_eq!(
            outcome,
            Outcome::Relocated {
                item: "x".parse().unwrap(),
                from: "a".parse().unwrap(),
                to: "b".parse().unwrap(),
                index: 0,
            }
        );
    }

    #[test]
    fn hover_into_empty_container() {
        let board = board(&[("a", &["x", "y"]), ("b", &[])]);

        let next = board.apply(over("y", Some("b"), 0.0, 0.0, 0.0));

        assert_eq!(ids(&next, "b"), vec!["y"]);
        assert_eq!(ids(&next, "a"), vec!["x"]);
    }

    #[test]
    fn hover_within_same_container_is_noop() {
        let board = board(&[("a", &["x", "y"]), ("b", &["p"])]);

        let mut next = board.clone();
        let outcome = next.step(over("x", Some("y"), 100.0, 0.0, 10.0));

        assert_eq!(next, board);
        assert_eq!(outcome, Outcome::unchanged(NoOpReason::SameContainer));
    }

    #[test]
    fn hover_without_geometry_is_noop() {
        let board = board(&[("a", &["x"]), ("b", &["p"])]);
        let cmd = Command::DragOver {
            active_id: "x".to_string(),
            over_id: Some("p".to_string()),
            active_rect: None,
            over_rect: Some(Rect::vertical(0.0, 10.0)),
        };

        let mut next = board.clone();
        assert_eq!(next.step(cmd), Outcome::unchanged(NoOpReason::MissingGeometry));
        assert_eq!(next, board);
    }

    #[test]
    fn hover_over_nothing_or_unknown_is_noop() {
        let board = board(&[("a", &["x"]), ("b", &["p"])]);

        assert_eq!(board.clone().apply(over("x", None, 0.0, 0.0, 0.0)), board);
        assert_eq!(board.clone().apply(over("x", Some("nope"), 0.0, 0.0, 0.0)), board);
        assert_eq!(board.clone().apply(over("nope", Some("p"), 0.0, 0.0, 0.0)), board);
    }

    #[test]
    fn hover_with_container_as_active_is_noop() {
        let board = board(&[("a", &["x"]), ("b", &["p"])]);

        let mut next = board.clone();
        let outcome = next.step(over("a", Some("p"), 0.0, 0.0, 10.0));

        assert_eq!(outcome, Outcome::unchanged(NoOpReason::ContainerHover));
        assert_eq!(next, board);
    }

    #[test]
    fn repeated_hover_is_idempotent() {
        let board = board(&[("a", &["x", "y"]), ("b", &["p", "q"])]);
        let cmd = over("x", Some("p"), 100.0, 50.0, 40.0);

        let once = board.apply(cmd.clone());
        let twice = once.clone().apply(cmd);

        assert_eq!(once, twice);
    }

    #[test]
    fn hover_syncs_deal_stage() {
        let deal = |id: &str| Deal::new(id.parse().unwrap(), id, "Acme", 100);
        let board = Board::with_containers(vec![
            Container::new("lead".parse().unwrap(), "Lead").with_items(vec![deal("d1")]),
            Container::new("won".parse().unwrap(), "Won").with_items(vec![deal("d2")]),
        ]);

        let next = board.apply(over("d1", Some("d2"), 0.0, 50.0, 40.0));

        let moved = next.item("d1").unwrap();
        assert_eq!(moved.stage, "Won");
        assert_eq!(next.container("won").unwrap().items[0].id, "d1");
    }

    #[test]
    fn drop_reorders_within_container() {
        let board = board(&[("a", &["x", "y", "z"])]);

        let next = board.apply(end("x", Some("z")));

        assert_eq!(ids(&next, "a"), vec!["y", "z", "x"]);
    }

    #[test]
    fn drop_upwards_within_container() {
        let board = board(&[("a", &["x", "y", "z"])]);

        let next = board.apply(end("z", Some("y")));

        assert_eq!(ids(&next, "a"), vec!["x", "z", "y"]);
    }

    #[test]
    fn drop_on_own_container_keeps_order() {
        let board = board(&[("a", &["x", "y", "z"])]);

        let mut next = board.clone();
        assert_eq!(next.step(end("y", Some("a"))), Outcome::DragCleared);
        assert_eq!(next, board);
    }

    #[test]
    fn drop_on_itself_only_clears_drag() {
        let board = board(&[("a", &["x", "y", "z"])]);
        let item = board.item("y").cloned().unwrap();
        let dragging = board.clone().apply(Command::DragStart {
            target: DragTarget::Item(item),
        });

        let mut next = dragging.clone();
        assert_eq!(next.step(end("y", Some("y"))), Outcome::DragCleared);
        assert_eq!(next, board);
    }

    #[test]
    fn drop_after_cross_container_hover_settles_in_place() {
        let board = board(&[("a", &["x", "y"]), ("b", &["p", "q"])]);
        let item = board.item("x").cloned().unwrap();

        let next = board
            .apply(Command::DragStart {
                target: DragTarget::Item(item),
            })
            .apply(over("x", Some("p"), 100.0, 50.0, 40.0))
            .apply(end("x", Some("p")));

        assert_eq!(ids(&next, "b"), vec!["x", "p", "q"]);
        assert!(!next.is_dragging());
    }

    #[test]
    fn drop_moves_container() {
        let board = board(&[("a", &[]), ("b", &[]), ("c", &[])]);
        let dragged = board.container("c").cloned().unwrap();

        let started = board.apply(Command::DragStart {
            target: DragTarget::Container(dragged),
        });
        assert!(started.active_container.is_some());

        let next = started.apply(end("c", Some("a")));

        assert_eq!(order(&next), vec!["c", "a", "b"]);
        assert!(next.active_container.is_none());
    }

    #[test]
    fn drop_container_over_item_uses_its_container() {
        let board = board(&[("a", &["x"]), ("b", &["p"]), ("c", &[])]);

        let next = board.apply(end("a", Some("p")));

        assert_eq!(order(&next), vec!["b", "a", "c"]);
        assert_eq!(ids(&next, "a"), vec!["x"]);
    }

    #[test]
    fn drop_with_unknown_ids_only_clears_flags() {
        let board = board(&[("a", &["x"]), ("b", &["p"])]);
        let dragging = board.clone().apply(Command::DragStart {
            target: DragTarget::Item(work("x")),
        });
        assert!(dragging.is_dragging());

        let mut next = dragging.clone();
        let outcome = next.step(end("unknown-id", Some("also-unknown")));

        assert_eq!(outcome, Outcome::DragCleared);
        assert!(!next.is_dragging());
        assert_eq!(next.containers, board.containers);
    }

    #[test]
    fn drag_start_replaces_previous_target() {
        let board = board(&[("a", &["x", "y"])]);
        let lane = board.container("a").cloned().unwrap();

        let next = board
            .apply(Command::DragStart {
                target: DragTarget::Item(work("x")),
            })
            .apply(Command::DragStart {
                target: DragTarget::Container(lane),
            });

        assert!(next.active_item.is_none());
        assert_eq!(next.active_container.as_ref().map(|c| c.id.as_str()), Some("a"));
        assert_eq!(ids(&next, "a"), vec!["x", "y"]);
    }

    #[test]
    fn append_container_at_position() {
        let board = board(&[("a", &[]), ("b", &[])]);

        let mut next = board.clone();
        let outcome = next.step(Command::AppendContainer {
            title: "Triage".to_string(),
            position: Some(2),
        });

        assert_eq!(next.containers.len(), 3);
        assert_eq!(next.containers[1].title, "Triage");
        assert!(next.containers[1].is_empty());
        assert!(!next.containers[1].compact);
        assert!(matches!(outcome, Outcome::ContainerAppended { index: 1, .. }));
    }

    #[test]
    fn append_container_clamps_position() {
        let board = board(&[("a", &[])]);

        let end = board.clone().apply(Command::AppendContainer {
            title: "Last".to_string(),
            position: Some(99),
        });
        assert_eq!(end.containers[1].title, "Last");

        let first = board.clone().apply(Command::AppendContainer {
            title: "First".to_string(),
            position: Some(0),
        });
        assert_eq!(first.containers[0].title, "First");

        let default = board.apply(Command::AppendContainer {
            title: "Tail".to_string(),
            position: None,
        });
        assert_eq!(default.containers[1].title, "Tail");
    }

    #[test]
    fn append_item_assigns_fresh_id() {
        let board = board(&[("a", &["x"]), ("b", &[])]);

        let mut next = board.clone();
        let outcome = next.step(Command::AppendItem {
            container_title: "A".to_string(),
            item: work("x"),
            insert_at: InsertAt::Start,
        });

        let Outcome::ItemAppended { item, container } = outcome else {
            panic!("expected append, got {:?}", outcome);
        };
        assert_ne!(item, "x");
        assert_eq!(container, "a");
        assert_eq!(ids(&next, "a")[0], item.to_string());
        assert_eq!(next.item_count(), 2);
        assert_eq!(next.validate(), Ok(()));
    }

    #[test]
    fn append_item_at_end_of_first_title_match() {
        let mut board = board(&[("a", &["x"]), ("b", &[])]);
        board.containers[1].title = "A".to_string();

        let next = board.apply(Command::AppendItem {
            container_title: "A".to_string(),
            item: work("new"),
            insert_at: InsertAt::End,
        });

        assert_eq!(ids(&next, "a").len(), 2);
        assert!(ids(&next, "b").is_empty());
    }

    #[test]
    fn append_item_to_unknown_title_is_noop() {
        let board = board(&[("a", &["x"])]);

        let mut next = board.clone();
        let outcome = next.step(Command::AppendItem {
            container_title: "Nowhere".to_string(),
            item: work("y"),
            insert_at: InsertAt::End,
        });

        assert_eq!(outcome, Outcome::unchanged(NoOpReason::NoMatchingTitle));
        assert_eq!(next, board);
    }

    #[test]
    fn append_item_syncs_deal_stage() {
        let board: Board<Deal> = Board::with_containers(vec![Container::new(
            "q".parse().unwrap(),
            "Qualified",
        )]);

        let next = board.apply(Command::AppendItem {
            container_title: "Qualified".to_string(),
            item: Deal::new("tmp".parse().unwrap(), "Imaging package", "Northside", 9_900),
            insert_at: InsertAt::End,
        });

        assert_eq!(next.containers[0].items[0].stage, "Qualified");
    }

    #[test]
    fn toggle_compact_flips_flag_only() {
        let board = board(&[("a", &["x"])]);
        let cmd = || Command::ToggleCompactMode {
            container_id: "a".parse::<ContainerId>().unwrap(),
        };

        let once = board.clone().apply(cmd());
        assert!(once.containers[0].compact);
        assert_eq!(ids(&once, "a"), vec!["x"]);

        let twice = once.apply(cmd());
        assert_eq!(twice, board);

        let mut unknown = board.clone();
        let outcome = unknown.step(Command::ToggleCompactMode {
            container_id: "zz".parse::<ContainerId>().unwrap(),
        });
        assert_eq!(outcome, Outcome::unchanged(NoOpReason::UnknownContainer));
    }

    #[test]
    fn rename_leaves_labels_alone() {
        let board = Board::with_containers(vec![Container::new("lead".parse().unwrap(), "Lead")
            .with_items(vec![Deal::new("d1".parse().unwrap(), "Renewal", "Acme", 1)])]);

        let next = board.apply(Command::RenameContainer {
            container_id: "lead".parse().unwrap(),
            title: "Prospect".to_string(),
        });

        assert_eq!(next.containers[0].title, "Prospect");
        assert_eq!(next.containers[0].items[0].stage, "Lead");
    }

    #[test]
    fn reduce_keeps_previous_snapshot() {
        let board = board(&[("a", &["x", "y", "z"])]);

        let next = reduce(&board, end("x", Some("z")));

        assert_eq!(ids(&board, "a"), vec!["x", "y", "z"]);
        assert_eq!(ids(&next, "a"), vec!["y", "z", "x"]);
    }
}
