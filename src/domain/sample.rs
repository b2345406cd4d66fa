//! Static sample boards used to seed new projects

use super::board::{Board, Container};
use super::id::{ContainerId, ItemId};
use super::item::{Deal, Priority, WorkItem};

fn container_id(s: &'static str) -> ContainerId {
    s.parse().unwrap_or_else(|_| unreachable!("sample container id is valid"))
}

fn item_id(s: &'static str) -> ItemId {
    s.parse().unwrap_or_else(|_| unreachable!("sample item id is valid"))
}

/// Work board: Backlog, To Do, In Progress, Done
pub fn work_board() -> Board<WorkItem> {
    let task = |id, title| WorkItem::new(item_id(id), title);

    Board::with_containers(vec![
        Container::new(container_id("backlog"), "Backlog").with_items(vec![
            task("w-101", "Audit vaccine fridge logs").with_tag("compliance"),
            task("w-102", "Update intake form wording").with_priority(Priority::Low),
        ]),
        Container::new(container_id("todo"), "To Do").with_items(vec![
            task("w-103", "Call back lab about panel results")
                .with_priority(Priority::High)
                .with_assignee("nurse-ortiz"),
            task("w-104", "Schedule follow-up for post-op patients"),
        ]),
        Container::new(container_id("in-progress"), "In Progress").with_items(vec![task(
            "w-105",
            "Reconcile insurance denials",
        )
        .with_priority(Priority::Urgent)
        .with_assignee("billing")
        .with_description("March batch, 14 claims")]),
        Container::new(container_id("done"), "Done")
            .with_items(vec![task("w-106", "Restock exam room 2")]),
    ])
}

/// Sales pipeline: Lead, Qualified, Proposal, Won
pub fn sales_board() -> Board<Deal> {
    let deal = |id, title, company, value| Deal::new(item_id(id), title, company, value);

    Board::with_containers(vec![
        Container::new(container_id("lead"), "Lead").with_items(vec![
            deal("d-201", "Employee wellness checks", "Harbor Logistics", 1_250_000),
            deal("d-202", "School sports physicals", "Westside Academy", 480_000),
        ]),
        Container::new(container_id("qualified"), "Qualified").with_items(vec![deal(
            "d-203",
            "Occupational health contract",
            "Granite Works",
            3_600_000,
        )]),
        Container::new(container_id("proposal"), "Proposal").with_items(vec![deal(
            "d-204",
            "Flu clinic on site",
            "Metro Transit",
            900_000,
        )]),
        Container::new(container_id("won"), "Won").with_items(vec![deal(
            "d-205",
            "Travel vaccination package",
            "Bluebird Tours",
            275_000,
        )]),
    ])
}
