//! Text rendering of boards and lane summaries

use serde::Serialize;

use crate::domain::{Board, BoardItem, Container, Deal, WorkItem};
use crate::storage::DisplayConfig;

/// One-line text form of an item
pub trait ItemLine: BoardItem {
    fn line(&self, display: &DisplayConfig) -> String;

    /// Monetary value in minor units, for flavors that carry one
    fn value(&self) -> Option<u64> {
        None
    }

    fn carries_value() -> bool
    where
        Self: Sized,
    {
        false
    }
}

impl ItemLine for WorkItem {
    fn line(&self, _display: &DisplayConfig) -> String {
        let mut line = format!("{:<10} [{}] {}", self.id, self.priority.label(), self.title);
        if let Some(assignee) = &self.assignee {
            line.push_str(&format!(" @{}", assignee));
        }
        for tag in &self.tags {
            line.push_str(&format!(" #{}", tag));
        }
        line
    }
}

impl ItemLine for Deal {
    fn line(&self, display: &DisplayConfig) -> String {
        format!(
            "{:<10} {} ({}) {}",
            self.id,
            self.title,
            self.company,
            format_amount(self.value, &display.currency)
        )
    }

    fn value(&self) -> Option<u64> {
        Some(self.value)
    }

    fn carries_value() -> bool {
        true
    }
}

/// Per-lane counts (and totals, when items carry a value)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneSummary {
    pub id: String,
    pub title: String,
    pub items: usize,
    pub compact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
}

pub fn summarize<T: ItemLine>(board: &Board<T>) -> Vec<LaneSummary> {
    board
        .containers
        .iter()
        .map(|container| LaneSummary {
            id: container.id.to_string(),
            title: container.title.clone(),
            items: container.len(),
            compact: container.compact,
            value: lane_value(container),
        })
        .collect()
}

fn lane_value<T: ItemLine>(container: &Container<T>) -> Option<u64> {
    if !T::carries_value() {
        return None;
    }
    Some(
        container
            .items
            .iter()
            .filter_map(ItemLine::value)
            .fold(0u64, u64::saturating_add),
    )
}

/// Prints a board as indented lanes
pub fn print_board<T: ItemLine>(name: &str, board: &Board<T>, display: &DisplayConfig) {
    println!(
        "Board '{}': {} lanes, {} items",
        name,
        board.containers.len(),
        board.item_count()
    );

    for (position, container) in board.containers.iter().enumerate() {
        println!();
        println!(
            "{}. {} ({}) [{}]{}",
            position + 1,
            container.title,
            container.id,
            container.len(),
            if container.compact { " compact" } else { "" }
        );

        if container.compact && !display.expand_compact {
            continue;
        }

        for item in &container.items {
            println!("   {}", item.line(display));
        }
    }

    if let Some(item) = &board.active_item {
        println!();
        println!("Dragging item: {}", item.id());
    }
    if let Some(container) = &board.active_container {
        println!();
        println!("Dragging lane: {}", container.id);
    }
}

/// Formats minor units as `CUR 1,234.56`
pub fn format_amount(cents: u64, currency: &str) -> String {
    let major = (cents / 100).to_string();
    let mut grouped = String::with_capacity(major.len() + major.len() / 3);
    for (i, ch) in major.chars().enumerate() {
        if i > 0 && (major.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{} {}.{:02}", currency, grouped, cents % 100)
}

/// Parses `1234`, `1234.5` or `1,234.56` into minor units
pub fn parse_amount(s: &str) -> Result<u64, String> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    let (major, minor) = match cleaned.split_once('.') {
        Some((major, minor)) => (major, minor),
        None => (cleaned.as_str(), ""),
    };

    if major.is_empty() || minor.len() > 2 {
        return Err(format!("invalid amount '{}'", s));
    }
    let major: u64 = major
        .parse()
        .map_err(|_| format!("invalid amount '{}'", s))?;
    let minor: u64 = match minor.len() {
        0 => 0,
        1 => minor.parse::<u64>().map_err(|_| format!("invalid amount '{}'", s))? * 10,
        _ => minor.parse().map_err(|_| format!("invalid amount '{}'", s))?,
    };

    major
        .checked_mul(100)
        .and_then(|v| v.checked_add(minor))
        .ok_or_else(|| format!("amount too large '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample;

    #[test]
    fn amounts_format_with_grouping() {
        assert_eq!(format_amount(0, "USD"), "USD 0.00");
        assert_eq!(format_amount(99, "USD"), "USD 0.99");
        assert_eq!(format_amount(1_250_000, "USD"), "USD 12,500.00");
        assert_eq!(format_amount(123_456_789, "EUR"), "EUR 1,234,567.89");
    }

    #[test]
    fn amounts_parse() {
        assert_eq!(parse_amount("12"), Ok(1200));
        assert_eq!(parse_amount("12.5"), Ok(1250));
        assert_eq!(parse_amount("1,234.56"), Ok(123_456));
        assert!(parse_amount("").is_err());
        assert!(parse_amount("1.234").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-3").is_err());
    }

    #[test]
    fn sales_summary_totals_each_stage() {
        let summary = summarize(&sample::sales_board());

        assert_eq!(summary.len(), 4);
        assert_eq!(summary[0].title, "Lead");
        assert_eq!(summary[0].items, 2);
        assert_eq!(summary[0].value, Some(1_730_000));
    }

    #[test]
    fn work_summary_has_no_values() {
        let summary = summarize(&sample::work_board());

        assert!(summary.iter().all(|lane| lane.value.is_none()));
        assert_eq!(summary.iter().map(|l| l.items).sum::<usize>(), 6);
    }

    #[test]
    fn deal_line_shows_company_and_value() {
        let board = sample::sales_board();
        let deal = board.item("d-205").unwrap();

        let line = deal.line(&DisplayConfig::default());
        assert!(line.contains("Bluebird Tours"));
        assert!(line.contains("USD 2,750.00"));
    }
}
