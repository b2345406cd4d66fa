//! Item CLI commands

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Subcommand};

use super::output::Output;
use super::render::parse_amount;
use super::session::{step, Session};
use crate::domain::{Command, Deal, InsertAt, ItemId, Priority, WorkItem};
use crate::storage::AnyBoard;

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to the first lane with the given title
    ///
    /// Examples:
    ///   lanes item add "To Do" "Call patient" --priority high --tag phone
    ///   lanes --board sales item add Lead "Annual plan" --company Acme --value 12500
    Add(AddArgs),

    /// Show one item as JSON
    Show {
        /// Item ID
        id: String,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Title of the lane to add to
    container: String,

    /// Item title
    title: String,

    /// Insert at the top of the lane instead of the configured position
    #[arg(long)]
    start: bool,

    /// Work item priority (low, medium, high, urgent)
    #[arg(long, help_heading = "Work items")]
    priority: Option<Priority>,

    #[arg(long, help_heading = "Work items")]
    assignee: Option<String>,

    #[arg(long, help_heading = "Work items")]
    description: Option<String>,

    /// Tag (repeatable)
    #[arg(long = "tag", help_heading = "Work items")]
    tags: Vec<String>,

    /// Company the deal is with
    #[arg(long, help_heading = "Deals")]
    company: Option<String>,

    /// Deal value, e.g. 12500 or 1,250.50
    #[arg(long, value_parser = parse_amount, help_heading = "Deals")]
    value: Option<u64>,
}

impl AddArgs {
    fn has_work_fields(&self) -> bool {
        self.priority.is_some()
            || self.assignee.is_some()
            || self.description.is_some()
            || !self.tags.is_empty()
    }

    fn has_deal_fields(&self) -> bool {
        self.company.is_some() || self.value.is_some()
    }

    fn work_item(&self, id: ItemId) -> WorkItem {
        let mut item = WorkItem::new(id, &self.title).with_priority(self.priority.unwrap_or_default());
        if let Some(assignee) = &self.assignee {
            item = item.with_assignee(assignee);
        }
        if let Some(description) = &self.description {
            item = item.with_description(description);
        }
        for tag in &self.tags {
            item = item.with_tag(tag);
        }
        item
    }

    fn deal(&self, id: ItemId) -> Deal {
        Deal::new(
            id,
            &self.title,
            self.company.clone().unwrap_or_default(),
            self.value.unwrap_or(0),
        )
    }
}

pub fn run(cmd: ItemCommands, board: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        ItemCommands::Add(args) => add_item(output, board, args),
        ItemCommands::Show { id } => show_item(output, board, &id),
    }
}

fn add_item(output: &Output, board: Option<&str>, args: AddArgs) -> Result<()> {
    let mut session = Session::open(board, output)?;
    let insert_at = if args.start {
        InsertAt::Start
    } else {
        session.project().config().project.insert_at
    };
    // Replaced by the engine with an id unique on the board
    let placeholder = ItemId::generate(&args.title, Utc::now(), 0);

    let outcome = match session.board_mut() {
        AnyBoard::Work(board) => {
            if args.has_deal_fields() {
                bail!("--company and --value only apply to sales boards");
            }
            let command = Command::AppendItem {
                container_title: args.container.clone(),
                item: args.work_item(placeholder),
                insert_at,
            };
            step(board, command, output)
        }
        AnyBoard::Sales(board) => {
            if args.has_work_fields() {
                bail!("--priority, --assignee, --description and --tag only apply to work boards");
            }
            let command = Command::AppendItem {
                container_title: args.container.clone(),
                item: args.deal(placeholder),
                insert_at,
            };
            step(board, command, output)
        }
    };

    if outcome.changed_structure() {
        session.save(output)?;
    }
    output.outcome("append_item", &outcome);
    Ok(())
}

fn show_item(output: &Output, board: Option<&str>, id: &str) -> Result<()> {
    let session = Session::open(board, output)?;

    let found = match session.board() {
        AnyBoard::Work(board) => board.item(id).map(serde_json::to_value),
        AnyBoard::Sales(board) => board.item(id).map(serde_json::to_value),
    };

    match found {
        Some(value) => {
            let value = value?;
            if output.is_json() {
                output.data(&value);
            } else {
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            Ok(())
        }
        None => bail!("Item not found: {}", id),
    }
}
