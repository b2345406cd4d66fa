//! Item payloads
//!
//! The engine is generic over [`BoardItem`]. Two flavors ship with the crate:
//! [`WorkItem`] for the work board and [`Deal`] for the sales pipeline. A deal's
//! `stage` is a synchronized label: it tracks the title of the lane holding it.

use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// Payload carried by a board item
pub trait BoardItem: Clone {
    /// Board-unique identifier
    fn id(&self) -> &ItemId;

    /// Replaces the identifier (used when the engine assigns a fresh one)
    fn set_id(&mut self, id: ItemId);

    /// Human-readable title, also used to seed generated IDs
    fn title(&self) -> &str;

    /// Current value of the synchronized label, if this flavor has one
    fn synced_label(&self) -> Option<&str> {
        None
    }

    /// Updates the synchronized label to a container title
    fn sync_label(&mut self, _container_title: &str) {}
}

/// Priority of a work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Returns a display label for the priority
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!(
                "unknown priority '{}' (expected low, medium, high or urgent)",
                other
            )),
        }
    }
}

/// A unit of clinic work (follow-up call, chart review, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: ItemId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl WorkItem {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            assignee: None,
            tags: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

impl BoardItem for WorkItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// An opportunity in the sales pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: ItemId,

    pub title: String,

    #[serde(default)]
    pub company: String,

    /// Value in minor currency units (cents)
    #[serde(default)]
    pub value: u64,

    /// Pipeline stage; mirrors the title of the lane holding the deal
    #[serde(default)]
    pub stage: String,
}

impl Deal {
    pub fn new(id: ItemId, title: impl Into<String>, company: impl Into<String>, value: u64) -> Self {
        Self {
            id,
            title: title.into(),
            company: company.into(),
            value,
            stage: String::new(),
        }
    }
}

impl BoardItem for Deal {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn synced_label(&self) -> Option<&str> {
        Some(&self.stage)
    }

    fn sync_label(&mut self, container_title: &str) {
        if self.stage != container_title {
            self.stage = container_title.to_string();
        }
    }
}
