//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted task record and its JSON wire shape.
//! - Validate records on construction and on deserialization.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another task.
//! - `text` is non-empty after trimming; stored untrimmed.
//! - `category`, when present, is trimmed and non-empty. Absent categories
//!   are omitted from JSON instead of being written as `""`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as plain text so ids written by other front ends hydrate unchanged.
pub type TaskId = String;

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Task id is empty or whitespace.
    EmptyId,
    /// Task text is empty or whitespace.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    completed: bool,
}

/// Raw wire shape accepted before validation.
#[derive(Deserialize)]
struct TaskRecord {
    id: String,
    text: String,
    #[serde(default)]
    category: Option<String>,
    completed: bool,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        let mut task = Self::with_id(value.id, value.text, value.category.as_deref())?;
        task.completed = value.completed;
        Ok(task)
    }
}

impl Task {
    /// Creates a pending task with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is empty after trimming.
    pub fn new(
        text: impl Into<String>,
        category: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(Uuid::new_v4().to_string(), text, category)
    }

    /// Creates a pending task with a caller-provided id.
    ///
    /// `category` is normalized with [`normalize_category`].
    pub fn with_id(
        id: impl Into<TaskId>,
        text: impl Into<String>,
        category: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }

        Ok(Self {
            id,
            text,
            category: normalize_category(category),
            completed: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// User-entered text, untrimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Row label shown by list views: `"<category>: <text>"` or just `text`.
    pub fn display_label(&self) -> String {
        match &self.category {
            Some(category) => format!("{category}: {}", self.text),
            None => self.text.clone(),
        }
    }

    /// Returns whether this task carries `category`, ignoring case.
    pub fn has_category(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .is_some_and(|own| own.to_lowercase() == category.to_lowercase())
    }

    /// Flips the completion flag. No other field changes.
    pub(crate) fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

/// Trims a category label; empty-after-trim means "no category".
pub fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
