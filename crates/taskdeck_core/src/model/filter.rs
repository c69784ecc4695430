//! View filters over the task collection.
//!
//! # Responsibility
//! - Parse and render the filter values selected by the UI.
//! - Derive the visible task subsequence for a filter.
//!
//! # Invariants
//! - Derivation never reorders tasks.
//! - Category filters compare case-insensitively; uncategorized tasks never
//!   match a category filter.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const FILTER_ALL: &str = "all";
const FILTER_COMPLETED: &str = "completed";
const FILTER_PENDING: &str = "pending";

/// UI-selected view predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Tasks with `completed = true`.
    Completed,
    /// Tasks with `completed = false`.
    Pending,
    /// Tasks whose category matches, ignoring case.
    Category(String),
}

impl Filter {
    /// Returns the wire/UI value for this filter.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Completed => FILTER_COMPLETED,
            Self::Pending => FILTER_PENDING,
            Self::Category(name) => name.as_str(),
        }
    }

    /// Returns whether `task` is visible under this filter.
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed(),
            Self::Pending => !task.is_completed(),
            Self::Category(name) => task.has_category(name),
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        match value {
            FILTER_ALL => Self::All,
            FILTER_COMPLETED => Self::Completed,
            FILTER_PENDING => Self::Pending,
            other => Self::Category(other.to_string()),
        }
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Filter> for String {
    fn from(value: Filter) -> Self {
        match value {
            Filter::Category(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the tasks visible under `filter`, in collection order.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: &Filter) -> Vec<&'a Task> {
    tasks.iter().filter(|task| filter.matches(task)).collect()
}

/// Lists the selectable filter values in picker order: `all`, then each
/// registered category.
pub fn filter_options(categories: &[String]) -> Vec<Filter> {
    std::iter::once(Filter::All)
        .chain(categories.iter().cloned().map(Filter::Category))
        .collect()
}
