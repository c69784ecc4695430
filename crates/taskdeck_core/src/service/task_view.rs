//! View state owned by the UI: the current filter.

use crate::model::filter::{filter_options, visible_tasks, Filter};
use crate::model::task::Task;

/// Current filter selection plus view derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskView {
    filter: Filter,
}

impl TaskView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Replaces the current filter. Does not touch the task store.
    pub fn set_filter(&mut self, filter: impl Into<Filter>) {
        self.filter = filter.into();
    }

    /// Tasks visible under the current filter, in collection order.
    pub fn visible<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        visible_tasks(tasks, &self.filter)
    }

    /// Filter values a picker should offer for `categories`.
    pub fn options(&self, categories: &[String]) -> Vec<Filter> {
        filter_options(categories)
    }
}
