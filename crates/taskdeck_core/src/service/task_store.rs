//! Task store: the single owner of tasks and categories.
//!
//! # Responsibility
//! - Apply add/toggle/delete mutations and keep the category registry in
//!   step with them.
//! - Hydrate both collections once from persistence and write them through
//!   after every mutation.
//!
//! # Invariants
//! - Every mutation persists the full collections, never a delta.
//! - Hydration runs before the first mutation, so an early mutation can
//!   never be overwritten by saved state loaded later.
//! - Validation no-ops (blank text, unknown id) change nothing and write
//!   nothing.
//! - Startup read/parse failures degrade to empty collections.

use crate::config::StorageKeys;
use crate::model::category::{categories_in_use, contains_category, register_category};
use crate::model::task::{normalize_category, Task, TaskId};
use crate::repo::write_through::PersistentStore;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Task/category owner with injected persistence.
pub struct TaskStore<P: PersistentStore> {
    persistence: P,
    keys: StorageKeys,
    tasks: Vec<Task>,
    categories: Vec<String>,
    initialized: bool,
}

impl<P: PersistentStore> TaskStore<P> {
    /// Creates an empty, not yet hydrated store.
    pub fn new(persistence: P, keys: StorageKeys) -> Self {
        Self {
            persistence,
            keys,
            tasks: Vec::new(),
            categories: Vec::new(),
            initialized: false,
        }
    }

    /// Hydrates tasks and categories from persistence.
    ///
    /// Each collection is replaced only when its stored value is present and
    /// parses; otherwise it stays empty. Runs once; later calls are no-ops.
    pub fn initialize(&mut self) {
        if self.initialized {
            debug!("event=store_hydrate module=store status=skipped reason=already_initialized");
            return;
        }
        self.initialized = true;

        if let Some(tasks) = self.load::<Vec<Task>>(&self.keys.tasks) {
            self.tasks = tasks;
        }
        if let Some(stored) = self.load::<Vec<String>>(&self.keys.categories) {
            let mut categories = Vec::with_capacity(stored.len());
            for category in stored {
                if let Some(category) = normalize_category(Some(&category)) {
                    if !contains_category(&categories, &category) {
                        categories.push(category);
                    }
                }
            }
            self.categories = categories;
        }

        info!(
            "event=store_hydrate module=store status=ok task_count={} category_count={}",
            self.tasks.len(),
            self.categories.len()
        );
    }

    /// Returns whether hydration has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Adds a pending task and registers its category.
    ///
    /// Returns the new task id, or `None` when `text` is blank (no-op).
    pub fn add_task(&mut self, text: impl Into<String>, category: Option<&str>) -> Option<TaskId> {
        self.ensure_initialized();

        let task = match Task::new(text, category) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=store status=ignored reason={err}");
                return None;
            }
        };
        if let Some(category) = task.category() {
            register_category(&mut self.categories, category);
        }

        let id = task.id().to_string();
        self.tasks.push(task);
        info!(
            "event=task_add module=store status=ok task_count={} category_count={}",
            self.tasks.len(),
            self.categories.len()
        );
        self.write_through();
        Some(id)
    }

    /// Flips completion of the task with `id`.
    ///
    /// Returns `false` (and does nothing) when no task matches.
    pub fn toggle_complete(&mut self, id: &str) -> bool {
        self.ensure_initialized();

        let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) else {
            debug!("event=task_toggle module=store status=ignored reason=unknown_id");
            return false;
        };
        task.toggle_completed();
        info!(
            "event=task_toggle module=store status=ok completed={}",
            task.is_completed()
        );
        self.write_through();
        true
    }

    /// Removes the task with `id` and rebuilds the category registry from
    /// the remaining tasks.
    ///
    /// Returns `false` (and does nothing) when no task matches.
    pub fn delete_task(&mut self, id: &str) -> bool {
        self.ensure_initialized();

        let Some(index) = self.tasks.iter().position(|task| task.id() == id) else {
            debug!("event=task_delete module=store status=ignored reason=unknown_id");
            return false;
        };
        self.tasks.remove(index);
        self.categories = categories_in_use(&self.tasks);
        info!(
            "event=task_delete module=store status=ok task_count={} category_count={}",
            self.tasks.len(),
            self.categories.len()
        );
        self.write_through();
        true
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Category registry, most recently added first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn ensure_initialized(&mut self) {
        if !self.initialized {
            self.initialize();
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.persistence.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=store_load module=store status=absent key={key}");
                return None;
            }
            Err(err) => {
                error!("event=store_load module=store status=error key={key} error={err}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("event=store_load module=store status=corrupt key={key} error={err}");
                None
            }
        }
    }

    fn write_through(&self) {
        self.save(&self.keys.tasks, &self.tasks);
        self.save(&self.keys.categories, &self.categories);
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.persistence.write(key, json),
            Err(err) => {
                error!("event=store_save module=store status=error key={key} error={err}")
            }
        }
    }
}
