//! Category registry helpers.
//!
//! # Invariants
//! - Registry entries are unique case-insensitively.
//! - The first-registered casing of a category is kept.
//! - New categories go to the front (most-recent-first).

use crate::model::task::Task;

/// Returns whether `registry` already holds `category`, ignoring case.
pub fn contains_category(registry: &[String], category: &str) -> bool {
    let needle = category.to_lowercase();
    registry.iter().any(|entry| entry.to_lowercase() == needle)
}

/// Prepends `category` unless a case-insensitive match already exists.
///
/// Returns `true` when the registry changed.
pub fn register_category(registry: &mut Vec<String>, category: &str) -> bool {
    if contains_category(registry, category) {
        return false;
    }
    registry.insert(0, category.to_string());
    true
}

/// Rebuilds the registry from the categories still carried by `tasks`.
///
/// Categories are compared exactly as stored; order follows first
/// occurrence in task order.
pub fn categories_in_use(tasks: &[Task]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in tasks.iter().filter_map(Task::category) {
        if !categories.iter().any(|known| known == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::{categories_in_use, register_category};
    use crate::model::task::Task;

    #[test]
    fn register_prepends_new_and_keeps_first_casing() {
        let mut registry = Vec::new();
        assert!(register_category(&mut registry, "Work"));
        assert!(register_category(&mut registry, "Errands"));
        assert!(!register_category(&mut registry, "WORK"));

        assert_eq!(registry, vec!["Errands".to_string(), "Work".to_string()]);
    }

    #[test]
    fn categories_in_use_follows_task_order_and_keeps_stored_casing() {
        let tasks = vec![
            Task::with_id("1", "a", Some("Home")).unwrap(),
            Task::with_id("2", "b", None).unwrap(),
            Task::with_id("3", "c", Some("Work")).unwrap(),
            Task::with_id("4", "d", Some("home")).unwrap(),
            Task::with_id("5", "e", Some("Work")).unwrap(),
        ];

        assert_eq!(
            categories_in_use(&tasks),
            vec!["Home".to_string(), "Work".to_string(), "home".to_string()]
        );
    }

    #[test]
    fn categories_in_use_is_empty_without_categories() {
        let tasks = vec![Task::with_id("1", "a", None).unwrap()];
        assert!(categories_in_use(&tasks).is_empty());
    }
}
