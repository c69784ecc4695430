use std::collections::HashSet;
use taskdeck_core::{visible_tasks, Filter, Task, TaskView};

fn sample_tasks() -> Vec<Task> {
    serde_json::from_value(serde_json::json!([
        { "id": "1", "text": "Buy milk", "category": "Errands", "completed": true },
        { "id": "2", "text": "Call mom", "completed": false },
        { "id": "3", "text": "Ship release", "category": "Work", "completed": false },
        { "id": "4", "text": "Post letter", "category": "errands", "completed": false },
        { "id": "5", "text": "Review PR", "category": "Work", "completed": true }
    ]))
    .unwrap()
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id().to_string()).collect()
}

#[test]
fn all_returns_every_task_in_order() {
    let tasks = sample_tasks();
    assert_eq!(
        ids(&visible_tasks(&tasks, &Filter::All)),
        vec!["1", "2", "3", "4", "5"]
    );
}

#[test]
fn completed_and_pending_keep_relative_order() {
    let tasks = sample_tasks();
    assert_eq!(ids(&visible_tasks(&tasks, &Filter::Completed)), vec!["1", "5"]);
    assert_eq!(
        ids(&visible_tasks(&tasks, &Filter::Pending)),
        vec!["2", "3", "4"]
    );
}

#[test]
fn completed_and_pending_partition_tasks() {
    let tasks = sample_tasks();
    let completed: HashSet<String> = ids(&visible_tasks(&tasks, &Filter::Completed))
        .into_iter()
        .collect();
    let pending: HashSet<String> = ids(&visible_tasks(&tasks, &Filter::Pending))
        .into_iter()
        .collect();
    let all: HashSet<String> = tasks.iter().map(|task| task.id().to_string()).collect();

    assert!(completed.is_disjoint(&pending));
    assert_eq!(&completed | &pending, all);
}

#[test]
fn category_filter_ignores_case_and_skips_uncategorized() {
    let tasks = sample_tasks();
    assert_eq!(
        ids(&visible_tasks(&tasks, &Filter::from("ERRANDS"))),
        vec!["1", "4"]
    );
    assert_eq!(ids(&visible_tasks(&tasks, &Filter::from("work"))), vec!["3", "5"]);
    assert!(visible_tasks(&tasks, &Filter::from("Garden")).is_empty());
}

#[test]
fn empty_collection_yields_nothing() {
    assert!(visible_tasks(&[], &Filter::All).is_empty());
}

#[test]
fn task_view_defaults_to_all_and_tracks_selection() {
    let tasks = sample_tasks();
    let mut view = TaskView::new();
    assert_eq!(view.filter(), &Filter::All);
    assert_eq!(view.visible(&tasks).len(), 5);

    view.set_filter("pending");
    assert_eq!(view.filter(), &Filter::Pending);
    assert_eq!(ids(&view.visible(&tasks)), vec!["2", "3", "4"]);

    view.set_filter(Filter::Category("Work".to_string()));
    assert_eq!(view.filter().as_str(), "Work");
}

#[test]
fn task_view_options_list_all_then_categories() {
    let view = TaskView::new();
    let options = view.options(&["Work".to_string(), "Errands".to_string()]);
    let values: Vec<&str> = options.iter().map(Filter::as_str).collect();
    assert_eq!(values, vec!["all", "Work", "Errands"]);
}
