//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task operation surface (add/toggle/delete/filter/snapshot)
//!   to Dart via FRB.
//! - Own the process-wide task store session behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The session opens lazily on first use and hydrates before serving.
//! - Store configuration is fixed once the session has been resolved.

use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use taskdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_task_store,
    ping as ping_inner, Platform, SqliteTaskStore, StoreConfig, Task, TaskView,
};

static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();
static SESSION: Mutex<Option<Session>> = Mutex::new(None);

struct Session {
    store: SqliteTaskStore,
    view: TaskView,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database path and storage key flavor (`mobile|web`).
///
/// Must run before the first task call; otherwise the configuration comes
/// from `TASKDECK_DB_PATH` / `TASKDECK_PLATFORM`. Returns an empty string on
/// success and an error message when the value is invalid or conflicts with
/// the already active configuration.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_path: String, platform: String) -> String {
    let db_path = db_path.trim();
    if db_path.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let platform = match platform.parse::<Platform>() {
        Ok(platform) => platform,
        Err(err) => return err.to_string(),
    };
    let requested = StoreConfig {
        db_path: PathBuf::from(db_path),
        platform,
    };

    let active = STORE_CONFIG.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "store already configured at `{}`; refusing to switch to `{}`",
            active.db_path.display(),
            requested.db_path.display()
        )
    }
}

/// Task row as rendered by list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub category: Option<String>,
    pub completed: bool,
    /// `"<category>: <text>"` or just the text.
    pub label: String,
}

/// Full read model for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    pub ok: bool,
    pub message: String,
    /// All tasks in insertion order.
    pub tasks: Vec<TaskItem>,
    /// Category registry, most recently added first.
    pub categories: Vec<String>,
    /// Current filter value (`all|completed|pending|<category>`).
    pub filter: String,
    /// Tasks visible under `filter`.
    pub visible: Vec<TaskItem>,
    /// Picker values: `all`, then each category.
    pub filter_options: Vec<String>,
}

/// Result envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// `false` only when the store is unavailable.
    pub ok: bool,
    /// Whether the call changed any state. Blank text and unknown ids do not.
    pub changed: bool,
    pub task_id: Option<String>,
    pub message: String,
}

impl TaskActionResponse {
    fn applied(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            changed: true,
            task_id,
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed: false,
            task_id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Adds a task; blank `text` is ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(text: String, category: Option<String>) -> TaskActionResponse {
    let result = with_session(|session| session.store.add_task(text, category.as_deref()));
    match result {
        Ok(Some(task_id)) => TaskActionResponse::applied("Task added.", Some(task_id)),
        Ok(None) => TaskActionResponse::unchanged("Task text is empty."),
        Err(err) => TaskActionResponse::failure(format!("add_task failed: {err}")),
    }
}

/// Flips completion of the task with `id`; unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_complete(id: String) -> TaskActionResponse {
    match with_session(|session| session.store.toggle_complete(&id)) {
        Ok(true) => TaskActionResponse::applied("Task toggled.", Some(id)),
        Ok(false) => TaskActionResponse::unchanged("No task with that id."),
        Err(err) => TaskActionResponse::failure(format!("toggle_complete failed: {err}")),
    }
}

/// Deletes the task with `id`; unknown ids are ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> TaskActionResponse {
    match with_session(|session| session.store.delete_task(&id)) {
        Ok(true) => TaskActionResponse::applied("Task deleted.", Some(id)),
        Ok(false) => TaskActionResponse::unchanged("No task with that id."),
        Err(err) => TaskActionResponse::failure(format!("delete_task failed: {err}")),
    }
}

/// Selects the view filter and returns the re-derived snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn set_filter(value: String) -> TaskSnapshot {
    snapshot_or_failure(with_session(|session| {
        session.view.set_filter(value);
        snapshot(session)
    }))
}

/// Returns the current tasks, categories, filter and visible tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn task_snapshot() -> TaskSnapshot {
    snapshot_or_failure(with_session(|session| snapshot(session)))
}

fn resolve_store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, String> {
    let mut guard = SESSION
        .lock()
        .map_err(|_| "task session lock poisoned".to_string())?;

    if guard.is_none() {
        let config = resolve_store_config();
        let store = open_task_store(config).map_err(|err| {
            error!("event=session_open module=ffi status=error error={err}");
            format!("task store open failed: {err}")
        })?;
        *guard = Some(Session {
            store,
            view: TaskView::new(),
        });
    }

    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("task session unavailable".to_string()),
    }
}

fn snapshot(session: &Session) -> TaskSnapshot {
    let tasks = session.store.tasks();
    let categories = session.store.categories();
    TaskSnapshot {
        ok: true,
        message: String::new(),
        tasks: tasks.iter().map(to_task_item).collect(),
        categories: categories.to_vec(),
        filter: session.view.filter().to_string(),
        visible: session
            .view
            .visible(tasks)
            .into_iter()
            .map(to_task_item)
            .collect(),
        filter_options: session
            .view
            .options(categories)
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

fn snapshot_or_failure(result: Result<TaskSnapshot, String>) -> TaskSnapshot {
    result.unwrap_or_else(|message| TaskSnapshot {
        ok: false,
        message,
        tasks: Vec::new(),
        categories: Vec::new(),
        filter: String::new(),
        visible: Vec::new(),
        filter_options: Vec::new(),
    })
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id().to_string(),
        text: task.text().to_string(),
        category: task.category().map(str::to_string),
        completed: task.is_completed(),
        label: task.display_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        add_task, configure_store, core_version, delete_task, init_logging, ping, set_filter,
        task_snapshot, toggle_complete,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    fn configure_test_store() {
        // SQLite in-memory database: nothing is left on disk after the run.
        let error = configure_store(":memory:".to_string(), "mobile".to_string());
        assert!(error.is_empty(), "{error}");
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/taskdeck-logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn configure_store_rejects_unknown_platform() {
        let error = configure_store("/tmp/x.sqlite3".to_string(), "desktop".to_string());
        assert!(error.contains("unknown platform"));
    }

    #[test]
    fn add_task_returns_id_and_appears_in_snapshot() {
        configure_test_store();
        let text = unique_token("ffi-add");

        let response = add_task(text.clone(), Some(" Errands ".to_string()));
        assert!(response.ok && response.changed, "{}", response.message);
        let task_id = response.task_id.expect("add should return task_id");

        let snapshot = task_snapshot();
        assert!(snapshot.ok, "{}", snapshot.message);
        let item = snapshot
            .tasks
            .iter()
            .find(|item| item.id == task_id)
            .expect("added task should be listed");
        assert_eq!(item.category.as_deref(), Some("Errands"));
        assert_eq!(item.label, format!("Errands: {text}"));
        assert!(snapshot
            .categories
            .iter()
            .any(|category| category.eq_ignore_ascii_case("errands")));
    }

    #[test]
    fn blank_text_is_reported_as_unchanged() {
        configure_test_store();
        let response = add_task("   ".to_string(), None);
        assert!(response.ok);
        assert!(!response.changed);
        assert_eq!(response.task_id, None);
    }

    #[test]
    fn toggle_and_delete_round_trip() {
        configure_test_store();
        let task_id = add_task(unique_token("ffi-toggle"), None)
            .task_id
            .expect("add should return task_id");

        assert!(toggle_complete(task_id.clone()).changed);
        let completed = task_snapshot()
            .tasks
            .into_iter()
            .find(|item| item.id == task_id)
            .map(|item| item.completed);
        assert_eq!(completed, Some(true));

        assert!(delete_task(task_id.clone()).changed);
        assert!(!delete_task(task_id.clone()).changed);
        assert!(!toggle_complete(task_id).changed);
    }

    #[test]
    fn set_filter_returns_filtered_snapshot() {
        configure_test_store();
        let category = unique_token("ffi-filter");
        let task_id = add_task("filtered".to_string(), Some(category.clone()))
            .task_id
            .expect("add should return task_id");

        let snapshot = set_filter(category.to_uppercase());
        assert!(snapshot.ok, "{}", snapshot.message);
        assert_eq!(snapshot.visible.len(), 1);
        assert_eq!(snapshot.visible[0].id, task_id);
        assert_eq!(snapshot.filter_options[0], "all");

        let reset = set_filter("all".to_string());
        assert_eq!(reset.filter, "all");
        assert_eq!(reset.visible.len(), reset.tasks.len());
    }
}
