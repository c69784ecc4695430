//! Command-line front end for TaskDeck.
//!
//! # Responsibility
//! - Map subcommands onto the task store operation surface.
//! - Render the derived view as plain text lines.
//!
//! Every invocation hydrates the store, applies at most one mutation and
//! drains the write queue before exiting.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use taskdeck_core::{
    default_log_level, init_logging, open_task_store, Filter, Platform, SqliteTaskStore,
    StoreConfig, Task, TaskView,
};

#[derive(Parser, Debug)]
#[command(name = "taskdeck", version, about = "Personal task manager", long_about = None)]
struct Cli {
    /// Directory holding the task database and logs.
    #[arg(long, global = true, env = "TASKDECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Storage key flavor to read and write.
    #[arg(long, global = true, value_enum)]
    platform: Option<PlatformArg>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task.
    Add {
        text: String,
        #[arg(long, short)]
        category: Option<String>,
    },
    /// Flip a task between pending and completed.
    Toggle { id: String },
    /// Delete a task.
    Delete { id: String },
    /// List tasks visible under a filter (all|completed|pending|<category>).
    List {
        #[arg(long, short, default_value = "all")]
        filter: String,
    },
    /// List registered categories, most recent first.
    Categories,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlatformArg {
    Mobile,
    Web,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Mobile => Platform::Mobile,
            PlatformArg::Web => Platform::Web,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("taskdeck: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;
    let log_dir = log_dir_for(&config.db_path);
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy())?;

    let mut store = open_task_store(&config).map_err(|err| err.to_string())?;
    execute(&mut store, cli.command);
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig, String> {
    let mut config = StoreConfig::from_env();
    if let Some(data_dir) = &cli.data_dir {
        let data_dir = absolute(data_dir)?;
        std::fs::create_dir_all(&data_dir).map_err(|err| {
            format!("failed to create data dir `{}`: {err}", data_dir.display())
        })?;
        config.db_path = data_dir.join(taskdeck_core::config::DB_FILE_NAME);
    }
    if let Some(platform) = cli.platform {
        config.platform = platform.into();
    }
    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("failed to resolve current directory: {err}"))
}

fn log_dir_for(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .filter(|parent| parent.is_absolute())
        .map(|parent| parent.join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("taskdeck-logs"))
}

fn execute(store: &mut SqliteTaskStore, command: Command) {
    match command {
        Command::Add { text, category } => match store.add_task(text, category.as_deref()) {
            Some(id) => println!("added {id}"),
            None => println!("nothing to add: task text is empty"),
        },
        Command::Toggle { id } => {
            if store.toggle_complete(&id) {
                if let Some(task) = store.task(&id) {
                    println!("{}", render_task_line(task));
                }
            } else {
                println!("no task with id {id}");
            }
        }
        Command::Delete { id } => {
            if store.delete_task(&id) {
                println!("deleted {id}");
            } else {
                println!("no task with id {id}");
            }
        }
        Command::List { filter } => {
            let mut view = TaskView::new();
            view.set_filter(Filter::from(filter));
            for task in view.visible(store.tasks()) {
                println!("{}", render_task_line(task));
            }
        }
        Command::Categories => {
            for category in store.categories() {
                println!("{category}");
            }
        }
    }
}

fn render_task_line(task: &Task) -> String {
    let mark = if task.is_completed() { 'x' } else { ' ' };
    format!("[{mark}] {}  {}", task.id(), task.display_label())
}
