mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use crate::cli::CliError;
use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, Workspace};
use crate::model::{Backend, TodoFields, TodoId, TodoRecord, parse_due_date};
use crate::ops::projection::Board;
use crate::store::{self, TodoStore};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    let dir = resolve_dir(cli.dir.as_deref())?;

    match cli.command {
        // main.rs launches the board when there is no subcommand
        None => Ok(()),
        Some(cmd) => match cmd {
            Commands::Init(args) => cmd_init(&dir, args),

            // Read commands
            Commands::List(args) => cmd_list(&dir, args, json),
            Commands::Show(args) => cmd_show(&dir, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&dir, args, json),
            Commands::Status(args) => cmd_status(&dir, args, json),
            Commands::Priority(args) => cmd_priority(&dir, args, json),
            Commands::Edit(args) => cmd_edit(&dir, args, json),
            Commands::Toggle(args) => cmd_toggle(&dir, args, json),
            Commands::Delete(args) => cmd_delete(&dir, args, json),
        },
    }
}

/// The directory commands run against: -C if given, else the cwd
pub fn resolve_dir(dir: Option<&Path>) -> Result<PathBuf, CliError> {
    match dir {
        Some(dir) => Ok(std::fs::canonicalize(dir)?),
        None => Ok(std::env::current_dir()?),
    }
}

// ---------------------------------------------------------------------------
// Store access
// ---------------------------------------------------------------------------

/// Open the configured store. Each command is its own process, so only
/// the shared collection makes sense here.
fn open_cli_store(dir: &Path) -> Result<Box<dyn TodoStore>, CliError> {
    let workspace: Workspace = config_io::load_workspace(dir)?;
    if workspace.config.store.backend != Backend::Collection {
        return Err(CliError::MemoryBackend);
    }
    Ok(store::open_store(&workspace)?)
}

/// Find a todo by full id or unique id prefix
pub fn resolve_id(store: &dyn TodoStore, query: &str) -> Result<TodoId, CliError> {
    let records = store.records();
    if let Some(record) = records.iter().find(|r| r.id.as_str() == query) {
        return Ok(record.id.clone());
    }
    let matches: Vec<&TodoRecord> = records
        .iter()
        .filter(|r| !query.is_empty() && r.id.as_str().starts_with(query))
        .collect();
    match matches.as_slice() {
        [] => Err(CliError::NotFound(query.to_string())),
        [only] => Ok(only.id.clone()),
        many => Err(CliError::Ambiguous {
            prefix: query.to_string(),
            count: many.len(),
        }),
    }
}

/// Resolve `query` to a record that is open for edits
fn editable(store: &dyn TodoStore, query: &str) -> Result<TodoRecord, CliError> {
    let id = resolve_id(store, query)?;
    let record = store
        .get(&id)
        .cloned()
        .ok_or_else(|| CliError::NotFound(query.to_string()))?;
    if record.completed {
        return Err(CliError::Locked(id));
    }
    Ok(record)
}

/// Apply the snapshot produced by a mutation and surface any failure
fn settle(store: &mut dyn TodoStore) -> Result<(), CliError> {
    store.sync();
    let failures = store.take_failures();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Failed(failures))
    }
}

fn parse_date_arg(text: &str) -> Result<Option<chrono::NaiveDate>, CliError> {
    parse_due_date(text).map_err(|_| CliError::InvalidDate(text.to_string()))
}

fn print_record(store: &dyn TodoStore, id: &TodoId, json: bool) -> Result<(), CliError> {
    let record = store
        .get(id)
        .ok_or_else(|| CliError::NotFound(id.to_string()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", format_record_line(record));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(dir: &Path, args: ListArgs, json: bool) -> Result<(), CliError> {
    let store = open_cli_store(dir)?;
    let board = Board::project(store.records().iter());
    if json {
        let out = BoardJson::from_board(&board, args.status);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for line in format_board(&board, args.status) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_show(dir: &Path, args: IdArg, json: bool) -> Result<(), CliError> {
    let store = open_cli_store(dir)?;
    let id = resolve_id(store.as_ref(), &args.id)?;
    let record = store
        .get(&id)
        .ok_or_else(|| CliError::NotFound(args.id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        for line in format_record_detail(record) {
            println!("{}", line);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(dir: &Path, args: AddArgs, json: bool) -> Result<(), CliError> {
    let date = match &args.date {
        Some(text) => parse_date_arg(text)?,
        None => None,
    };
    let mut store = open_cli_store(dir)?;
    let created = store.create(TodoFields {
        title: args.title,
        description: args.description.unwrap_or_default(),
        date,
        status: args.status,
        priority: args.priority,
    });
    settle(store.as_mut())?;
    let id = created.ok_or_else(|| CliError::NotFound("new todo".to_string()))?;
    print_record(store.as_ref(), &id, json)
}

fn cmd_status(dir: &Path, args: StatusArgs, json: bool) -> Result<(), CliError> {
    let mut store = open_cli_store(dir)?;
    let record = editable(store.as_ref(), &args.id)?;
    let id = record.id.clone();
    if record.status != args.status {
        store.update(
            &id,
            TodoRecord {
                status: args.status,
                ..record
            },
        );
        settle(store.as_mut())?;
    }
    print_record(store.as_ref(), &id, json)
}

fn cmd_priority(dir: &Path, args: PriorityArgs, json: bool) -> Result<(), CliError> {
    let mut store = open_cli_store(dir)?;
    let record = editable(store.as_ref(), &args.id)?;
    let id = record.id.clone();
    if record.priority != args.priority {
        store.update(
            &id,
            TodoRecord {
                priority: args.priority,
                ..record
            },
        );
        settle(store.as_mut())?;
    }
    print_record(store.as_ref(), &id, json)
}

fn cmd_edit(dir: &Path, args: EditArgs, json: bool) -> Result<(), CliError> {
    if args.title.is_none() && args.description.is_none() && args.date.is_none() {
        return Err(CliError::NothingToChange);
    }
    let date = args.date.as_deref().map(parse_date_arg).transpose()?;

    let mut store = open_cli_store(dir)?;
    let mut record = editable(store.as_ref(), &args.id)?;
    let id = record.id.clone();
    if let Some(title) = args.title {
        record.title = title;
    }
    if let Some(description) = args.description {
        record.description = description;
    }
    if let Some(date) = date {
        record.date = date;
    }
    store.update(&id, record);
    settle(store.as_mut())?;
    print_record(store.as_ref(), &id, json)
}

fn cmd_toggle(dir: &Path, args: IdArg, json: bool) -> Result<(), CliError> {
    let mut store = open_cli_store(dir)?;
    let id = resolve_id(store.as_ref(), &args.id)?;
    store.toggle_complete(&id);
    settle(store.as_mut())?;
    print_record(store.as_ref(), &id, json)
}

fn cmd_delete(dir: &Path, args: IdArg, json: bool) -> Result<(), CliError> {
    let mut store = open_cli_store(dir)?;
    let record = editable(store.as_ref(), &args.id)?;
    store.delete(&record.id);
    settle(store.as_mut())?;
    if json {
        let out = DeletedJson {
            deleted: record.id.as_str(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("deleted {} {}", record.id.short(), record.title);
    }
    Ok(())
}
