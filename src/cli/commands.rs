use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{Backend, Priority, Status};

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - a three-column todo board"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a taskboard.toml in the current directory
    Init(InitArgs),
    /// Print the board, one section per status
    List(ListArgs),
    /// Show one todo
    Show(IdArg),
    /// Create a todo at the top of the board
    Add(AddArgs),
    /// Move a todo to another column
    Status(StatusArgs),
    /// Change a todo's priority
    Priority(PriorityArgs),
    /// Change a todo's title, description or due date
    Edit(EditArgs),
    /// Mark a todo completed, or reopen it
    Toggle(IdArg),
    /// Delete a todo (refused while completed)
    Delete(IdArg),
}

#[derive(Args)]
pub struct InitArgs {
    /// Board name shown in the header
    #[arg(long)]
    pub name: Option<String>,
    /// Storage backend: memory or collection
    #[arg(long)]
    pub backend: Option<Backend>,
    /// Project id for the shared collection
    #[arg(long)]
    pub project_id: Option<String>,
    /// Overwrite an existing taskboard.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only this column (todo, in-progress, complete)
    #[arg(long)]
    pub status: Option<Status>,
}

#[derive(Args)]
pub struct IdArg {
    /// Todo id or a unique prefix of it
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    #[arg(long, short)]
    pub description: Option<String>,
    /// Due date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long, default_value = "todo")]
    pub status: Status,
    #[arg(long, short, default_value = "low")]
    pub priority: Priority,
}

#[derive(Args)]
pub struct StatusArgs {
    pub id: String,
    /// todo, in-progress or complete
    pub status: Status,
}

#[derive(Args)]
pub struct PriorityArgs {
    pub id: String,
    /// low, medium or high
    pub priority: Priority,
}

#[derive(Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, short)]
    pub description: Option<String>,
    /// Due date, YYYY-MM-DD; an empty string clears it
    #[arg(long)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_defaults() {
        let cli = Cli::try_parse_from(["tb", "add", "Write docs"]).unwrap();
        let Some(Commands::Add(args)) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.title, "Write docs");
        assert_eq!(args.status, Status::Todo);
        assert_eq!(args.priority, Priority::Low);
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tb", "list", "--json", "-C", "/tmp/board"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/board")));
    }

    #[test]
    fn parses_choices_leniently() {
        let cli = Cli::try_parse_from(["tb", "status", "abc", "in-progress"]).unwrap();
        let Some(Commands::Status(args)) = cli.command else {
            panic!("expected status");
        };
        assert_eq!(args.status, Status::InProgress);
        assert!(Cli::try_parse_from(["tb", "priority", "abc", "urgent"]).is_err());
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tb"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn init_backend() {
        let cli = Cli::try_parse_from(["tb", "init", "--backend", "collection"]).unwrap();
        let Some(Commands::Init(args)) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.backend, Some(Backend::Collection));
    }
}
