use clap::Parser;
use taskboard::cli::commands::Cli;
use taskboard::cli::handlers;
use taskboard::io::config_io::ENV_LOG;
use taskboard::io::logging::{LogTarget, init_logging};

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → launch TUI
        if let Err(e) = taskboard::tui::run(cli.dir.as_deref()) {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Commands share stdout with their output, so only warnings reach stderr
    let level = std::env::var(ENV_LOG).ok();
    let _logger = match init_logging(level.as_deref(), LogTarget::Stderr) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
