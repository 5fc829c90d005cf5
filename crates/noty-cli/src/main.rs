//! Noty command-line frontend.
//!
//! Each invocation restores the saved session, applies one command and
//! persists the result, so tabs survive from one call to the next.

mod commands;
mod frontend;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use noty_core::NotyError;
use noty_core::ui::CloseChoice;
use noty_infrastructure::NotyPaths;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "noty")]
#[command(about = "Noty - a tabbed text editor with session persistence", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory (defaults to ~/.noty)
    #[arg(long, global = true, env = "NOTY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log file or directory (defaults to <data dir>/logs)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List open tabs
    Status,
    /// Create an untitled tab, reading its content from stdin
    New {
        /// Syntax mode of the new tab
        #[arg(long)]
        language: Option<String>,
    },
    /// Open a file in a tab, or switch to it if already open
    Open {
        path: String,
    },
    /// Save a tab to disk
    Save {
        id: u64,
        /// Save under a new path
        #[arg(long = "as", value_name = "PATH")]
        save_as: Option<String>,
    },
    /// Close a tab
    Close {
        id: u64,
        /// Save unsaved changes before closing
        #[arg(long, conflicts_with = "discard")]
        save: bool,
        /// Drop unsaved changes
        #[arg(long)]
        discard: bool,
    },
    /// Inspect or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings document
    Show,
    /// Overwrite settings with the defaults
    Reset,
    /// Set the autosave debounce window
    AutosaveDelay {
        /// Milliseconds
        millis: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_fatal(&e) {
                tracing::error!("Terminating after internal error: {:#}", e);
            }
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = NotyPaths::new(cli.data_dir).context("Failed to resolve the data directory")?;
    paths
        .ensure_dirs()
        .with_context(|| format!("Failed to create {}", paths.root().display()))?;

    let log_path = cli.log_file.unwrap_or_else(|| paths.logs_dir());
    let _log_guard = match logging::init(logging::LogConfig { log_path }) {
        Ok(guard) => {
            tracing::debug!("Logging to {}", guard.log_file.display());
            Some(guard)
        }
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    match cli.command {
        Commands::Status => commands::status::run(&paths).await,
        Commands::New { language } => commands::tab::new(&paths, language).await,
        Commands::Open { path } => commands::tab::open(&paths, &path).await,
        Commands::Save { id, save_as } => commands::tab::save(&paths, id, save_as).await,
        Commands::Close { id, save, discard } => {
            commands::tab::close(&paths, id, close_choice(save, discard)).await
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&paths).await,
            SettingsAction::Reset => commands::settings::reset(&paths).await,
            SettingsAction::AutosaveDelay { millis } => {
                commands::settings::set_autosave_delay(&paths, millis).await
            }
        },
    }
}

fn close_choice(save: bool, discard: bool) -> CloseChoice {
    if save {
        CloseChoice::Save
    } else if discard {
        CloseChoice::Discard
    } else {
        CloseChoice::Cancel
    }
}

fn is_fatal(error: &anyhow::Error) -> bool {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<NotyError>())
        .is_some_and(NotyError::is_fatal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_close_flags() {
        let cli = Cli::try_parse_from(["noty", "close", "3", "--discard"]).unwrap();
        match cli.command {
            Commands::Close { id, save, discard } => {
                assert_eq!(id, 3);
                assert_eq!(close_choice(save, discard), CloseChoice::Discard);
            }
            _ => panic!("expected close"),
        }

        assert!(Cli::try_parse_from(["noty", "close", "3", "--save", "--discard"]).is_err());
    }

    #[test]
    fn test_parse_save_as() {
        let cli = Cli::try_parse_from(["noty", "save", "7", "--as", "out.md"]).unwrap();
        match cli.command {
            Commands::Save { id, save_as } => {
                assert_eq!(id, 7);
                assert_eq!(save_as.as_deref(), Some("out.md"));
            }
            _ => panic!("expected save"),
        }
    }

    #[test]
    fn test_close_defaults_to_cancel() {
        assert_eq!(close_choice(false, false), CloseChoice::Cancel);
        assert_eq!(close_choice(true, false), CloseChoice::Save);
    }

    #[test]
    fn test_fatal_errors_are_found_through_context() {
        let fatal = anyhow::Error::new(NotyError::DuplicateTabId(4)).context("Failed to restore");
        assert!(is_fatal(&fatal));

        let recoverable =
            anyhow::Error::new(NotyError::not_found("tab", 4)).context("Failed to save");
        assert!(!is_fatal(&recoverable));
    }
}
