//! unvendor: find Base44 SDK usage and plan its migration to REST.

mod commands;
mod session;
mod table;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use unvendor_core::tracing::{init_tracing, level_for_verbosity};
use unvendor_core::{FeatureStatus, Priority};

use commands::Outcome;
use session::Session;

#[derive(Parser, Debug)]
#[command(name = "unvendor", version, about = "Base44 SDK migration tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Project root to scan; `unvendor.toml` is read from here.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Extra config file, applied before the project's `unvendor.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Registry snapshot file (overrides `registry.state_path`).
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Do not read or write the registry snapshot.
    #[arg(long, global = true, default_value_t = false)]
    no_persist: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a feature for migration
    Register {
        name: String,
        description: String,
        /// Usage strings (call sites) for template matching
        usage: Vec<String>,
        /// high, medium, or low
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// Print the migration script for a feature
    Generate {
        feature_id: String,
        /// Also store the script and its endpoints on the feature
        #[arg(long)]
        attach: bool,
    },
    /// List registered features
    List {
        /// Only features with this status
        #[arg(long)]
        status: Option<FeatureStatus>,
        #[arg(long)]
        json: bool,
    },
    /// Show migration statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Scan the codebase and register detected features
    ///
    /// Every run registers what it finds, even features registered by an
    /// earlier scan; the report marks those with their earlier count.
    Scan,
    /// Fail if any Base44 SDK usage remains
    Check,
    /// Update a feature's status
    Status {
        feature_id: String,
        status: FeatureStatus,
    },
    /// List migration templates in match order
    Templates,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(level_for_verbosity(cli.verbose));

    match run(cli) {
        Ok(outcome) if outcome.success => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let mut session = Session::open(&cli.root, cli.config.as_deref(), cli.state, !cli.no_persist)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = dispatch(cli.command, &mut session, &mut out)?;
    out.flush()?;

    if outcome.mutated {
        session.save()?;
    }
    Ok(outcome)
}

fn dispatch(command: Command, session: &mut Session, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    match command {
        Command::Register {
            name,
            description,
            usage,
            priority,
        } => commands::register(session, &name, &description, &usage, priority, out),
        Command::Generate { feature_id, attach } => {
            commands::generate(session, &feature_id, attach, out)
        }
        Command::List { status, json } => commands::list(session, status, json, out),
        Command::Stats { json } => commands::stats(session, json, out),
        Command::Scan => commands::scan(session, out),
        Command::Check => commands::check(session, out),
        Command::Status { feature_id, status } => {
            commands::set_status(session, &feature_id, status, out)
        }
        Command::Templates => commands::templates(session, out),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_register_with_usage() {
        let cli = Cli::parse_from([
            "unvendor",
            "register",
            "Task.create",
            "Create tasks",
            "base44Entities.Task.create(",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Register {
                name,
                usage,
                priority,
                ..
            } => {
                assert_eq!(name, "Task.create");
                assert_eq!(usage, vec!["base44Entities.Task.create("]);
                assert_eq!(priority, Priority::Medium);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_status_values() {
        let cli = Cli::parse_from(["unvendor", "list", "--status", "migrating"]);
        assert!(matches!(
            cli.command,
            Command::List {
                status: Some(FeatureStatus::Migrating),
                json: false
            }
        ));
        assert!(Cli::try_parse_from(["unvendor", "status", "feature_1", "done"]).is_err());

        let cli = Cli::parse_from(["unvendor", "register", "Auth.me", "Current user", "--priority", "high"]);
        assert!(matches!(
            cli.command,
            Command::Register {
                priority: Priority::High,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["unvendor", "register", "a", "b", "--priority", "urgent"]).is_err());
    }
}
