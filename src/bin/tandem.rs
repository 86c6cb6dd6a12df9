// src/bin/tandem.rs

use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;
use tandem::cli::{Cli, handlers};

// --- Command Definition and Registry ---

/// Defines a command, its aliases, and its handler function.
/// The handler signature is kept consistent across all commands for
/// simplicity in the registry.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands. To add a new command,
/// add an entry to this static array.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "check",
        aliases: &[],
        handler: handlers::check::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
    CommandDefinition {
        name: "options",
        aliases: &["opts"],
        handler: handlers::options::handle,
    },
    CommandDefinition {
        name: "pick",
        aliases: &[],
        handler: handlers::pick::handle,
    },
    CommandDefinition {
        name: "show",
        aliases: &["info"],
        handler: handlers::show::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The main entry point of the `tandem` application.
/// It sets up logging, parses arguments, dispatches to the correct handler,
/// and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let mut args = cli.args.into_iter();
    let Some(action) = args.next() else {
        println!("tandem: nothing to do. Try 'tandem --help'.");
        return Ok(());
    };

    match find_command(&action) {
        Some(command) => (command.handler)(args.collect()),
        None => Err(anyhow!("Unknown command '{}'. Try 'tandem --help'.", action)),
    }
}
