use clap::Parser;

pub mod handlers;

const HELP_COMMANDS: &str = "\
Commands:
  list             List the parameters defined in a definitions file
  show <name>      Show one parameter definition in detail
  options <name> [value]
                   Print the primary options, or the secondary options for a
                   chosen primary value, one per line
  pick <name>      Interactively choose a primary and a secondary value
  check            Validate a definitions file without running anything

Run a command with --help to see its flags.";

/// tandem: resolves two-stage cascading option lists from a definitions file.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = HELP_COMMANDS)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The command to run, followed by its own arguments.
    ///
    /// Captured raw so each handler can parse its own flags.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
