use anyhow::{Result, anyhow};
use clap::Parser;
use colored::Colorize;

use crate::{
    cli::handlers::commons,
    constants::KEY_LABEL_SEPARATOR,
    core::parse,
    models::{CascadeConfig, SourceKind},
    system::runner::CommandSpec,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Validates a definitions file without executing anything."
)]
struct CheckArgs {
    /// Path to the definitions file. Defaults to './tandem.toml', then to the
    /// one in the config directory.
    #[arg(long, short)]
    file: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let check_args = CheckArgs::try_parse_from(&args)?;
    let set = commons::load_definitions(check_args.file.as_deref())?;

    println!(
        "\n--- Checking '{}' ---",
        set.path().display().to_string().yellow()
    );
    if set.is_empty() {
        println!("  {}", "No parameters defined.".dimmed());
        return Ok(());
    }

    let mut error_count = 0usize;
    for config in set.configs() {
        let (errors, warnings) = inspect(config);
        error_count += errors.len();

        if errors.is_empty() && warnings.is_empty() {
            println!("  {} {}", "ok".green(), config.name);
            continue;
        }
        let marker = if errors.is_empty() {
            "warn".yellow()
        } else {
            "FAIL".red().bold()
        };
        println!("  {} {}", marker, config.name);
        for error in &errors {
            println!("      {} {}", "error:".red(), error);
        }
        for warning in &warnings {
            println!("      {} {}", "warning:".yellow(), warning);
        }
    }

    if error_count > 0 {
        return Err(anyhow!("{} problem(s) found.", error_count));
    }
    println!("\n{}", "Definitions look good.".green());
    Ok(())
}

/// Collects hard errors and soft warnings for one definition. Hard errors
/// are the ones a resolver would refuse to start with.
fn inspect(config: &CascadeConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (role, command) in [
        ("primary", config.primary_command.as_deref()),
        ("secondary", config.secondary_command.as_deref()),
    ] {
        if let Some(template) = command {
            if !template.trim().is_empty() {
                if let Err(e) = CommandSpec::parse(template) {
                    errors.push(format!("the {role} command is not usable: {e}"));
                }
            }
        }
    }

    if config.primary_kind() == SourceKind::Static
        && parse::static_lines(&config.primary_choices).is_empty()
    {
        warnings.push("the primary list is empty: nothing can be picked".to_string());
    }

    if config.secondary_kind() == SourceKind::Static {
        let entries = parse::static_lines(&config.secondary_choices);
        if entries.is_empty() {
            warnings.push("the secondary list is empty: nothing can be picked".to_string());
        }
        for entry in entries {
            if !entry.contains(KEY_LABEL_SEPARATOR) {
                warnings.push(format!(
                    "secondary entry '{entry}' has no '{KEY_LABEL_SEPARATOR}' separator and can never match"
                ));
            }
        }
    }

    (errors, warnings)
}
