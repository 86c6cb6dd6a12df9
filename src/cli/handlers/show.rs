use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::{
    cli::handlers::commons,
    core::parse,
    models::{SourceKind, StaticOptions},
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Shows one parameter definition in detail. Nothing is executed."
)]
struct ShowArgs {
    /// The parameter to show.
    name: String,

    /// Path to the definitions file. Defaults to './tandem.toml', then to the
    /// one in the config directory.
    #[arg(long, short)]
    file: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let show_args = ShowArgs::try_parse_from(&args)?;
    let set = commons::load_definitions(show_args.file.as_deref())?;
    let config = commons::find_required(&set, &show_args.name)?;

    println!("\n--- Parameter '{}' ---", config.name.yellow());
    println!(
        "  {:<16} {}",
        "Defined in:".blue(),
        set.path().display()
    );
    if let Some(description) = &config.description {
        println!("  {:<16} {}", "Description:".blue(), description);
    }
    println!(
        "  {:<16} {}",
        "Primary:".blue(),
        describe_source(
            config.primary_kind(),
            &config.primary_choices,
            config.primary_command.as_deref(),
        )
    );
    println!(
        "  {:<16} {}",
        "Secondary name:".blue(),
        config.secondary_name
    );
    println!(
        "  {:<16} {}",
        "Secondary:".blue(),
        describe_source(
            config.secondary_kind(),
            &config.secondary_choices,
            config.secondary_command.as_deref(),
        )
    );
    println!(
        "  {:<16} {}",
        "Cache results:".blue(),
        if config.cache_results { "yes" } else { "no" }
    );
    Ok(())
}

fn describe_source(kind: SourceKind, choices: &StaticOptions, command: Option<&str>) -> String {
    match kind {
        SourceKind::Script => format!(
            "script {}",
            format!("`{}`", command.unwrap_or_default()).cyan()
        ),
        SourceKind::Static => {
            let count = parse::static_lines(choices).len();
            format!("static ({} entr{})", count, if count == 1 { "y" } else { "ies" })
        }
    }
}
