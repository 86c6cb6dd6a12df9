use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use crate::cli::handlers::commons;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Lists the parameters defined in a definitions file."
)]
struct ListArgs {
    /// Path to the definitions file. Defaults to './tandem.toml', then to the
    /// one in the config directory.
    #[arg(long, short)]
    file: Option<String>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let set = commons::load_definitions(list_args.file.as_deref())?;

    println!(
        "\n--- Parameters in '{}' ---",
        set.path().display().to_string().yellow()
    );

    if set.is_empty() {
        println!("  {}", "No parameters defined.".dimmed());
        return Ok(());
    }

    for config in set.configs() {
        let mut line = format!(
            "  - {} ({} primary, {} secondary)",
            config.name.cyan(),
            config.primary_kind().as_str(),
            config.secondary_kind().as_str()
        );
        if config.cache_results {
            line.push_str(&format!(" {}", "[cached]".dimmed()));
        }
        println!("{line}");
        if let Some(description) = &config.description {
            if !description.trim().is_empty() {
                println!("      {}", description.dimmed());
            }
        }
    }
    Ok(())
}
