use anyhow::{Result, anyhow};
use clap::Parser;
use dialoguer::{Select, theme::ColorfulTheme};

use crate::{cli::handlers::commons, models::CascadeValue};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Interactively walks one cascade and prints the chosen pair as JSON."
)]
struct PickArgs {
    /// The parameter to pick values for.
    name: String,

    /// Path to the definitions file. Defaults to './tandem.toml', then to the
    /// one in the config directory.
    #[arg(long, short)]
    file: Option<String>,

    /// Kill a resolution command after this many seconds.
    #[arg(long, short)]
    timeout: Option<u64>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let pick_args = PickArgs::try_parse_from(&args)?;
    let set = commons::load_definitions(pick_args.file.as_deref())?;
    let config = commons::find_required(&set, &pick_args.name)?;
    let resolver = commons::build_resolver(&set, config, pick_args.timeout)?;

    let primary = resolver.primary_options()?;
    if primary.is_empty() {
        return Err(anyhow!(
            "Parameter '{}' resolved to an empty primary list.",
            config.name
        ));
    }
    let chosen_primary = select_one(&format!("Choose a value for '{}'", config.name), &primary)?;

    let secondary = resolver.secondary_options(&chosen_primary)?;
    if secondary.is_empty() {
        return Err(anyhow!(
            "No secondary options for '{}' = '{}'.",
            config.name,
            chosen_primary
        ));
    }
    let chosen_secondary = select_one(
        &format!("Choose a value for '{}'", config.secondary_name),
        &secondary,
    )?;

    let submission = CascadeValue::new(
        config.name.clone(),
        chosen_primary,
        config.secondary_name.clone(),
        chosen_secondary,
    );
    println!("{}", serde_json::to_string_pretty(&submission)?);
    Ok(())
}

fn select_one(prompt: &str, options: &[String]) -> Result<String> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact_opt()?;

    match selection {
        Some(index) => Ok(options[index].clone()),
        None => Err(anyhow!("Operation cancelled by user.")),
    }
}
