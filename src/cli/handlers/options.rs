use anyhow::Result;
use clap::Parser;

use crate::cli::handlers::commons;

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Resolves an option list and prints it, one option per line."
)]
struct OptionsArgs {
    /// The parameter whose options to resolve.
    name: String,

    /// A chosen primary value. When given, the secondary list for that value
    /// is resolved instead of the primary list.
    value: Option<String>,

    /// Path to the definitions file. Defaults to './tandem.toml', then to the
    /// one in the config directory.
    #[arg(long, short)]
    file: Option<String>,

    /// Kill a resolution command after this many seconds.
    #[arg(long, short)]
    timeout: Option<u64>,
}

pub fn handle(args: Vec<String>) -> Result<()> {
    let options_args = OptionsArgs::try_parse_from(&args)?;
    let set = commons::load_definitions(options_args.file.as_deref())?;

    // An unknown name resolves to an empty list; the miss is already logged
    // as a warning. Scripts consuming this output rely on that.
    let Some(config) = set.find(&options_args.name) else {
        return Ok(());
    };

    let resolver = commons::build_resolver(&set, config, options_args.timeout)?;
    let options = match &options_args.value {
        Some(value) => resolver.secondary_options(value)?,
        None => resolver.primary_options()?,
    };
    commons::print_option_lines(&options);
    Ok(())
}
