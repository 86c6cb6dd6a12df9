// src/cli/handlers/commons.rs

// This module contains shared functions used by multiple handlers.

use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    core::{paths, registry::DefinitionSet, resolver::CascadeResolver},
    models::CascadeConfig,
    system::runner::SystemRunner,
};

/// Loads the definition set named by `--file`, or the default one.
pub fn load_definitions(file_arg: Option<&str>) -> Result<DefinitionSet> {
    let path = match file_arg {
        Some(raw) => paths::expand_user_path(raw)?,
        None => paths::default_definitions_file()?,
    };
    DefinitionSet::load(&path)
        .with_context(|| format!("Could not load definitions from '{}'", path.display()))
}

/// Finds a definition or fails with a user-facing error.
///
/// Handlers that answer questions interactively want a hard error here; the
/// `options` handler instead treats a miss as an empty list.
pub fn find_required<'a>(set: &'a DefinitionSet, name: &str) -> Result<&'a CascadeConfig> {
    set.find(name).ok_or_else(|| {
        anyhow!(
            "No parameter named '{}' is defined in '{}'.",
            name,
            set.path().display()
        )
    })
}

/// Builds a resolver for one definition, wired to a real runner.
///
/// Commands run from the definitions file's directory, so templates can use
/// paths relative to the file that names them.
pub fn build_resolver(
    set: &DefinitionSet,
    config: &CascadeConfig,
    timeout_secs: Option<u64>,
) -> Result<CascadeResolver> {
    let mut runner = SystemRunner::new();
    if let Some(dir) = set.path().parent() {
        if !dir.as_os_str().is_empty() {
            runner = runner.with_working_dir(dir.to_path_buf());
        }
    }
    if let Some(secs) = timeout_secs {
        runner = runner.with_timeout(Duration::from_secs(secs));
    }
    let resolver = CascadeResolver::new(Arc::new(config.clone()), Arc::new(runner))?;
    Ok(resolver)
}

/// Prints an option list the way scripts expect it: one option per line,
/// nothing else.
pub fn print_option_lines(options: &[String]) {
    for option in options {
        println!("{option}");
    }
}
