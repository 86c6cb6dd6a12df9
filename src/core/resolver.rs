// src/core/resolver.rs

//! The two-stage resolution engine.
//!
//! A `CascadeResolver` owns one parameter definition and answers the two
//! questions the host asks: "what are the primary options?" and "given this
//! chosen primary value, what are the secondary options?". Commands run
//! through an injected [`CommandRunner`], so every resolution path can be
//! exercised without spawning processes.

use crate::core::cache::ResultCache;
use crate::core::parse;
use crate::models::{CascadeConfig, OptionList, SourceKind, StaticOptions};
use crate::system::runner::{CommandRunner, CommandSpec, ExecError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("The {role} command of parameter '{name}' is not usable: {source}")]
    BadTemplate {
        name: String,
        role: &'static str,
        #[source]
        source: ExecError,
    },
    #[error(transparent)]
    Exec(#[from] ExecError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// A resolved option source: either the definition's own text, or a command
/// spec whose first output line is parsed at query time.
#[derive(Debug, Clone)]
enum OptionSource {
    Static(Vec<String>),
    Script(CommandSpec),
}

impl OptionSource {
    fn from_parts(
        kind: SourceKind,
        choices: &StaticOptions,
        command: Option<&str>,
    ) -> Result<Self, ExecError> {
        match kind {
            SourceKind::Script => Ok(Self::Script(CommandSpec::parse(command.unwrap_or_default())?)),
            SourceKind::Static => Ok(Self::Static(parse::static_lines(choices))),
        }
    }
}

/// Resolves the primary and secondary option lists of one parameter.
///
/// Command templates are parsed once, at construction, so a broken template
/// is reported before anything is shown to a user rather than on first use.
pub struct CascadeResolver {
    config: Arc<CascadeConfig>,
    primary: OptionSource,
    secondary: OptionSource,
    cache: ResultCache,
    runner: Arc<dyn CommandRunner>,
}

impl CascadeResolver {
    pub fn new(config: Arc<CascadeConfig>, runner: Arc<dyn CommandRunner>) -> ResolveResult<Self> {
        let primary = OptionSource::from_parts(
            config.primary_kind(),
            &config.primary_choices,
            config.primary_command.as_deref(),
        )
        .map_err(|e| ResolveError::BadTemplate {
            name: config.name.clone(),
            role: "primary",
            source: e,
        })?;
        let secondary = OptionSource::from_parts(
            config.secondary_kind(),
            &config.secondary_choices,
            config.secondary_command.as_deref(),
        )
        .map_err(|e| ResolveError::BadTemplate {
            name: config.name.clone(),
            role: "secondary",
            source: e,
        })?;
        Ok(Self {
            config,
            primary,
            secondary,
            cache: ResultCache::new(),
            runner,
        })
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Resolves the primary option list.
    ///
    /// A successful resolution starts a new round: with caching enabled, the
    /// memoized secondary answers from the previous round are dropped. A
    /// failed resolution leaves the cache as it was.
    pub fn primary_options(&self) -> ResolveResult<OptionList> {
        let options = match &self.primary {
            OptionSource::Static(lines) => lines.clone(),
            OptionSource::Script(spec) => {
                let line = self.runner.run(spec)?;
                parse::split_csv_line(&line)
            }
        };
        if self.config.cache_results {
            self.cache.reset();
        }
        log::debug!(
            "Resolved {} primary option(s) for '{}'",
            options.len(),
            self.config.name
        );
        Ok(options)
    }

    /// Resolves the secondary option list for a chosen primary value.
    ///
    /// Static sources are matched entry by entry against `chosen` and are
    /// never cached. Script sources receive `chosen` as one appended
    /// argument; their answers are memoized per value when the definition
    /// asks for it. Failures pass through uncached either way.
    pub fn secondary_options(&self, chosen: &str) -> ResolveResult<OptionList> {
        match &self.secondary {
            OptionSource::Static(entries) => Ok(parse::match_secondary_entries(entries, chosen)),
            OptionSource::Script(spec) => {
                if self.config.cache_results {
                    self.cache
                        .get_or_compute(chosen, || self.run_secondary(spec, chosen))
                } else {
                    self.run_secondary(spec, chosen)
                }
            }
        }
    }

    fn run_secondary(&self, spec: &CommandSpec, chosen: &str) -> ResolveResult<OptionList> {
        let line = self.runner.run(&spec.with_arg(chosen))?;
        Ok(parse::split_csv_line(&line))
    }
}

// MARK: --- UNIT TESTS ---
