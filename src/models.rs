// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered list of selectable option labels.
/// Duplicates are kept and source order is preserved.
pub type OptionList = Vec<String>;

// --- DEFINITIONS FILE MODELS (What is read from `tandem.toml`) ---

/// A static option block. Authors may write either a single text block
/// (one option per line, the way a textarea would capture it) or an explicit
/// list of lines. Both forms resolve to the same ordered sequence.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum StaticOptions {
    Lines(Vec<String>),
    Block(String),
}

impl Default for StaticOptions {
    fn default() -> Self {
        Self::Block(String::new())
    }
}

/// Where an option list comes from: fixed definition text, or the captured
/// first output line of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Static,
    Script,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Script => "script",
        }
    }
}

/// The definition of one cascading parameter: a primary option list and a
/// secondary option list whose contents depend on the chosen primary value.
///
/// Immutable once loaded. For each list, a set command template takes
/// precedence over the static block; a missing or blank template means the
/// static block is authoritative.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CascadeConfig {
    /// The primary field identifier. Injected from the definitions-file table
    /// key, not written in the table body.
    #[serde(skip)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Static source for the primary list: one label per line.
    #[serde(default)]
    pub primary_choices: StaticOptions,

    /// Command template for the primary list. Its first output line is a
    /// comma-separated list of labels.
    #[serde(default)]
    pub primary_command: Option<String>,

    /// The secondary field identifier, bundled with the chosen values on
    /// submission.
    pub secondary_name: String,

    /// Static source for the secondary list: `key:label` entries, matched
    /// against the chosen primary value.
    #[serde(default)]
    pub secondary_choices: StaticOptions,

    /// Command template for the secondary list. The chosen primary value is
    /// passed to it as one extra argument.
    #[serde(default)]
    pub secondary_command: Option<String>,

    /// Memoize script-sourced secondary lists per primary value. The memo is
    /// discarded whenever the primary list is resolved again.
    #[serde(default)]
    pub cache_results: bool,
}

/// A command template counts as set only when it contains something to run.
fn command_is_set(command: &Option<String>) -> bool {
    command.as_deref().is_some_and(|c| !c.trim().is_empty())
}

impl CascadeConfig {
    pub fn primary_kind(&self) -> SourceKind {
        if command_is_set(&self.primary_command) {
            SourceKind::Script
        } else {
            SourceKind::Static
        }
    }

    pub fn secondary_kind(&self) -> SourceKind {
        if command_is_set(&self.secondary_command) {
            SourceKind::Script
        } else {
            SourceKind::Static
        }
    }
}

/// The deserialized shape of a whole definitions file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct DefinitionsFile {
    #[serde(default)]
    pub params: HashMap<String, CascadeConfig>,
}

// --- SUBMISSION MODELS (What the host collects from a completed pick) ---

/// The composite value produced by a completed cascade: the primary field's
/// name and chosen value bundled with the secondary field's name and chosen
/// value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CascadeValue {
    pub name: String,
    pub value: String,
    pub secondary_name: String,
    pub secondary_value: String,
}

impl CascadeValue {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        secondary_name: impl Into<String>,
        secondary_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secondary_name: secondary_name.into(),
            secondary_value: secondary_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_precedence_over_static_block() {
        let config = CascadeConfig {
            name: "env".to_string(),
            primary_choices: StaticOptions::Block("a\nb".to_string()),
            primary_command: Some("list-envs.sh".to_string()),
            secondary_name: "region".to_string(),
            ..Default::default()
        };
        assert_eq!(config.primary_kind(), SourceKind::Script);
        assert_eq!(config.secondary_kind(), SourceKind::Static);
    }

    #[test]
    fn test_blank_command_is_not_set() {
        let config = CascadeConfig {
            name: "env".to_string(),
            primary_command: Some("   ".to_string()),
            secondary_command: Some(String::new()),
            secondary_name: "region".to_string(),
            ..Default::default()
        };
        assert_eq!(config.primary_kind(), SourceKind::Static);
        assert_eq!(config.secondary_kind(), SourceKind::Static);
    }

    #[test]
    fn test_static_options_in_both_toml_forms() {
        #[derive(Deserialize)]
        struct Probe {
            v: StaticOptions,
        }

        let block: Probe = toml::from_str("v = \"red\\nblue\"").unwrap();
        assert_eq!(block.v, StaticOptions::Block("red\nblue".to_string()));

        let lines: Probe = toml::from_str("v = [\"red\", \"blue\"]").unwrap();
        assert_eq!(
            lines.v,
            StaticOptions::Lines(vec!["red".to_string(), "blue".to_string()])
        );
    }
}
