// src/core/registry.rs

use crate::models::{CascadeConfig, DefinitionsFile};
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("I/O error while reading definitions: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse definitions file at '{path}': {source}")]
    TomlParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(
        "Parameter names '{first}' and '{second}' collide. Names are matched case-insensitively, so every definition needs a distinct name."
    )]
    DuplicateName { first: String, second: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// The loaded set of parameter definitions, addressable by name.
///
/// Lookup ignores ASCII case, mirroring how hosts echo field names back, so
/// a file carrying two names that differ only by case is rejected at load.
#[derive(Debug, Clone)]
pub struct DefinitionSet {
    path: PathBuf,
    params: HashMap<String, CascadeConfig>,
}

impl DefinitionSet {
    /// Reads and validates a definitions file.
    ///
    /// Each `[params.<name>]` table key becomes the definition's `name`.
    /// Command templates are not checked here; a resolver rejects a broken
    /// one the moment it is built for that parameter.
    pub fn load(path: &Path) -> RegistryResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut file: DefinitionsFile =
            toml::from_str(&content).map_err(|e| RegistryError::TomlParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut seen: HashMap<String, String> = HashMap::new();
        for (key, config) in &mut file.params {
            if let Some(first) = seen.insert(key.to_ascii_lowercase(), key.clone()) {
                return Err(RegistryError::DuplicateName {
                    first,
                    second: key.clone(),
                });
            }
            config.name = key.clone();
        }

        log::debug!(
            "Loaded {} parameter definition(s) from '{}'",
            file.params.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            params: file.params,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Finds a definition by name, ignoring ASCII case. A miss is logged as
    /// a warning; callers decide whether it is fatal for them.
    pub fn find(&self, name: &str) -> Option<&CascadeConfig> {
        let found = self
            .params
            .values()
            .find(|config| config.name.eq_ignore_ascii_case(name));
        if found.is_none() {
            warn!(
                "No parameter named '{}' is defined in '{}'",
                name,
                self.path.display()
            );
        }
        found
    }

    /// All definitions, sorted by name for stable display.
    pub fn configs(&self) -> Vec<&CascadeConfig> {
        let mut configs: Vec<&CascadeConfig> = self.params.values().collect();
        configs.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        configs
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SourceKind, StaticOptions};
    use std::io::Write;

    fn write_definitions(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_injects_table_keys_as_names() {
        let file = write_definitions(
            r#"
[params.platform]
primary-choices = "linux\nwindows"
secondary-name = "arch"
secondary-choices = ["linux:x86_64", "windows:aarch64"]

[params.color]
primary-command = "list-colors"
secondary-name = "shade"
secondary-command = "list-shades"
cache-results = true
"#,
        );
        let set = DefinitionSet::load(file.path()).unwrap();

        let platform = set.find("platform").unwrap();
        assert_eq!(platform.name, "platform");
        assert_eq!(platform.secondary_name, "arch");
        assert_eq!(platform.primary_kind(), SourceKind::Static);
        assert_eq!(
            platform.secondary_choices,
            StaticOptions::Lines(vec![
                "linux:x86_64".to_string(),
                "windows:aarch64".to_string()
            ])
        );

        let color = set.find("color").unwrap();
        assert_eq!(color.primary_kind(), SourceKind::Script);
        assert!(color.cache_results);
    }

    #[test]
    fn test_find_ignores_ascii_case() {
        let file = write_definitions(
            r#"
[params.Platform]
secondary-name = "arch"
"#,
        );
        let set = DefinitionSet::load(file.path()).unwrap();

        assert!(set.find("platform").is_some());
        assert!(set.find("PLATFORM").is_some());
        assert_eq!(set.find("PLATFORM").unwrap().name, "Platform");
        assert!(set.find("plat").is_none());
    }

    #[test]
    fn test_names_differing_only_by_case_are_rejected() {
        let file = write_definitions(
            r#"
[params.env]
secondary-name = "region"

[params.Env]
secondary-name = "region"
"#,
        );
        assert!(matches!(
            DefinitionSet::load(file.path()),
            Err(RegistryError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_reports_the_file_path() {
        let file = write_definitions("[params.broken\n");
        let err = DefinitionSet::load(file.path()).unwrap_err();
        match err {
            RegistryError::TomlParse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected TomlParse, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let missing = Path::new("definitely/not/here/tandem.toml");
        assert!(matches!(
            DefinitionSet::load(missing),
            Err(RegistryError::Io(_))
        ));
    }

    #[test]
    fn test_configs_are_sorted_by_name() {
        let file = write_definitions(
            r#"
[params.zeta]
secondary-name = "s"

[params.alpha]
secondary-name = "s"

[params.mid]
secondary-name = "s"
"#,
        );
        let set = DefinitionSet::load(file.path()).unwrap();
        let names: Vec<&str> = set.configs().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_empty_file_loads_an_empty_set() {
        let file = write_definitions("");
        let set = DefinitionSet::load(file.path()).unwrap();
        assert!(set.is_empty());
        assert!(set.find("anything").is_none());
    }
}
