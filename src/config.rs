//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/repotree/repotree.toml`
//! 3. Local config: `<project_dir>/.repotree.toml`
//! 4. Environment variables: `REPOTREE_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{DEFAULT_DIR_SUFFIX, DEFAULT_EXCLUSIONS};

/// Exclusion rules applied to file entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExclusionSettings {
    /// Whole file names or extensions (without the dot) to drop
    pub names: Vec<String>,
}

impl Default for ExclusionSettings {
    fn default() -> Self {
        Self {
            names: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Sibling ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SortSettings {
    /// Compare names by code point instead of case-insensitively
    pub case_sensitive: bool,
}

/// Output formatting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Suffix appended to directory names in text trees
    pub dir_suffix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty: true,
            dir_suffix: DEFAULT_DIR_SUFFIX.to_string(),
        }
    }
}

/// Raw exclusion config for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawExclusionSettings {
    pub names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSortSettings {
    pub case_sensitive: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputSettings {
    pub pretty: Option<bool>,
    pub dir_suffix: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub exclusions: RawExclusionSettings,
    pub sort: RawSortSettings,
    pub output: RawOutputSettings,
}

impl ExclusionSettings {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["md", "txt"], &["lock"])       // → ["lock", "md", "txt"]
    /// merge_array(&["md", "txt"], &["!md", "lock"]) // → ["lock", "txt"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(pattern.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge overlay onto self (base) with union semantics.
    pub fn merge(&self, overlay: &RawExclusionSettings) -> Self {
        Self {
            names: overlay
                .names
                .as_ref()
                .map(|o| Self::merge_array(&self.names, o))
                .unwrap_or_else(|| self.names.clone()),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics.
    pub fn apply_global(&self, global: &RawExclusionSettings) -> Self {
        Self {
            names: global.names.clone().unwrap_or_else(|| self.names.clone()),
        }
    }
}

/// Unified configuration for repotree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub exclusions: ExclusionSettings,
    pub sort: SortSettings,
    pub output: OutputSettings,
}

/// Get the XDG config directory for repotree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repotree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("repotree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".repotree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Scalars: overlay wins if Some. Arrays: union with negation.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            exclusions: self.exclusions.merge(&overlay.exclusions),
            sort: SortSettings {
                case_sensitive: overlay
                    .sort
                    .case_sensitive
                    .unwrap_or(self.sort.case_sensitive),
            },
            output: self.output_overlay(&overlay.output),
        }
    }

    /// Scalars: global wins if Some. Arrays: REPLACE.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            exclusions: self.exclusions.apply_global(&global.exclusions),
            sort: SortSettings {
                case_sensitive: global
                    .sort
                    .case_sensitive
                    .unwrap_or(self.sort.case_sensitive),
            },
            output: self.output_overlay(&global.output),
        }
    }

    fn output_overlay(&self, overlay: &RawOutputSettings) -> OutputSettings {
        OutputSettings {
            pretty: overlay.pretty.unwrap_or(self.output.pretty),
            dir_suffix: overlay
                .dir_suffix
                .clone()
                .unwrap_or_else(|| self.output.dir_suffix.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.repotree.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE (global defines the real baseline)
    /// - Global → Local: UNION with negation support (`"!md"` keeps markdown files)
    /// - Any → Env vars: REPLACE (explicit user override)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply REPOTREE_* environment variables as explicit overrides.
    ///
    /// `REPOTREE_EXCLUSIONS__NAMES=md,lock` replaces the exclusion list.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("REPOTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("exclusions.names"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("exclusions.names") {
            settings.exclusions.names = val;
        }
        if let Ok(val) = config.get_bool("sort.case_sensitive") {
            settings.sort.case_sensitive = val;
        }
        if let Ok(val) = config.get_bool("output.pretty") {
            settings.output.pretty = val;
        }
        if let Ok(val) = config.get_string("output.dir_suffix") {
            settings.output.dir_suffix = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# repotree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/repotree/repotree.toml  (defines your baseline)
#   Local:  <project_dir>/.repotree.toml      (project-specific additions)
#   Env:    REPOTREE_* environment variables  (explicit overrides)
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!name" in local config to REMOVE an inherited item:
#     names = ["lock", "!md"]  # also drop *.lock, keep markdown files

[exclusions]
# Whole file names (case-sensitive) or extensions (matched case-insensitively)
# names = ["md", "txt", "gitignore", "gitkeep", "LICENSE", "keep"]

[sort]
# Order names by code point instead of case-insensitively
# case_sensitive = false

[output]
# Pretty-print JSON output
# pretty = true

# Suffix for directory names in text trees
# dir_suffix = "/"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
