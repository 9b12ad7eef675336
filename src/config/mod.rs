// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Configuration management for imgtrim

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Renaming rules
    #[serde(default)]
    pub rules: RuleConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct RuleConfig {
    /// What to do when the normalized name is already taken
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Leave dotfiles alone
    #[serde(default)]
    pub skip_hidden: bool,

    /// Report renames without performing them
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Policy for a rename whose target already exists
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run with a name collision error
    #[default]
    Error,
    /// Leave the file alone and carry on
    Skip,
    /// Rename anyway, replacing the existing file
    Overwrite,
}

/// How renames are reported on stdout
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `old --> new`, one line per rename
    #[default]
    Text,
    /// One pretty-printed report after the run
    Json,
    /// One JSON object per rename
    Jsonl,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Skip => "skip",
            Self::Overwrite => "overwrite",
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionPolicy {
    type Err = crate::ImgtrimError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "skip" => Ok(Self::Skip),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(crate::ImgtrimError::Config(format!(
                "Unknown collision policy '{}' (expected error, skip or overwrite)",
                other
            ))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = crate::ImgtrimError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "jsonl" => Ok(Self::Jsonl),
            other => Err(crate::ImgtrimError::Config(format!("Unknown output format '{}'", other))),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// A missing file is an error here: the path was asked for explicitly.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::ImgtrimError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| crate::ImgtrimError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
