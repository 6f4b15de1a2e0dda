//! Job configuration
//!
//! Flat, string-valued job properties in the style of batch-framework job
//! configuration. The output format reads its two keys at writer-creation
//! time and falls back to defaults; every other property is carried opaquely
//! for caller-supplied conversion hooks to consult.
//!
//! | Key        | Default       | Effect                                  |
//! |------------|---------------|-----------------------------------------|
//! | `jof.file` | `json_output` | file name stem before uniquification     |
//! | `jof.ext`  | `.json`       | suffix appended to the output file name  |

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Property key for the output file name stem
pub const FILE_NAME_KEY: &str = "jof.file";

/// Property key for the output file extension
pub const FILE_EXT_KEY: &str = "jof.ext";

/// Default output file name stem
pub const DEFAULT_FILE_NAME: &str = "json_output";

/// Default output file extension
pub const DEFAULT_FILE_EXT: &str = ".json";

/// Job-level configuration resolved once at writer creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobConfig {
    properties: HashMap<String, String>,
}

impl JobConfig {
    /// Create an empty configuration (all defaults apply)
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML mapping of `key: value` pairs
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Set a property, builder style
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set a property
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Get a property value, falling back to a default
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// The output file name stem (`jof.file`, default `json_output`)
    pub fn file_name_stem(&self) -> &str {
        self.get_or(FILE_NAME_KEY, DEFAULT_FILE_NAME)
    }

    /// The output file extension (`jof.ext`, default `.json`)
    pub fn file_extension(&self) -> &str {
        self.get_or(FILE_EXT_KEY, DEFAULT_FILE_EXT)
    }

    /// All properties
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}
