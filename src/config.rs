//! Configuration handling for schema_docgen

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete schema_docgen configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

/// Output artifact configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory for generated artifacts, relative to the input root
    pub directory: String,
    /// File name of the Markdown document
    pub document_file: String,
    /// File name of the JSON schema export
    pub export_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "docs".to_string(),
            document_file: "DICCIONARIO_BASE_DATOS.md".to_string(),
            export_file: "base_datos.json".to_string(),
        }
    }
}

impl OutputConfig {
    /// Resolve the output directory under the given input root
    pub fn directory_under(&self, input_root: &Path) -> PathBuf {
        input_root.join(&self.directory)
    }

    /// Resolve the document path under the given input root
    pub fn document_path(&self, input_root: &Path) -> PathBuf {
        self.directory_under(input_root).join(&self.document_file)
    }

    /// Resolve the JSON export path under the given input root
    pub fn export_path(&self, input_root: &Path) -> PathBuf {
        self.directory_under(input_root).join(&self.export_file)
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub stdout: bool,
}
