use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, TranslocalError};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "translocal.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Opaque project identifier generated by `translocal init`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub locale: LocaleConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale the source files are written in
    pub source: String,
    /// Locales to produce, in order
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    pub json: JsonFilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFilesConfig {
    /// Path templates containing the `[locale]` placeholder
    pub include: Vec<String>,
}

impl Config {
    /// Load and validate `translocal.json` from the working directory
    pub fn load() -> Result<Self> {
        if !Path::new(CONFIG_FILE).exists() {
            return Err(TranslocalError::Config(format!(
                "Configuration file not found: {}",
                CONFIG_FILE
            )));
        }
        Self::from_file(CONFIG_FILE)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslocalError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| TranslocalError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TranslocalError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslocalError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.locale.source.is_empty() {
            return Err(TranslocalError::Config(
                "Invalid configuration: locale.source is required".to_string(),
            ));
        }

        if self.files.json.include.is_empty() {
            return Err(TranslocalError::Config(
                "Invalid configuration: files.json.include array cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
