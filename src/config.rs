use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GmailError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Inclusive minimum attachment size in bytes.
    #[serde(default = "default_min_size_bytes")]
    pub min_size_bytes: u64,
    /// Only messages older than this many days qualify. When unset the
    /// cutoff defaults to one year before run time.
    #[serde(default)]
    pub age_days: Option<u32>,
    #[serde(default)]
    pub include_labels: Vec<String>,
    #[serde(default)]
    pub exclude_labels: Vec<String>,
    /// Suffix filenames with the message id instead of overwriting
    /// same-named attachments.
    #[serde(default)]
    pub unique_names: bool,
    /// Default destination directory; overridden by --output.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            min_size_bytes: default_min_size_bytes(),
            age_days: None,
            include_labels: Vec::new(),
            exclude_labels: Vec::new(),
            unique_names: false,
            output_dir: None,
        }
    }
}

fn default_min_size_bytes() -> u64 {
    // 50 KiB
    51200
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GmailError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| GmailError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GmailError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GmailError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| GmailError::ConfigError(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.download.age_days == Some(0) {
            return Err(GmailError::ConfigError(
                "download.age_days must be at least 1 when set".to_string(),
            ));
        }

        // A label in both sets would always lose to the exclusion; flag it.
        for name in &self.download.include_labels {
            if self
                .download
                .exclude_labels
                .iter()
                .any(|e| e.eq_ignore_ascii_case(name))
            {
                return Err(GmailError::ConfigError(format!(
                    "Label '{}' is listed in both include_labels and exclude_labels",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Write an example configuration file
    pub async fn create_example(path: &Path) -> Result<()> {
        let config = Self::default();
        config.save(path).await
    }
}
