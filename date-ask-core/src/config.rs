//! Configuration at ~/.config/date-ask/config.toml

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DateAskError, DateAskResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/date-ask";
static DEFAULT_COLLECTION: &str = "responses";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DateAskConfig {
    /// Where the response slot is kept.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name sent along with remote records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responder: Option<String>,

    /// Remote document store. Responses stay local when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteConfig>,
}

/// A Firestore project that accepts appended documents.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RemoteConfig {
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for DateAskConfig {
    fn default() -> Self {
        DateAskConfig {
            data_dir: default_data_dir(),
            responder: None,
            remote: None,
        }
    }
}

impl DateAskConfig {
    pub fn config_path() -> DateAskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DateAskError::Config("Could not determine config directory".into()))?
            .join("date-ask");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config, writing a commented default on first run.
    pub fn load() -> DateAskResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> DateAskResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| DateAskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DateAskError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DateAskResult<()> {
        let defaults = toml::to_string_pretty(&DateAskConfig::default())
            .map_err(|e| DateAskError::Config(e.to_string()))?;
        let defaults: String = defaults.lines().map(|line| format!("# {line}\n")).collect();

        let contents = format!(
            "\
# date-ask configuration

# Where the response is stored:
{}
# Your name, sent with remote copies of the response:
# responder = \"Alex\"

# Also append confirmed responses to a Firestore collection:
# [remote]
# project_id = \"my-project\"
# api_key = \"...\"
# collection = \"{}\"
",
            defaults, DEFAULT_COLLECTION
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DateAskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DateAskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_loads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("date-ask/config.toml");

        DateAskConfig::create_default_config(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# data_dir = \"~/.local/share/date-ask\"\n"));

        let config = DateAskConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(config.responder.is_none());
        assert!(config.remote.is_none());
    }

    #[test]
    fn reads_remote_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/date-ask\"\nresponder = \"Sam\"\n\n[remote]\nproject_id = \"p\"\napi_key = \"k\"\n",
        )
        .unwrap();

        let config = DateAskConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/tmp/date-ask"));
        assert_eq!(config.responder.as_deref(), Some("Sam"));
        let remote = config.remote.unwrap();
        assert_eq!(remote.project_id, "p");
        assert_eq!(remote.collection, "responses");
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DateAskConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }
}
