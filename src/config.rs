use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("EVE.db")
}

impl Config {
    /// Reads `config.toml` from the working directory; a missing file means
    /// defaults.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        if !Path::new(config_path).exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            Error::Config(format!("Failed to read config file '{config_path}': {e}"))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Database location, with the `EVE_DB_PATH` environment variable taking
    /// precedence over the config file.
    pub fn database_path(&self) -> PathBuf {
        env::var("EVE_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.database.path.clone())
    }
}
