use config::{Config as ConfigLoader, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use super::error::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Vertex the negative-cycle search starts from.
    pub source: String,
    #[serde(default = "default_heuristic")]
    pub heuristic: bool,
    /// Rotate a found cycle so it begins at this vertex.
    #[serde(default)]
    pub start_from: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    pub from: String,
    pub to: String,
    pub cutoff: usize,
    #[serde(default)]
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub paths: PathsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_heuristic() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.search.source.is_empty() {
            return Err(Error::ConfigLoadError(
                "search.source must name a vertex".to_string(),
            ));
        }
        if self.paths.from.is_empty() || self.paths.to.is_empty() {
            return Err(Error::ConfigLoadError(
                "paths.from and paths.to must name vertices".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default location of the configuration file, relative to the workspace root.
fn default_config_path() -> Result<PathBuf, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    Ok(base_path
        .join("crates")
        .join("executor")
        .join("Config.toml"))
}

/// Loads configuration from a TOML file and `EXECUTOR_*` environment variables.
///
/// Nested keys use a double underscore, e.g. `EXECUTOR_PATHS__MAX_RESULTS=5`.
pub fn load_config(path: Option<&Path>) -> Result<Config, Error> {
    let config_file_path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    if !config_file_path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(
            File::from(config_file_path.as_path())
                .format(FileFormat::Toml)
                .required(true),
        )
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    app_config.validate()?;
    Ok(app_config)
}
