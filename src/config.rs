//! Configuration handling for the csvql CLI
//!
//! Settings come from an optional `csvql.toml` file, then environment
//! variables, then command-line flags (applied by the binary).
//!
//! ## Environment Variables
//!
//! - `CSVQL_DATA_DIR` - Directory holding `<table>.csv` files
//! - `CSVQL_OUTPUT_FORMAT` - `text` or `csv`
//! - `CSVQL_SEPARATOR` - Cell separator for text output
//! - `CSVQL_LOG` - Log filter used when `RUST_LOG` is unset
//!
//! These can also be set in a `.env` file in the working directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CliError, CliResult};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "csvql.toml";

/// Environment variable names
pub const ENV_DATA_DIR: &str = "CSVQL_DATA_DIR";
pub const ENV_OUTPUT_FORMAT: &str = "CSVQL_OUTPUT_FORMAT";
pub const ENV_SEPARATOR: &str = "CSVQL_SEPARATOR";
pub const ENV_LOG: &str = "CSVQL_LOG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory that table names are resolved against
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Fallback log filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Result rendering
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_filter() -> String {
    "csvql=warn".to_string()
}

/// How result sets are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Cell separator for `text` output
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    ", ".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            separator: default_separator(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Cells joined by the configured separator
    #[default]
    Text,
    /// RFC 4180 CSV
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::Config(format!("unknown output format '{}'", other))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_filter: default_log_filter(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration for the current working directory.
    ///
    /// An explicit `path` must exist. Without one, `csvql.toml` in `dir` is
    /// read if present and defaults are used otherwise. Environment overrides
    /// are applied last.
    pub fn load(dir: &Path, path: Option<&Path>) -> CliResult<Self> {
        let env_path = dir.join(".env");
        if env_path.exists() {
            dotenvy::from_path(&env_path).map_err(|e| {
                CliError::Config(format!("invalid env file {}: {}", env_path.display(), e))
            })?;
        }

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = dir.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(dir) = get(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(format) = get(ENV_OUTPUT_FORMAT) {
            self.output.format = format.parse()?;
        }
        if let Some(separator) = get(ENV_SEPARATOR) {
            self.output.separator = separator;
        }
        if let Some(filter) = get(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.output.separator, ", ");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.log_filter, "csvql=warn");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("data_dir = \"tables\"\n[output]\nformat = \"csv\"\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("tables"));
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.separator, ", ");
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("data_dir = \".\""));
        assert!(toml_str.contains("format = \"text\""));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DATA_DIR, "/srv/data"),
            (ENV_OUTPUT_FORMAT, "CSV"),
            (ENV_SEPARATOR, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.separator, ", ");
    }

    #[test]
    fn test_bad_format_override() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == ENV_OUTPUT_FORMAT).then(|| "xml".to_string()))
            .unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "data_dir = [1, 2").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert_eq!(err.exit_code(), 40);
    }

    #[test]
    fn test_malformed_env_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), "NOT A VALID LINE\n").unwrap();
        let err = Config::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, CliError::Config(ref msg) if msg.contains(".env")));
        assert_eq!(err.exit_code(), 40);
    }
}
