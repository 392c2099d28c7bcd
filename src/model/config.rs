use serde::Deserialize;
use std::fs;
use std::path::Path;

const ENV_CONFIG_PATH: &str = "MARKWATCH_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_CASE_FILE: &str = "CASE_FILE";
const ENV_TOKEN_METADATA_FILE: &str = "TOKEN_METADATA_FILE";

const DEFAULT_CASE_FILE: &str = "fraud_case_images.csv";
const DEFAULT_TOKEN_METADATA_FILE: &str = "token_data.csv";

/// Locations of the two CSV inputs the token catalog is built from
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Fraud case export (one row per reported token, possibly several per case)
    #[serde(default = "default_case_file")]
    pub case_file: String,
    /// Token metadata export carrying the embedded media JSON
    #[serde(default = "default_token_metadata_file")]
    pub token_metadata_file: String,
}

fn default_case_file() -> String {
    DEFAULT_CASE_FILE.to_string()
}

fn default_token_metadata_file() -> String {
    DEFAULT_TOKEN_METADATA_FILE.to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            case_file: default_case_file(),
            token_metadata_file: default_token_metadata_file(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub data: DataConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    ///
    /// Environment variables override the config file, which overrides the
    /// defaults.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut data = Self::load_config_file(&config_path)
            .map(|cf| cf.data)
            .unwrap_or_default();

        if let Ok(case_file) = std::env::var(ENV_CASE_FILE) {
            data.case_file = case_file;
        }
        if let Ok(token_metadata_file) = std::env::var(ENV_TOKEN_METADATA_FILE) {
            data.token_metadata_file = token_metadata_file;
        }

        Self { data, port, host }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 9000,
            ..Config::default()
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn config_file_defaults_apply_to_missing_sections() {
        let parsed: ConfigFile = serde_yaml::from_str("{}").unwrap();
        assert_eq!(parsed.data.case_file, DEFAULT_CASE_FILE);
        assert_eq!(parsed.data.token_metadata_file, DEFAULT_TOKEN_METADATA_FILE);
    }

    #[test]
    fn config_file_overrides_data_paths() {
        let parsed: ConfigFile = serde_yaml::from_str(
            "data:\n  case_file: cases.csv\n  token_metadata_file: tokens.csv\n",
        )
        .unwrap();
        assert_eq!(parsed.data.case_file, "cases.csv");
        assert_eq!(parsed.data.token_metadata_file, "tokens.csv");
    }
}
