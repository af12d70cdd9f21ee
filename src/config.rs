use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

use crate::database::{ConnectionConfig, DatabaseResult};

/// Connection settings read from the configuration file and environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExodbConfig {
    /// Database host; empty means localhost
    pub host: String,

    /// Database port; unset or 0 means the standard port
    pub port: Option<i64>,

    pub database: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,
}

const EMPTY_CONFIG: &str = r#"### exodb configuration file

### database server
# host = "localhost"
# port = 3306

### schema and credentials
# database = "crawler"
# username = "crawler"
# password = ""
"#;

impl ExodbConfig {
    /// Load the configuration
    ///
    /// Reads the TOML file at `path` (by default `$HOME/.exodb/exodb.toml`),
    /// writing a commented template if it does not exist yet, then applies
    /// `EXODB_*` environment variables on top.
    pub fn new(path: &Option<String>) -> Result<ExodbConfig> {
        let mut builder = Config::builder();

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                let exodb_dir = Self::config_dir()?;
                std::fs::create_dir_all(exodb_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create exodb directory: {}", e))?;
                let p = format!("{}/exodb.toml", exodb_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // E.g., `EXODB_HOST=db.example.com exodb check`
        builder = builder.add_source(config::Environment::with_prefix("EXODB"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        Self::from_settings(settings)
    }

    /// Extract the connection settings from already-built configuration sources
    pub fn from_settings(settings: Config) -> Result<ExodbConfig> {
        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let non_empty = |key: &str| config.get(key).filter(|v| !v.is_empty()).cloned();

        let port = non_empty("port")
            .map(|p| {
                p.trim()
                    .parse::<i64>()
                    .map_err(|e| anyhow!("Invalid port '{}': {}", p, e))
            })
            .transpose()?;

        Ok(ExodbConfig {
            host: config.get("host").cloned().unwrap_or_default(),
            port,
            database: non_empty("database"),
            username: non_empty("username"),
            // an explicitly empty password is still a password setting
            password: config.get("password").cloned(),
        })
    }

    /// Feed the settings through the connection builder
    ///
    /// All builder validation applies, so a missing database name or
    /// username fails here.
    pub fn connection_config(&self) -> DatabaseResult<ConnectionConfig> {
        Ok(ConnectionConfig::new(self.host.as_str())
            .port(self.port)?
            .database(self.database.clone().unwrap_or_default())?
            .username(self.username.clone().unwrap_or_default())?
            .password(self.password.clone().unwrap_or_default()))
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let lines = [
            format!("Config File: {}", Self::config_file_path()),
            format!(
                "Host:        {}",
                if self.host.is_empty() {
                    "(default: localhost)"
                } else {
                    self.host.as_str()
                }
            ),
            format!(
                "Port:        {}",
                self.port
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "(default: 3306)".to_string())
            ),
            format!(
                "Database:    {}",
                self.database.as_deref().unwrap_or("(not set)")
            ),
            format!(
                "Username:    {}",
                self.username.as_deref().unwrap_or("(not set)")
            ),
            format!(
                "Password:    {}",
                match self.password.as_deref() {
                    Some(p) if !p.is_empty() => "********",
                    _ => "(none)",
                }
            ),
        ];

        lines.join("\n")
    }

    /// Get the default config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.exodb/exodb.toml", home_dir)
    }

    fn config_dir() -> Result<String> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();
        Ok(format!("{}/.exodb", home_dir))
    }
}
