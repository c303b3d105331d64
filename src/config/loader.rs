//! Config file and environment loading

use super::types::NettoolConfig;
use std::env;
use std::path::{Path, PathBuf};

/// File looked up in the home directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = ".nettool.toml";

/// Prefix of environment overrides (`NETTOOL_PROXY_HOST`, ...)
pub const ENV_PREFIX: &str = "NETTOOL_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

impl NettoolConfig {
    /// `~/.nettool.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load defaults, then the config file, then environment overrides
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Returns
    /// * `Ok((config, Some(path)))` - a config file was read
    /// * `Ok((config, None))` - defaults and environment only
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let (mut config, used) = match path {
            Some(path) => (Self::from_file(path)?, Some(path.to_path_buf())),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(default) => (Self::from_file(&default)?, Some(default)),
                None => (Self::default(), None),
            },
        };

        config.apply_env()?;
        Ok((config, used))
    }

    /// Apply `NETTOOL_*` variables from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        };

        let connect = &mut self.connect;
        if let Some((_, v)) = get("HOST") {
            connect.host = v;
        }
        if let Some((key, v)) = get("PORT") {
            connect.port = parse_port(&key, &v)?;
        }
        if let Some((_, v)) = get("PROXY_PROTOCOL") {
            connect.proxy_protocol = v;
        }
        if let Some((_, v)) = get("PROXY_HOST") {
            connect.proxy_host = Some(v);
        }
        if let Some((key, v)) = get("PROXY_PORT") {
            connect.proxy_port = parse_port(&key, &v)?;
        }
        if let Some((_, v)) = get("PROXY_USER") {
            connect.proxy_user = Some(v);
        }
        if let Some((_, v)) = get("PROXY_PASS") {
            connect.proxy_pass = Some(v);
        }
        if let Some((key, v)) = get("TIMEOUT_MS") {
            connect.timeout_ms = Some(v.parse().map_err(|_| ConfigError::InvalidEnv { key, value: v })?);
        }

        if let Some((_, v)) = get("DEBUG") {
            self.logging.debug = parse_bool(&v);
        }
        if let Some((_, v)) = get("LOG_FILE") {
            self.logging.log_file = Some(PathBuf::from(v));
        }

        Ok(())
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, ConfigError> {
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Supports: true/false, 1/0, yes/no, on/off (case insensitive); anything else is false
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
