//! Process configuration
//!
//! A single [`NettoolConfig`] is built at startup from, in increasing
//! precedence: built-in defaults, the TOML config file, `NETTOOL_*`
//! environment variables and command-line flags. It is then passed by
//! reference into the probing core.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::{ConfigError, CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::{ConnectConfig, LoggingConfig, NettoolConfig};
