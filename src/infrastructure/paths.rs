//! Standard file locations, following the XDG conventions.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "sds-console";

fn home() -> PathBuf {
    env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Data directory: `$XDG_DATA_HOME/sds-console` or
/// `~/.local/share/sds-console`. Holds the token file and the log.
#[must_use]
pub fn data_dir() -> PathBuf {
    env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home().join(".local/share"))
        .join(APP_DIR)
}

/// Config file: `$XDG_CONFIG_HOME/sds-console/config.toml` or
/// `~/.config/sds-console/config.toml`.
#[must_use]
pub fn config_file() -> PathBuf {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home().join(".config"))
        .join(APP_DIR)
        .join("config.toml")
}

/// The token file inside the data directory.
#[must_use]
pub fn token_file() -> PathBuf {
    data_dir().join("token")
}

/// The log file inside the data directory.
#[must_use]
pub fn log_file() -> PathBuf {
    data_dir().join("sds-console.log")
}
