//! User config file source: $XDG_CONFIG_HOME/admock/config.toml or ~/.config/admock/config.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Path to the user config file.
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join("admock").join("config.toml"))
}

/// Add the user config file source to builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(user_path) = user_config_path() {
        if user_path.exists() {
            builder = builder.add_source(File::from(user_path).required(false));
        } else {
            debug!(
                config_path = %user_path.display(),
                "No user configuration file; using defaults"
            );
        }
    }
    Ok(builder)
}
