use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then applies environment
/// variables (prefix `ISLET__`) on top and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("ISLET")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let island = &self.island;
        if island.compact_width == 0 || island.compact_height == 0 {
            return Err("island.compact_width and island.compact_height must be >= 1".to_string());
        }
        if island.expanded_width == 0 || island.expanded_height == 0 {
            return Err(
                "island.expanded_width and island.expanded_height must be >= 1".to_string(),
            );
        }
        if self.ui.cell_width_px == 0 || self.ui.cell_height_px == 0 {
            return Err("ui.cell_width_px and ui.cell_height_px must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `ISLET_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("ISLET_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/islet/config.toml`
/// or `~/.config/islet/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("islet").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/islet/islet.log`
/// or `~/.local/state/islet/islet.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("islet").join("islet.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(dir) = env::var_os(var) {
        Some(PathBuf::from(dir))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
