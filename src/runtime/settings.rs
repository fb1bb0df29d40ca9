use ::config::ConfigError;
use tracing::warn;

use crate::config::Settings;

/// Settings in effect, plus why defaults were used instead of the config file.
pub struct LoadedSettings {
    pub settings: Settings,
    pub fallback: Option<String>,
}

impl LoadedSettings {
    /// Log a fallback to defaults. Call once logging is up; until then only
    /// stderr has seen it.
    pub fn report(&self) {
        if let Some(reason) = &self.fallback {
            warn!(%reason, "config ignored, running with defaults");
        }
    }
}

pub fn load_settings() -> LoadedSettings {
    let loaded = settle(Settings::load());
    if let Some(reason) = &loaded.fallback {
        eprintln!("islet: {reason}, using defaults");
    }
    loaded
}

/// Config is optional: a file that fails to load or validate never stops startup.
pub(super) fn settle(loaded: Result<Settings, ConfigError>) -> LoadedSettings {
    let fallback = match loaded {
        Ok(settings) => match settings.validate() {
            Ok(()) => {
                return LoadedSettings {
                    settings,
                    fallback: None,
                };
            }
            Err(msg) => format!("invalid config: {msg}"),
        },
        Err(e) => format!("failed to load config: {e}"),
    };
    LoadedSettings {
        settings: Settings::default(),
        fallback: Some(fallback),
    }
}
