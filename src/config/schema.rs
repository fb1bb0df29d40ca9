use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/islet/config.toml` or `~/.config/islet/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ISLET__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub island: IslandSettings,
    pub bridge: BridgeSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IslandSettings {
    /// Island size while compact, in pixels.
    pub compact_width: u32,
    pub compact_height: u32,
    /// Island size while expanded, in pixels.
    pub expanded_width: u32,
    pub expanded_height: u32,
    /// How long the island stays expanded after playback pauses (milliseconds).
    pub auto_collapse_ms: u64,
}

impl Default for IslandSettings {
    fn default() -> Self {
        Self {
            compact_width: 170,
            compact_height: 44,
            expanded_width: 380,
            expanded_height: 200,
            auto_collapse_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Case-insensitive substring of the bus name to prefer when several players exist.
    /// Empty disables the preference.
    pub preferred_player: String,
    /// Delay between subscribing to a player and the first metadata read (milliseconds).
    pub initial_refresh_delay_ms: u64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            preferred_player: "spotify".to_string(),
            initial_refresh_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Pixels represented by one terminal column.
    pub cell_width_px: u32,
    /// Pixels represented by one terminal row.
    pub cell_height_px: u32,

    /// Text shown in the compact island when nothing is playing.
    pub idle_text: String,

    /// Which track fields the compact island shows, and in what order.
    ///
    /// Example: ["artist", "title"]
    pub compact_fields: Vec<TrackField>,

    /// Secondary track fields shown under the title when expanded.
    pub expanded_fields: Vec<TrackField>,

    /// Separator used to join track fields.
    pub field_separator: String,

    /// Which time fields to show under the progress bar, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub time_fields: Vec<TimeField>,

    /// Separator used to join `time_fields`.
    pub time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            cell_width_px: 8,
            cell_height_px: 16,
            idle_text: "♪".to_string(),
            compact_fields: vec![TrackField::Title],
            expanded_fields: vec![TrackField::Artist, TrackField::Album],
            field_separator: " - ".to_string(),
            time_fields: vec![TimeField::Elapsed, TimeField::Total],
            time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive; `RUST_LOG` wins when set.
    pub filter: String,
    /// Log file location. Defaults to `$XDG_STATE_HOME/islet/islet.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackField {
    Title,
    Artist,
    Album,
}
