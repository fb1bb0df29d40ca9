use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn defaults_match_island_geometry() {
    let s = Settings::default();
    assert_eq!((s.island.compact_width, s.island.compact_height), (170, 44));
    assert_eq!((s.island.expanded_width, s.island.expanded_height), (380, 200));
    assert_eq!(s.island.auto_collapse_ms, 3000);
    assert_eq!(s.bridge.preferred_player, "spotify");
    assert!(s.validate().is_ok());
}

#[test]
fn resolve_config_path_prefers_islet_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("ISLET_CONFIG_PATH", "/tmp/islet-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/islet-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("islet")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("islet")
            .join("config.toml")
    );
}

#[test]
fn default_log_path_falls_back_to_local_state() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_STATE_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_log_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".local/state")
            .join("islet")
            .join("islet.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[island]
compact_width = 200
compact_height = 40
expanded_width = 400
expanded_height = 220
auto_collapse_ms = 1500

[bridge]
preferred_player = "vlc"
initial_refresh_delay_ms = 0

[ui]
cell_width_px = 10
cell_height_px = 20
idle_text = "idle"
compact_fields = ["artist", "title"]
expanded_fields = ["album"]
field_separator = " • "
time_fields = ["elapsed", "remaining"]
time_separator = " | "

[logging]
filter = "islet=debug"
file = "/tmp/islet.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ISLET_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("ISLET__ISLAND__AUTO_COLLAPSE_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.island.compact_width, 200);
    assert_eq!(s.island.compact_height, 40);
    assert_eq!(s.island.expanded_width, 400);
    assert_eq!(s.island.expanded_height, 220);
    assert_eq!(s.island.auto_collapse_ms, 1500);
    assert_eq!(s.bridge.preferred_player, "vlc");
    assert_eq!(s.bridge.initial_refresh_delay_ms, 0);
    assert_eq!(s.ui.cell_width_px, 10);
    assert_eq!(s.ui.cell_height_px, 20);
    assert_eq!(s.ui.idle_text, "idle");
    assert_eq!(s.ui.compact_fields, vec![TrackField::Artist, TrackField::Title]);
    assert_eq!(s.ui.expanded_fields, vec![TrackField::Album]);
    assert_eq!(s.ui.field_separator, " • ");
    assert_eq!(s.ui.time_fields, vec![TimeField::Elapsed, TimeField::Remaining]);
    assert_eq!(s.ui.time_separator, " | ");
    assert_eq!(s.logging.filter, "islet=debug");
    assert_eq!(
        s.logging.file.as_deref(),
        Some(std::path::Path::new("/tmp/islet.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[island]
auto_collapse_ms = 3000
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("ISLET_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("ISLET__ISLAND__AUTO_COLLAPSE_MS", "500");

    let s = Settings::load().unwrap();
    assert_eq!(s.island.auto_collapse_ms, 500);
}

#[test]
fn validate_rejects_zero_sizes() {
    let mut s = Settings::default();
    s.island.expanded_height = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.cell_width_px = 0;
    assert!(s.validate().is_err());
}
