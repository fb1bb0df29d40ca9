//! Log setup. The terminal is in raw mode while the app runs, so log lines
//! go to a file instead of stderr.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LoggingSettings, default_log_path};

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
///
/// Logging is switched off (with a notice on stderr) if the file cannot be opened.
pub fn init_logging(settings: &LoggingSettings) {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        eprintln!("islet: no log location (HOME unset), logging disabled");
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("islet: cannot open {}, logging disabled: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init();
    if installed.is_ok() {
        tracing::info!(log = %path.display(), "islet starting");
    }
}
