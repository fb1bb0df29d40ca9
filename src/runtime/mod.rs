use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::bridge;
use crate::track::TrackRecord;
use crate::ui::TerminalHost;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = settings::load_settings();
    logging::init_logging(&loaded.settings.logging);
    loaded.report();
    let settings = loaded.settings;

    let (updates_tx, updates_rx) = mpsc::channel::<TrackRecord>();
    let bridge = bridge::spawn_bridge(settings.bridge.clone(), updates_tx);

    let mut app = App::new(&settings.island);
    let mut host = TerminalHost::new(app.island_size());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut host,
        &bridge,
        &updates_rx,
    );

    bridge.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
