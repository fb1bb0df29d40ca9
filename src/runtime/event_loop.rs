use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::App;
use crate::bridge::BridgeHandle;
use crate::config;
use crate::island::{IslandHost, IslandSize};
use crate::track::TrackRecord;
use crate::ui::TerminalHost;

/// What a key press asks the runtime to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Click,
    PlayPause,
    Next,
    Previous,
    Quit,
}

/// Map a key press to an action.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::Click),
        KeyCode::Char(' ') | KeyCode::Char('p') => Some(Action::PlayPause),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Next),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Previous),
        _ => None,
    }
}

/// Map a mouse event to an action; only left clicks on the island count.
pub fn action_for_mouse(mouse: MouseEvent, host: &TerminalHost) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if host.hit(mouse.column, mouse.row) => {
            Some(Action::Click)
        }
        _ => None,
    }
}

fn resize(host: &mut TerminalHost, size: Option<IslandSize>) {
    if let Some(size) = size {
        debug!(width = size.width, height = size.height, "resizing island");
        host.expand_island(size);
    }
}

/// Main terminal event loop: drains track updates, fires the collapse timer,
/// draws and handles input. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    host: &mut TerminalHost,
    bridge: &BridgeHandle,
    updates: &Receiver<TrackRecord>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(record) = updates.try_recv() {
            let changed = app.on_track_update(record, Instant::now());
            resize(host, changed);
        }

        let changed = app.tick(Instant::now());
        resize(host, changed);

        terminal.draw(|f| host.draw(f, app, &settings.ui, Instant::now()))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) => action_for_key(key),
            Event::Mouse(mouse) => action_for_mouse(mouse, host),
            _ => None,
        };
        match action {
            Some(Action::Quit) => break,
            Some(Action::Click) => {
                let changed = app.on_click(Instant::now());
                resize(host, changed);
            }
            Some(Action::PlayPause) => bridge.play_pause(),
            Some(Action::Next) => bridge.next(),
            Some(Action::Previous) => bridge.previous(),
            None => {}
        }
    }

    Ok(())
}
