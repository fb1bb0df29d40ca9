//! Terminal rendering of the island.
//!
//! The terminal stands in for the island's window: `TerminalHost` receives
//! resize requests through `IslandHost` and draws a box of the requested
//! pixel size, scaled to terminal cells.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::island::{IslandHost, IslandSize, ViewState};
use crate::track::{TrackRecord, line_from_fields, progress_percent, time_line};

const CONTROLS: &[(&str, &str)] = &[
    ("enter/click", "expand/collapse"),
    ("space/p", "play/pause"),
    ("h/l", "prev/next"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Rectangle of `size` pixels, in cells, centered in `area`.
///
/// Never larger than `area`; always leaves room for a border.
pub fn island_rect(size: IslandSize, cell_width_px: u32, cell_height_px: u32, area: Rect) -> Rect {
    let to_cells = |px: u32, cell: u32| {
        u16::try_from(px.div_ceil(cell.max(1))).unwrap_or(u16::MAX)
    };
    let width = to_cells(size.width, cell_width_px).max(3).min(area.width);
    let height = to_cells(size.height, cell_height_px).max(3).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// The terminal as the island's window.
pub struct TerminalHost {
    size: IslandSize,
    /// Where the island was last drawn, for mouse hit-testing.
    island_area: Rect,
}

impl TerminalHost {
    pub fn new(initial: IslandSize) -> Self {
        Self {
            size: initial,
            island_area: Rect::default(),
        }
    }

    pub fn size(&self) -> IslandSize {
        self.size
    }

    /// Whether a terminal cell lies inside the island as last drawn.
    pub fn hit(&self, column: u16, row: u16) -> bool {
        self.island_area.contains(Position { x: column, y: row })
    }

    /// Render the island and the controls footer.
    pub fn draw(&mut self, frame: &mut Frame, app: &App, ui: &UiSettings, now: Instant) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(frame.area());

        let area = island_rect(self.size, ui.cell_width_px, ui.cell_height_px, chunks[0]);
        self.island_area = area;

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match (app.view_state(), app.track()) {
            (ViewState::Expanded, Some(track)) => draw_expanded(frame, inner, track, app, ui, now),
            (_, track) => draw_compact(frame, inner, track, ui),
        }

        let footer = Paragraph::new(controls_text())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" islet "));
        frame.render_widget(footer, chunks[1]);
    }
}

impl IslandHost for TerminalHost {
    fn expand_island(&mut self, size: IslandSize) {
        self.size = size;
    }
}

fn draw_compact(frame: &mut Frame, area: Rect, track: Option<&TrackRecord>, ui: &UiSettings) {
    let text = match track {
        Some(track) => {
            let icon = if track.playing { "▶" } else { "⏸" };
            format!(
                "{icon} {}",
                line_from_fields(track, &ui.compact_fields, &ui.field_separator)
            )
        }
        None => ui.idle_text.clone(),
    };
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), row);
}

fn draw_expanded(
    frame: &mut Frame,
    area: Rect,
    track: &TrackRecord,
    app: &App,
    ui: &UiSettings,
    now: Instant,
) {
    let [title, details, gauge, time] = Layout::vertical([Constraint::Length(1); 4])
        .flex(ratatui::layout::Flex::Center)
        .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(track.title.as_str()).bold()).alignment(Alignment::Center),
        title,
    );
    frame.render_widget(
        Paragraph::new(line_from_fields(track, &ui.expanded_fields, &ui.field_separator))
            .alignment(Alignment::Center)
            .italic(),
        details,
    );

    let position = app.position_at(now);
    let ratio = progress_percent(position, track.length_micros) / 100.0;
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().add_modifier(Modifier::BOLD))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(""),
        gauge,
    );

    if let Some(text) = time_line(position, track.length_micros, &ui.time_fields, &ui.time_separator) {
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), time);
    }
}
