//! Application model: `App`, the latest track plus the island state.

use std::time::{Duration, Instant};

use crate::config::IslandSettings;
use crate::island::{IslandController, IslandGeometry, IslandSize, ViewState};
use crate::track::TrackRecord;

/// The main application model.
pub struct App {
    controller: IslandController,
    geometry: IslandGeometry,
    track: Option<TrackRecord>,
    /// When `track` arrived; anchors progress interpolation.
    received_at: Option<Instant>,
}

impl App {
    pub fn new(settings: &IslandSettings) -> Self {
        Self {
            controller: IslandController::new(Duration::from_millis(settings.auto_collapse_ms)),
            geometry: IslandGeometry::from_settings(settings),
            track: None,
            received_at: None,
        }
    }

    pub fn view_state(&self) -> ViewState {
        self.controller.state()
    }

    /// Size the island should currently have.
    pub fn island_size(&self) -> IslandSize {
        self.geometry.size_for(self.view_state())
    }

    /// The last record received. Kept even after its player goes away.
    pub fn track(&self) -> Option<&TrackRecord> {
        self.track.as_ref()
    }

    /// Accept a record from the bridge. Returns the new island size on a transition.
    pub fn on_track_update(&mut self, record: TrackRecord, now: Instant) -> Option<IslandSize> {
        let changed = self.controller.track_updated(Some(&record), now);
        self.track = Some(record);
        self.received_at = Some(now);
        changed.map(|state| self.geometry.size_for(state))
    }

    /// The user clicked the island.
    pub fn on_click(&mut self, now: Instant) -> Option<IslandSize> {
        self.controller
            .user_clicked(now)
            .map(|state| self.geometry.size_for(state))
    }

    /// Advance time; fires a pending auto-collapse.
    pub fn tick(&mut self, now: Instant) -> Option<IslandSize> {
        self.controller
            .tick(now)
            .map(|state| self.geometry.size_for(state))
    }

    /// Playback position to display at `now`, in microseconds.
    ///
    /// While playing, the reported position advances with the time elapsed
    /// since the record arrived, clamped to the track length when known.
    pub fn position_at(&self, now: Instant) -> u64 {
        let (Some(track), Some(received_at)) = (&self.track, self.received_at) else {
            return 0;
        };
        if !track.playing {
            return track.position_micros;
        }

        let elapsed = now.saturating_duration_since(received_at).as_micros();
        let elapsed = u64::try_from(elapsed).unwrap_or(u64::MAX);
        let position = track.position_micros.saturating_add(elapsed);
        if track.has_length() {
            position.min(track.length_micros)
        } else {
            position
        }
    }
}
