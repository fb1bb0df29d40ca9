//! Compact/expanded state machine.
//!
//! The controller never reads a clock: every input carries `now`, and the
//! auto-collapse timer is just a deadline checked by `tick`.

use std::time::{Duration, Instant};

use crate::track::TrackRecord;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Compact,
    Expanded,
}

#[derive(Debug, Clone)]
pub struct IslandController {
    state: ViewState,
    manually_collapsed: bool,
    pending_collapse: Option<Instant>,
    collapse_delay: Duration,
    has_track: bool,
    /// `playing` of the last record seen.
    last_playing: bool,
}

impl IslandController {
    pub fn new(collapse_delay: Duration) -> Self {
        Self {
            state: ViewState::Compact,
            manually_collapsed: false,
            pending_collapse: None,
            collapse_delay,
            has_track: false,
            last_playing: false,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn manually_collapsed(&self) -> bool {
        self.manually_collapsed
    }

    /// When the island will collapse on its own, if a collapse is pending.
    pub fn pending_collapse(&self) -> Option<Instant> {
        self.pending_collapse
    }

    /// Feed a new now-playing record. Returns the new state on a transition.
    ///
    /// `None` (no record) changes nothing.
    pub fn track_updated(&mut self, record: Option<&TrackRecord>, now: Instant) -> Option<ViewState> {
        let record = record?;
        self.has_track = true;
        self.last_playing = record.playing;

        match (self.state, record.playing) {
            (ViewState::Compact, true) if !self.manually_collapsed => {
                let changed = self.transition(ViewState::Expanded);
                self.manually_collapsed = false;
                changed
            }
            (ViewState::Expanded, true) => {
                self.pending_collapse = None;
                None
            }
            (ViewState::Expanded, false) => {
                // Repeated paused updates keep the first deadline.
                if self.pending_collapse.is_none() {
                    self.pending_collapse = Some(now + self.collapse_delay);
                }
                None
            }
            (ViewState::Compact, _) => None,
        }
    }

    /// The user clicked the island. Returns the new state on a transition.
    ///
    /// Expanding onto a paused track arms the auto-collapse from `now`.
    pub fn user_clicked(&mut self, now: Instant) -> Option<ViewState> {
        match self.state {
            ViewState::Compact if self.has_track => {
                let changed = self.transition(ViewState::Expanded);
                self.manually_collapsed = false;
                if !self.last_playing {
                    self.pending_collapse = Some(now + self.collapse_delay);
                }
                changed
            }
            ViewState::Compact => None,
            ViewState::Expanded => {
                let changed = self.transition(ViewState::Compact);
                self.manually_collapsed = true;
                changed
            }
        }
    }

    /// Advance the logical clock; fires the pending collapse once its deadline passes.
    pub fn tick(&mut self, now: Instant) -> Option<ViewState> {
        match self.pending_collapse {
            Some(deadline) if now >= deadline => {
                let changed = self.transition(ViewState::Compact);
                self.manually_collapsed = false;
                changed
            }
            _ => None,
        }
    }

    fn transition(&mut self, next: ViewState) -> Option<ViewState> {
        if self.state == next {
            return None;
        }
        self.pending_collapse = None;
        self.state = next;
        Some(next)
    }
}
