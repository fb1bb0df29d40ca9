use crate::config::IslandSettings;

use super::controller::ViewState;

/// Island dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IslandSize {
    pub width: u32,
    pub height: u32,
}

/// Size of the island for each view state. Loaded once, never changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IslandGeometry {
    pub compact: IslandSize,
    pub expanded: IslandSize,
}

impl IslandGeometry {
    pub fn from_settings(settings: &IslandSettings) -> Self {
        Self {
            compact: IslandSize {
                width: settings.compact_width,
                height: settings.compact_height,
            },
            expanded: IslandSize {
                width: settings.expanded_width,
                height: settings.expanded_height,
            },
        }
    }

    pub fn size_for(&self, state: ViewState) -> IslandSize {
        match state {
            ViewState::Compact => self.compact,
            ViewState::Expanded => self.expanded,
        }
    }
}

impl Default for IslandGeometry {
    fn default() -> Self {
        Self::from_settings(&IslandSettings::default())
    }
}

/// Whatever owns the real window: receives the size the island wants.
pub trait IslandHost {
    fn expand_island(&mut self, size: IslandSize);
}
