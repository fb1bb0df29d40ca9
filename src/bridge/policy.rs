//! Which player to follow when several are on the bus.

/// Well-known name prefix of every MPRIS player.
pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Return true if `name` follows the MPRIS naming convention.
pub fn is_player_name(name: &str) -> bool {
    name.starts_with(MPRIS_PREFIX)
}

/// Live player names in the order they were discovered.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    names: Vec<String>,
}

impl Candidates {
    /// Add `name` at the end unless already present. Returns true if it was added.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.iter().any(|n| n == name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove `name`. Returns true if it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

/// Prefer a player whose bus name contains `preferred`, else the first one found.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    preferred: String,
}

impl SelectionPolicy {
    pub fn new(preferred: &str) -> Self {
        Self {
            preferred: preferred.trim().to_lowercase(),
        }
    }

    pub fn select<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        if !self.preferred.is_empty() {
            if let Some(name) = candidates
                .iter()
                .find(|n| n.to_lowercase().contains(&self.preferred))
            {
                return Some(name);
            }
        }
        candidates.first().map(String::as_str)
    }
}
