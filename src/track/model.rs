/// Artist shown when a player reports none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Canonical now-playing data, normalized from a player's MPRIS properties.
///
/// A record is only ever built with a non-blank `title`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Artwork URI, or empty.
    pub art_url: String,
    pub playing: bool,
    pub position_micros: u64,
    /// Track length; 0 when the player does not know it.
    pub length_micros: u64,
}

impl TrackRecord {
    /// Whether the player reported a usable length.
    pub fn has_length(&self) -> bool {
        self.length_micros > 0
    }
}
