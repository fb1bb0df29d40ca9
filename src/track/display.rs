use crate::config::{TimeField, TrackField};

use super::model::TrackRecord;

/// Format microseconds as `m:ss`.
pub fn format_time(micros: u64) -> String {
    let secs = micros / 1_000_000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Progress through the track as a percentage in `0.0..=100.0`.
///
/// Returns 0 when the length is unknown.
pub fn progress_percent(position_micros: u64, length_micros: u64) -> f64 {
    if length_micros == 0 {
        return 0.0;
    }
    (position_micros as f64 / length_micros as f64 * 100.0).min(100.0)
}

/// Build a display line from `fields` of `track`, in order, joined by `sep`.
///
/// Blank fields are skipped; falls back to the title when nothing was produced.
pub fn line_from_fields(track: &TrackRecord, fields: &[TrackField], sep: &str) -> String {
    let parts: Vec<&str> = fields
        .iter()
        .map(|f| match f {
            TrackField::Title => track.title.trim(),
            TrackField::Artist => track.artist.trim(),
            TrackField::Album => track.album.trim(),
        })
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}

/// Build the time line (elapsed/total/remaining) for a position within a track.
///
/// Total and remaining are omitted while the length is unknown.
pub fn time_line(
    position_micros: u64,
    length_micros: u64,
    fields: &[TimeField],
    sep: &str,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for f in fields {
        match f {
            TimeField::Elapsed => parts.push(format_time(position_micros)),
            TimeField::Total if length_micros > 0 => parts.push(format_time(length_micros)),
            TimeField::Remaining if length_micros > 0 => {
                let rem = length_micros.saturating_sub(position_micros);
                parts.push(format!("-{}", format_time(rem)));
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(sep))
    }
}
