//! Metadata normalizer: turns MPRIS property values into a `TrackRecord`.
//!
//! Players are loose about types. Values may arrive wrapped in one or more
//! variant envelopes, artists may be a string or a list, and lengths show up
//! as any integer width (or occasionally a double). All of that is absorbed
//! here; nothing downstream sees a `zvariant` value.

use std::collections::HashMap;

use zvariant::{OwnedValue, Value};

use crate::error::MetadataIncomplete;
use crate::track::{TrackRecord, UNKNOWN_ARTIST};

/// The `Metadata` property as received: `a{sv}` keyed by xesam/mpris names.
pub type RawMetadata = HashMap<String, OwnedValue>;

pub const TITLE: &str = "xesam:title";
pub const ARTIST: &str = "xesam:artist";
pub const ALBUM: &str = "xesam:album";
pub const ART_URL: &str = "mpris:artUrl";
pub const LENGTH: &str = "mpris:length";

/// Decode the raw `Metadata` property into a key/value bag.
pub fn decode_metadata(value: OwnedValue) -> Result<RawMetadata, zvariant::Error> {
    let mut value = Value::from(value);
    while let Value::Value(inner) = value {
        value = *inner;
    }
    RawMetadata::try_from(value)
}

/// Build a `TrackRecord` from one refresh worth of player properties.
///
/// Pure and idempotent: the same inputs always give the same record.
pub fn normalize(
    metadata: &RawMetadata,
    playback_status: Option<&OwnedValue>,
    position: Option<&OwnedValue>,
) -> Result<TrackRecord, MetadataIncomplete> {
    if metadata.is_empty() {
        return Err(MetadataIncomplete::Empty);
    }

    let title = metadata
        .get(TITLE)
        .and_then(|v| string_of(v))
        .filter(|t| !t.trim().is_empty())
        .ok_or(MetadataIncomplete::MissingTitle)?;

    let artist = metadata
        .get(ARTIST)
        .and_then(|v| first_string_of(v))
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let text = |key: &str| metadata.get(key).and_then(|v| string_of(v)).unwrap_or_default();

    Ok(TrackRecord {
        title,
        artist,
        album: text(ALBUM),
        art_url: text(ART_URL),
        playing: playback_status
            .and_then(|v| string_of(v))
            .is_some_and(|s| s == "Playing"),
        position_micros: position.and_then(|v| micros_of(v)).unwrap_or(0),
        length_micros: metadata.get(LENGTH).and_then(|v| micros_of(v)).unwrap_or(0),
    })
}

/// Strip any number of variant envelopes.
fn peel<'a, 'v>(value: &'a Value<'v>) -> &'a Value<'v> {
    let mut v = value;
    while let Value::Value(inner) = v {
        v = inner.as_ref();
    }
    v
}

fn string_of(value: &Value<'_>) -> Option<String> {
    match peel(value) {
        Value::Str(s) => Some(s.as_str().to_string()),
        Value::ObjectPath(p) => Some(p.as_str().to_string()),
        _ => None,
    }
}

/// First element of a string list, or the value itself when it is a plain string.
fn first_string_of(value: &Value<'_>) -> Option<String> {
    match peel(value) {
        Value::Array(items) => items.iter().next().and_then(string_of),
        other => string_of(other),
    }
}

/// Read a microsecond count of any numeric width. Negative values clamp to 0.
fn micros_of(value: &Value<'_>) -> Option<u64> {
    match peel(value) {
        Value::U8(v) => Some(u64::from(*v)),
        Value::U16(v) => Some(u64::from(*v)),
        Value::U32(v) => Some(u64::from(*v)),
        Value::U64(v) => Some(*v),
        Value::I16(v) => Some(u64::try_from(*v).unwrap_or(0)),
        Value::I32(v) => Some(u64::try_from(*v).unwrap_or(0)),
        Value::I64(v) => Some(u64::try_from(*v).unwrap_or(0)),
        Value::F64(v) if v.is_finite() => Some(v.max(0.0).round() as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
