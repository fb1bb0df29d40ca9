use super::*;

fn ov<'a>(v: impl Into<Value<'a>>) -> OwnedValue {
    OwnedValue::try_from(v.into()).unwrap()
}

fn wrapped<'a>(v: impl Into<Value<'a>>) -> OwnedValue {
    ov(Value::Value(Box::new(v.into())))
}

fn bag(entries: Vec<(&str, OwnedValue)>) -> RawMetadata {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn empty_bag_is_not_publishable() {
    let err = normalize(&RawMetadata::new(), None, None).unwrap_err();
    assert_eq!(err, MetadataIncomplete::Empty);
}

#[test]
fn missing_or_blank_title_is_not_publishable() {
    let m = bag(vec![(ARTIST, ov("Someone")), (ALBUM, ov("Something"))]);
    assert_eq!(
        normalize(&m, None, None).unwrap_err(),
        MetadataIncomplete::MissingTitle
    );

    let m = bag(vec![(TITLE, ov("   "))]);
    assert_eq!(
        normalize(&m, None, None).unwrap_err(),
        MetadataIncomplete::MissingTitle
    );
}

#[test]
fn artist_list_takes_first_element() {
    let m = bag(vec![
        (TITLE, ov("Song")),
        (
            ARTIST,
            ov(vec!["First".to_string(), "Second".to_string()]),
        ),
    ]);
    assert_eq!(normalize(&m, None, None).unwrap().artist, "First");
}

#[test]
fn artist_scalar_and_missing_fall_back_sensibly() {
    let m = bag(vec![(TITLE, ov("Song")), (ARTIST, ov("Solo"))]);
    assert_eq!(normalize(&m, None, None).unwrap().artist, "Solo");

    let m = bag(vec![(TITLE, ov("Song"))]);
    assert_eq!(normalize(&m, None, None).unwrap().artist, UNKNOWN_ARTIST);

    let m = bag(vec![(TITLE, ov("Song")), (ARTIST, ov(Vec::<String>::new()))]);
    assert_eq!(normalize(&m, None, None).unwrap().artist, UNKNOWN_ARTIST);

    let m = bag(vec![(TITLE, ov("Song")), (ARTIST, ov(""))]);
    assert_eq!(normalize(&m, None, None).unwrap().artist, UNKNOWN_ARTIST);
}

#[test]
fn variant_envelopes_are_unwrapped() {
    let m = bag(vec![
        (TITLE, wrapped("Wrapped")),
        (ARTIST, wrapped(vec!["Inner".to_string()])),
        (LENGTH, wrapped(42_000_000i64)),
    ]);
    let t = normalize(&m, Some(&wrapped("Playing")), Some(&wrapped(7i64))).unwrap();
    assert_eq!(t.title, "Wrapped");
    assert_eq!(t.artist, "Inner");
    assert_eq!(t.length_micros, 42_000_000);
    assert_eq!(t.position_micros, 7);
    assert!(t.playing);
}

#[test]
fn partial_metadata_gets_defaults() {
    let m = bag(vec![(TITLE, ov("Only a title"))]);
    let t = normalize(&m, None, None).unwrap();
    assert_eq!(t.album, "");
    assert_eq!(t.art_url, "");
    assert_eq!(t.length_micros, 0);
    assert_eq!(t.position_micros, 0);
    assert!(!t.playing);
}

#[test]
fn wide_lengths_convert_losslessly() {
    let day_micros: i64 = 24 * 60 * 60 * 1_000_000;
    let m = bag(vec![(TITLE, ov("Long")), (LENGTH, ov(day_micros))]);
    assert_eq!(normalize(&m, None, None).unwrap().length_micros, day_micros as u64);

    let huge: u64 = (1 << 60) + 1;
    let m = bag(vec![(TITLE, ov("Huge")), (LENGTH, ov(huge))]);
    assert_eq!(normalize(&m, None, None).unwrap().length_micros, huge);

    let m = bag(vec![(TITLE, ov("Narrow")), (LENGTH, ov(180_000_000u32))]);
    assert_eq!(normalize(&m, None, None).unwrap().length_micros, 180_000_000);
}

#[test]
fn negative_and_odd_numbers_clamp() {
    let m = bag(vec![(TITLE, ov("Odd")), (LENGTH, ov(-5i64))]);
    assert_eq!(normalize(&m, None, Some(&ov(-1i64))).unwrap().length_micros, 0);
    assert_eq!(normalize(&m, None, Some(&ov(-1i64))).unwrap().position_micros, 0);

    let m = bag(vec![(TITLE, ov("Float")), (LENGTH, ov(1_500_000.4f64))]);
    assert_eq!(normalize(&m, None, None).unwrap().length_micros, 1_500_000);

    let m = bag(vec![(TITLE, ov("Text length")), (LENGTH, ov("soon"))]);
    assert_eq!(normalize(&m, None, None).unwrap().length_micros, 0);
}

#[test]
fn playback_status_only_playing_counts() {
    let m = bag(vec![(TITLE, ov("Song"))]);
    assert!(normalize(&m, Some(&ov("Playing")), None).unwrap().playing);
    assert!(!normalize(&m, Some(&ov("Paused")), None).unwrap().playing);
    assert!(!normalize(&m, Some(&ov("Stopped")), None).unwrap().playing);
    assert!(!normalize(&m, Some(&ov(true)), None).unwrap().playing);
}

#[test]
fn normalize_is_idempotent() {
    let m = bag(vec![
        (TITLE, ov("Song")),
        (ARTIST, ov(vec!["A".to_string()])),
        (ALBUM, ov("B")),
        (ART_URL, ov("file:///tmp/cover.png")),
        (LENGTH, ov(10i64)),
    ]);
    let status = ov("Playing");
    let pos = ov(3i64);
    let first = normalize(&m, Some(&status), Some(&pos)).unwrap();
    let second = normalize(&m, Some(&status), Some(&pos)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.art_url, "file:///tmp/cover.png");
}

#[test]
fn decode_metadata_rejects_non_dictionaries() {
    assert!(decode_metadata(ov("not a dict")).is_err());
    assert!(decode_metadata(wrapped(5i64)).is_err());
}
