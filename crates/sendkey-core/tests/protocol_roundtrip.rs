//! Integration tests for the sendkey-core protocol chain.
//!
//! These tests push text through the public API end to end:
//! decoder → mapper → validation → encoder → decoder → mapper.

use sendkey_core::{
    encode_compact, encode_pretty, map_keyevent, validate_keyevent, EventType, Keyevent,
    StreamDecoder,
};

/// Encodes with `encode`, decodes the text again, and maps it back.
fn roundtrip(ev: &Keyevent, encode: fn(&Keyevent) -> String) -> Keyevent {
    let text = encode(ev);
    let results = StreamDecoder::decode_all(text.as_bytes());
    assert_eq!(results.len(), 1, "exactly one record expected in {text:?}");
    let value = results.into_iter().next().unwrap().expect("encoder output must decode");
    map_keyevent(&value).expect("encoder output must map")
}

fn sample_events() -> Vec<Keyevent> {
    vec![
        Keyevent::new(EventType::KeyDown).with_scancode(30),
        Keyevent::new(EventType::KeyUp).with_virtual_key(0x25, true),
        Keyevent::new(EventType::KeyPress).with_virtual_key(13, false),
        Keyevent::new(EventType::Unspecified).with_unicode_codepoint(0x1F600),
        Keyevent::new(EventType::KeyDown)
            .with_scancode(0x1D)
            .with_virtual_key(0xA3, true)
            .with_unicode_codepoint(u32::MAX),
    ]
}

#[test]
fn test_compact_roundtrip_preserves_every_valid_event() {
    for ev in sample_events() {
        assert!(validate_keyevent(&ev).is_ok());
        assert_eq!(roundtrip(&ev, encode_compact), ev);
    }
}

#[test]
fn test_pretty_roundtrip_preserves_every_valid_event() {
    for ev in sample_events() {
        assert_eq!(roundtrip(&ev, encode_pretty), ev);
    }
}

#[test]
fn test_input_to_compact_output_roundtrip() {
    // Arrange
    let input = br#"{"type":"keydown","win_scancode":30,"win_time":99}"#;

    // Act
    let value = StreamDecoder::decode_all(input).remove(0).unwrap();
    let ev = map_keyevent(&value).unwrap();
    let again = roundtrip(&ev, encode_compact);

    // Assert
    assert_eq!(encode_compact(&ev), "{\"type\":\"keydown\",\"win_scancode\":30}\n");
    assert_eq!(again, ev);
}

#[test]
fn test_concatenated_pretty_output_decodes_as_separate_records() {
    // Arrange
    let events = sample_events();
    let text: String = events.iter().map(encode_pretty).collect();

    // Act
    let decoded: Vec<Keyevent> = StreamDecoder::decode_all(text.as_bytes())
        .into_iter()
        .map(|r| map_keyevent(&r.unwrap()).unwrap())
        .collect();

    // Assert
    assert_eq!(decoded, events);
}

#[test]
fn test_interleaved_malformed_records_keep_good_ones_in_order() {
    // Arrange
    let input = b"{\"win_scancode\":1}\n\
                  {\"win_scancode\": oops}\n\
                  not json at all\n\
                  {\"win_scancode\":2}\n\
                  {\"win_scancode\":\n\
                  {\"win_scancode\":3}\n";

    // Act
    let results = StreamDecoder::decode_all(input);
    let good: Vec<u32> = results
        .iter()
        .filter_map(|r| r.as_ref().ok())
        .map(|v| map_keyevent(v).unwrap().scancode.unwrap().get())
        .collect();
    let bad = results.iter().filter(|r| r.is_err()).count();

    // Assert
    assert_eq!(good, vec![1, 2, 3]);
    assert_eq!(bad, 3, "one error per malformed record");
}

#[test]
fn test_all_zero_event_never_validates() {
    let value = StreamDecoder::decode_all(
        br#"{"type":"keyup","win_scancode":0,"win_virtualkey":0,"unicode_codepoint":0}"#,
    )
    .remove(0)
    .unwrap();
    let ev = map_keyevent(&value).unwrap();
    assert!(validate_keyevent(&ev).is_err());
}
