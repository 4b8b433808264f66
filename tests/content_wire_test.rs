// Wire format of song content and service requests

use chord_editor_wasm::models::{
    Chord, ChordEdit, ChordOrigin, Line, NormalizeRequest, PreparedLyrics, Section, SongContent,
};
use serde_json::json;

fn parse(value: serde_json::Value) -> SongContent {
    serde_json::from_value(value).expect("content should parse")
}

#[test]
fn test_plain_string_chords_are_manual() {
    let content = parse(json!([
        { "text": "Hello", "chords": { "0": "C", "3": "G" } }
    ]));

    let line = &content.lines[0];
    assert_eq!(line.chord_at(0), Some(&Chord::manual("C")));
    assert_eq!(line.chord_at(3), Some(&Chord::manual("G")));
    assert_eq!(line.section, Section::Verse);
}

#[test]
fn test_structured_chords_keep_origin() {
    let content = parse(json!([
        { "text": "Hello", "chords": {
            "0": { "text": "C", "type": "manual" },
            "2": { "text": "Am", "type": "auto" },
            "4": { "text": "F", "origin": "auto" },
            "5": { "text": "G", "type": "suggested" }
        }, "section": "chorus" }
    ]));

    let line = &content.lines[0];
    assert_eq!(line.chord_at(0).unwrap().origin, ChordOrigin::Manual);
    assert_eq!(line.chord_at(2).unwrap().origin, ChordOrigin::Auto);
    assert_eq!(line.chord_at(4).unwrap().origin, ChordOrigin::Auto);
    // Unknown origins read as manual
    assert_eq!(line.chord_at(5).unwrap().origin, ChordOrigin::Manual);
    assert_eq!(line.section, Section::Chorus);
}

#[test]
fn test_empty_and_null_chords_are_dropped() {
    let content = parse(json!([
        { "text": "Hello", "chords": {
            "0": "",
            "1": "  ",
            "2": null,
            "3": { "text": "", "type": "auto" },
            "4": { "type": "manual" },
            "5": " D "
        } }
    ]));

    let line = &content.lines[0];
    assert_eq!(line.chords.len(), 1);
    assert_eq!(line.chord_at(5), Some(&Chord::manual("D")));
}

#[test]
fn test_out_of_range_offsets_are_dropped() {
    let content = parse(json!([
        { "text": "Hi", "chords": { "2": "G", "3": "A", "40": "B" } }
    ]));

    let line = &content.lines[0];
    assert_eq!(line.chords.len(), 1);
    assert!(line.has_eol_chord());
}

#[test]
fn test_offsets_count_characters() {
    let content = parse(json!([
        { "text": "Żółw", "chords": { "4": "E" } }
    ]));

    assert_eq!(content.lines[0].char_len(), 4);
    assert!(content.lines[0].has_eol_chord());
}

#[test]
fn test_missing_fields_take_defaults() {
    let content = parse(json!([{ "text": "Only text" }, {}]));

    assert_eq!(content.len(), 2);
    assert!(content.lines[0].chords.is_empty());
    assert_eq!(content.lines[1].text, "");
    assert_eq!(content.lines[1].section, Section::Verse);
}

#[test]
fn test_serialized_offsets_are_string_keys() {
    let content = SongContent::new(vec![Line::new("Hello")
        .with_chord(10, Chord::manual("X"))
        .with_chord(0, Chord::manual("C"))
        .with_chord(3, Chord::auto("Am"))]);

    let value = serde_json::to_value(&content).unwrap();
    assert_eq!(
        value,
        json!([
            { "text": "Hello", "chords": {
                "0": { "text": "C", "type": "manual" },
                "3": { "text": "Am", "type": "auto" }
            }, "section": "verse" }
        ])
    );

    let back: SongContent = serde_json::from_value(value).unwrap();
    assert_eq!(back, content);
}

#[test]
fn test_normalize_request_shape() {
    let content = SongContent::new(vec![Line::new("Hi")]);
    let request = NormalizeRequest::new(
        content,
        ChordEdit {
            line_index: 0,
            char_index: 1,
            chord: None,
            language: "pl".to_string(),
        },
    );

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["line_index"], json!(0));
    assert_eq!(value["char_index"], json!(1));
    assert_eq!(value["chord"], serde_json::Value::Null);
    assert_eq!(value["language"], json!("pl"));
    assert_eq!(value["content"][0]["text"], json!("Hi"));
    assert_eq!(request.edit().chord, None);
}

#[test]
fn test_prepared_lyrics_without_language() {
    let prepared: PreparedLyrics = serde_json::from_value(json!({
        "content": [{ "text": "La la", "chords": {} }]
    }))
    .unwrap();

    assert_eq!(prepared.language, None);
    assert_eq!(prepared.content.lyrics(), "La la");
}
