// this_file: tests/streaming_parser_test.rs

use std::io::Cursor;
use streamjson::{
    basic_parse, items, parse, Error, EventKind, Number, ObjectBuilder, ParserOptions, Value,
};

fn src(text: &str) -> Cursor<Vec<u8>> {
    Cursor::new(text.as_bytes().to_vec())
}

#[test]
fn mixed_type_document_reports_expected_paths_and_kinds() {
    let doc = r#"{
        "meta": {"version": 1, "ok": true},
        "docs": [
            {"id": 1, "tags": ["a", "b"]},
            {"id": 2, "tags": []}
        ],
        "note": null
    }"#;

    let events: Vec<_> = parse(src(doc)).collect::<Result<Vec<_>, _>>().unwrap();

    let version = events
        .iter()
        .find(|e| e.prefix == "meta.version")
        .expect("meta.version present");
    assert_eq!(version.kind, EventKind::Number);

    let first_tag = events
        .iter()
        .find(|e| e.prefix == "docs.item.tags.item" && e.value.as_text() == Some("a"));
    assert!(first_tag.is_some());

    let note = events.iter().find(|e| e.prefix == "note").unwrap();
    assert_eq!(note.kind, EventKind::Null);
}

#[test]
fn items_extracts_nested_subtrees_as_values() {
    let doc = r#"{"meta": {"count": 2}, "docs": [{"id": 1}, {"id": 2}]}"#;

    let docs: Vec<Value> = items(parse(src(doc)), "docs.item")
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(
        docs[0].as_object().unwrap().get("id"),
        Some(&Value::Number(Number::Integer(1)))
    );
    assert_eq!(
        docs[1].as_object().unwrap().get("id"),
        Some(&Value::Number(Number::Integer(2)))
    );

    let counts: Vec<Value> = items(parse(src(doc)), "meta.count")
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(counts, vec![Value::Number(Number::Integer(2))]);
}

#[test]
fn string_escapes_round_trip_through_the_whole_pipeline() {
    let doc = r#"["line\nbreak", "quote\"mark", "unicodeс", "surrogate😀"]"#;

    let mut builder = ObjectBuilder::new();
    for event in basic_parse(src(doc)) {
        builder.event(&event.unwrap());
    }
    let value = builder.into_value().unwrap();
    let arr = value.as_array().unwrap();

    assert_eq!(arr[0].as_str(), Some("line\nbreak"));
    assert_eq!(arr[1].as_str(), Some("quote\"mark"));
    assert_eq!(arr[2].as_str(), Some("unicodeс"));
    assert_eq!(arr[3].as_str(), Some("surrogate\u{1F600}"));
}

#[test]
fn scalar_top_level_documents_parse_without_a_container() {
    for (text, expect_number) in [("42", Some(42)), ("-7", Some(-7))] {
        let mut builder = ObjectBuilder::new();
        for event in basic_parse(src(text)) {
            builder.event(&event.unwrap());
        }
        let value = builder.into_value().unwrap();
        assert_eq!(value.as_number().and_then(Number::as_i64), expect_number);
    }

    let mut builder = ObjectBuilder::new();
    for event in basic_parse(src("true")) {
        builder.event(&event.unwrap());
    }
    assert_eq!(builder.into_value(), Some(Value::Bool(true)));
}

#[test]
fn trailing_comma_is_reported_as_malformed() {
    let err = basic_parse(src(r#"{"a": 1,}"#))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    assert!(err.is_malformed());
    assert!(err.offset().is_some());
}

#[test]
fn truncated_string_is_reported_as_incomplete() {
    let err = basic_parse(src(r#"{"a": "oops"#))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    assert!(err.is_incomplete());
}

#[test]
fn trailing_data_after_a_complete_document_is_malformed() {
    let err = basic_parse(src("1 2")).collect::<Result<Vec<_>, _>>().unwrap_err();
    assert!(matches!(err, Error::Malformed { .. }));
}

#[test]
fn multiple_values_option_parses_a_sequence_of_top_level_documents() {
    let opts = ParserOptions::new().with_multiple_values(true);
    let events =
        streamjson::basic_parse_with_options(src("1 2 3"), opts).collect::<Result<Vec<_>, _>>();
    assert_eq!(events.unwrap().len(), 3);
}

#[test]
fn identical_source_parses_identically_across_threads() {
    let doc: &'static str = r#"{"a": [1, 2, {"b": "c"}], "d": null}"#;

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || parse(src(doc)).collect::<Result<Vec<_>, _>>().unwrap()))
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for pair in results.windows(2) {
        assert_eq!(pair[0], pair[1]);
    }
}
