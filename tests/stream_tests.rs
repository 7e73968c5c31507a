//! Event-stream behavior: exact sequences, sync/async agreement, and the
//! builder bridge.

use futures::executor::block_on;
use futures::{stream, StreamExt};
use toon_codec::{
    build_value_from_events, decode_from_lines, decode_stream, decode_stream_sync, toon,
    DecodeOptions, Error, Event, PathExpansion, Value,
};

fn key(name: &str) -> Event {
    Event::Key {
        key: name.to_string(),
        was_quoted: false,
    }
}

fn prim(value: impl Into<Value>) -> Event {
    Event::Primitive {
        value: value.into(),
    }
}

fn sync_events(lines: &[&str]) -> Vec<Result<Event, Error>> {
    decode_stream_sync(lines.iter(), &DecodeOptions::new())
        .unwrap()
        .collect()
}

fn async_events(lines: &[&str]) -> Vec<Result<Event, Error>> {
    let source = stream::iter(lines.iter().map(|l| l.to_string()).collect::<Vec<_>>());
    block_on(
        decode_stream(source, &DecodeOptions::new())
            .unwrap()
            .collect::<Vec<_>>(),
    )
}

#[test]
fn test_flat_object_event_sequence() {
    // Spec scenario 6.
    let events: Vec<Event> = decode_stream_sync(["name: Alice", "age: 30"], &DecodeOptions::new())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        events,
        vec![
            Event::StartObject,
            key("name"),
            prim("Alice"),
            key("age"),
            prim(30),
            Event::EndObject,
        ]
    );
}

#[test]
fn test_array_event_sequence() {
    let events: Vec<Event> =
        decode_stream_sync(["items[2]:", "  - Apple", "  - Banana"], &DecodeOptions::new())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

    assert_eq!(
        events,
        vec![
            Event::StartObject,
            key("items"),
            Event::StartArray { length: 2 },
            prim("Apple"),
            prim("Banana"),
            Event::EndArray,
            Event::EndObject,
        ]
    );
}

#[test]
fn test_tabular_rows_emit_objects() {
    let events: Vec<Event> = decode_stream_sync(
        ["users[1]{id,name}:", "  1,Alice"],
        &DecodeOptions::new(),
    )
    .unwrap()
    .collect::<Result<_, _>>()
    .unwrap();

    assert_eq!(
        events,
        vec![
            Event::StartObject,
            key("users"),
            Event::StartArray { length: 1 },
            Event::StartObject,
            key("id"),
            prim(1),
            key("name"),
            prim("Alice"),
            Event::EndObject,
            Event::EndArray,
            Event::EndObject,
        ]
    );
}

#[test]
fn test_sync_and_async_streams_agree() {
    let inputs: Vec<Vec<&str>> = vec![
        vec![],
        vec!["42"],
        vec!["[0]:"],
        vec!["name: Alice", "age: 30"],
        vec!["users[2]{id,name}:", "  1,Alice", "  2,Bob"],
        vec!["items[3]:", "  - 1", "  - [2]: a,b", "  - name: x", "    role: y"],
        vec!["deep:", "  deeper:", "    leaf: true"],
        vec!["items[2]:", "  - Apple"], // errors must agree too
        vec!["a: \"unterminated"],
    ];

    for lines in inputs {
        assert_eq!(sync_events(&lines), async_events(&lines), "{:?}", lines);
    }
}

#[test]
fn test_stream_halts_at_failure_point() {
    let events = sync_events(&["a: 1", "b: \"bad\\q\"", "c: 3"]);

    // Everything before the failure is delivered, then the error, then
    // nothing.
    assert_eq!(events[0], Ok(Event::StartObject));
    assert_eq!(events[1], Ok(key("a")));
    assert_eq!(events[2], Ok(prim(1)));
    assert_eq!(events[3], Ok(key("b")));
    assert!(matches!(events[4], Err(Error::BadEscape { .. })));
    assert_eq!(events.len(), 5);
}

#[test]
fn test_streaming_rejects_expand_paths() {
    let options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);

    let lines: Vec<&str> = vec![];
    assert!(matches!(
        decode_stream_sync(lines, &options),
        Err(Error::UnsupportedOption(_))
    ));

    let source = stream::iter(Vec::<String>::new());
    assert!(matches!(
        decode_stream(source, &options),
        Err(Error::UnsupportedOption(_))
    ));
}

#[test]
fn test_builder_matches_tree_decoder() {
    let inputs: Vec<Vec<&str>> = vec![
        vec!["a: 1"],
        vec!["users[2]{id,name}:", "  1,Alice", "  2,Bob"],
        vec!["items[2]:", "  - x", "  - y"],
        vec!["nested:", "  inner[1]:", "    - deep: true"],
    ];

    for lines in inputs {
        let options = DecodeOptions::new();
        let built =
            build_value_from_events(decode_stream_sync(lines.iter(), &options).unwrap()).unwrap();
        let decoded = decode_from_lines(lines.iter(), &options).unwrap();
        assert_eq!(built, decoded, "{:?}", lines);
    }
}

#[test]
fn test_async_builder_bridge() {
    let lines = vec!["users[1]{id,name}:".to_string(), "  1,Alice".to_string()];
    let events = block_on(
        decode_stream(stream::iter(lines), &DecodeOptions::new())
            .unwrap()
            .collect::<Vec<_>>(),
    );
    let value = build_value_from_events(events).unwrap();
    assert_eq!(
        value,
        toon!({ "users": [{ "id": 1, "name": "Alice" }] })
    );
}
