//! Decoding, round trips, strict/lenient behavior, path expansion, and
//! the serde bridge.

use toon_codec::{
    decode, decode_from_lines, decode_with_options, encode, encode_with_options, normalize, toon,
    DecodeOptions, EncodeOptions, Error, KeyFolding, Map, Number, PathExpansion, Value,
};

#[test]
fn test_decode_primitives() {
    assert_eq!(decode("null").unwrap(), Value::Null);
    assert_eq!(decode("true").unwrap(), Value::Bool(true));
    assert_eq!(decode("false").unwrap(), Value::Bool(false));
    assert_eq!(decode("42").unwrap(), Value::from(42));
    assert_eq!(decode("-3.5").unwrap(), Value::from(-3.5));
    assert_eq!(decode("hello").unwrap(), Value::from("hello"));
    assert_eq!(decode("\"42\"").unwrap(), Value::from("42"));
}

#[test]
fn test_decode_simple_object() {
    let value = decode("name: Alice\nage: 30\nactive: true").unwrap();
    assert_eq!(
        value,
        toon!({ "name": "Alice", "age": 30, "active": true })
    );
}

#[test]
fn test_decode_preserves_key_order() {
    let value = decode("zebra: 1\napple: 2\nmango: 3").unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_decode_nested_objects() {
    let value = decode("user:\n  name: Alice\n  meta:\n    ok: true").unwrap();
    assert_eq!(
        value,
        toon!({ "user": { "name": "Alice", "meta": { "ok": true } } })
    );
}

#[test]
fn test_decode_empty_nested_object() {
    let value = decode("meta:\nnext: 1").unwrap();
    assert_eq!(value, toon!({ "meta": {}, "next": 1 }));

    let value = decode("meta:").unwrap();
    assert_eq!(value, toon!({ "meta": {} }));
}

#[test]
fn test_decode_inline_array() {
    let value = decode("tags[3]: reading,gaming,coding").unwrap();
    assert_eq!(value, toon!({ "tags": ["reading", "gaming", "coding"] }));
}

#[test]
fn test_decode_tabular_array() {
    let value = decode("users[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user").unwrap();
    assert_eq!(
        value,
        toon!({
            "users": [
                { "id": 1, "name": "Alice", "role": "admin" },
                { "id": 2, "name": "Bob", "role": "user" }
            ]
        })
    );
}

#[test]
fn test_decode_list_array() {
    // Spec scenario: dash-prefixed entries.
    let value = decode("items[2]:\n  - Apple\n  - Banana").unwrap();
    assert_eq!(value, toon!({ "items": ["Apple", "Banana"] }));
}

#[test]
fn test_decode_list_of_objects() {
    let value = decode("items[2]:\n  - name: Alice\n    role: admin\n  - name: Bob\n    role: user")
        .unwrap();
    assert_eq!(
        value,
        toon!({
            "items": [
                { "name": "Alice", "role": "admin" },
                { "name": "Bob", "role": "user" }
            ]
        })
    );
}

#[test]
fn test_decode_empty_array() {
    assert_eq!(decode("items[0]:").unwrap(), toon!({ "items": [] }));
    assert_eq!(decode("[0]:").unwrap(), toon!([]));
}

#[test]
fn test_decode_root_array() {
    assert_eq!(decode("[3]: 1,2,3").unwrap(), toon!([1, 2, 3]));
    assert_eq!(
        decode("[2]:\n  - a\n  - b").unwrap(),
        toon!(["a", "b"])
    );
}

#[test]
fn test_decode_empty_input_is_empty_object() {
    assert_eq!(decode("").unwrap(), Value::Object(Map::new()));
}

#[test]
fn test_decode_quoted_strings() {
    let value = decode("tags[3]: \"true\",\"42\",\"-3.5\"").unwrap();
    assert_eq!(value, toon!({ "tags": ["true", "42", "-3.5"] }));
}

#[test]
fn test_decode_number_forms() {
    let value = decode("a: 0\nb: -5\nc: 3.25\nd: 1e3\ne: 007\nf: 1e999").unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("a"), Some(&Value::Number(Number::Integer(0))));
    assert_eq!(obj.get("b"), Some(&Value::Number(Number::Integer(-5))));
    assert_eq!(obj.get("c"), Some(&Value::Number(Number::Float(3.25))));
    assert_eq!(obj.get("d"), Some(&Value::Number(Number::Float(1000.0))));
    // Leading zeros and overflowing exponents fall back to strings.
    assert_eq!(obj.get("e"), Some(&Value::from("007")));
    assert_eq!(obj.get("f"), Some(&Value::from("1e999")));
}

#[test]
fn test_strict_length_mismatch() {
    // Spec scenario 4.
    let err = decode("items[2]:\n  - Apple").unwrap_err();
    assert_eq!(
        err,
        Error::LengthMismatch {
            line: 1,
            declared: 2,
            found: 1,
        }
    );

    let options = DecodeOptions::new().with_strict(false);
    let value = decode_with_options("items[2]:\n  - Apple", &options).unwrap();
    assert_eq!(value, toon!({ "items": ["Apple"] }));
}

#[test]
fn test_strict_inline_length_mismatch() {
    assert!(matches!(
        decode("items[3]: a,b"),
        Err(Error::LengthMismatch { .. })
    ));

    let options = DecodeOptions::new().with_strict(false);
    let value = decode_with_options("items[3]: a,b", &options).unwrap();
    assert_eq!(value, toon!({ "items": ["a", "b"] }));
}

#[test]
fn test_strict_tabular_row_count() {
    let input = "users[3]{id,name}:\n  1,Alice\n  2,Bob";
    let err = decode(input).unwrap_err();
    assert_eq!(
        err,
        Error::LengthMismatch {
            line: 1,
            declared: 3,
            found: 2,
        }
    );
}

#[test]
fn test_strict_delimiter_mismatch() {
    let input = "rows[2]{a,b}:\n  1,2\n  3|4";
    assert!(matches!(
        decode(input),
        Err(Error::DelimiterMismatch {
            line: 3,
            expected: ',',
            found: '|',
        })
    ));

    let options = DecodeOptions::new().with_strict(false);
    let value = decode_with_options(input, &options).unwrap();
    assert_eq!(
        value,
        toon!({ "rows": [{ "a": 1, "b": 2 }, { "a": 3, "b": 4 }] })
    );
}

#[test]
fn test_indentation_errors_are_fatal_in_both_modes() {
    let input = "user:\n   name: x";
    assert!(matches!(decode(input), Err(Error::Indentation { .. })));

    let options = DecodeOptions::new().with_strict(false);
    assert!(matches!(
        decode_with_options(input, &options),
        Err(Error::Indentation { .. })
    ));
}

#[test]
fn test_tab_indentation_rejected() {
    assert!(matches!(
        decode("user:\n\tname: x"),
        Err(Error::Indentation { .. })
    ));
}

#[test]
fn test_lexical_errors_are_fatal_in_both_modes() {
    let lenient = DecodeOptions::new().with_strict(false);

    assert!(matches!(
        decode("a: \"unclosed"),
        Err(Error::UnterminatedString { .. })
    ));
    assert!(matches!(
        decode_with_options("a: \"unclosed", &lenient),
        Err(Error::UnterminatedString { .. })
    ));

    assert!(matches!(
        decode("a: \"bad\\x41\""),
        Err(Error::BadEscape { .. })
    ));
    assert!(matches!(
        decode_with_options("a: \"bad\\x41\"", &lenient),
        Err(Error::BadEscape { .. })
    ));

    assert!(matches!(
        decode("items[abc]: 1"),
        Err(Error::MalformedHeader { .. })
    ));
    assert!(matches!(
        decode_with_options("items[abc]: 1", &lenient),
        Err(Error::MalformedHeader { .. })
    ));
}

#[test]
fn test_decode_solidus_escape() {
    // `\/` is accepted on decode but never emitted.
    let value = decode("path: \"a\\/b\"").unwrap();
    assert_eq!(value, toon!({ "path": "a/b" }));
    assert_eq!(encode(&value), "path: a/b");
}

#[test]
fn test_path_expansion_round_trip() {
    // Spec scenario 3.
    let original = toon!({ "data": { "metadata": { "items": ["a", "b"] } } });
    let eopts = EncodeOptions::new().with_key_folding(KeyFolding::Safe);
    let text = encode_with_options(&original, &eopts);
    assert_eq!(text, "data.metadata.items[2]: a,b");

    let dopts = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    assert_eq!(decode_with_options(&text, &dopts).unwrap(), original);
}

#[test]
fn test_expansion_conflict() {
    // Spec scenario 5.
    let input = "a.b: 1\na: 2";
    let strict = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    let err = decode_with_options(input, &strict).unwrap_err();
    assert!(matches!(err, Error::ExpansionConflict { .. }));
    assert!(err.to_string().contains("expansion conflict at path a"));

    let lenient = strict.with_strict(false);
    let value = decode_with_options(input, &lenient).unwrap();
    assert_eq!(value, toon!({ "a": 2 }));
}

#[test]
fn test_expansion_off_keeps_dotted_keys() {
    let value = decode("a.b: 1").unwrap();
    assert_eq!(value, toon!({ "a.b": 1 }));
}

#[test]
fn test_spec_example_round_trip() {
    // Spec scenario 1.
    let value = toon!({
        "items": [
            { "sku": "A1", "qty": 2, "price": 9.99 },
            { "sku": "B2", "qty": 1, "price": 14.5 }
        ]
    });
    let text = encode(&value);
    assert_eq!(text, "items[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5");
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_deep_structure_round_trip() {
    let value = toon!({
        "order": {
            "id": 12345,
            "customer": {
                "name": "Alice",
                "tags": ["vip"]
            },
            "items": [
                { "sku": "WIDGET-001", "price": 29.99, "qty": 2 },
                { "sku": "GADGET-002", "price": 49.99, "qty": 1 }
            ],
            "notes": [
                "plain note",
                { "author": "Bob", "text": "ship fast, please" }
            ]
        },
        "total": 109.97
    });

    let text = encode(&value);
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_round_trip_special_strings() {
    let strings = [
        "",
        "hello, world",
        "line1\nline2",
        "tab\there",
        "pipe|here",
        " leading space",
        "trailing space ",
        "true",
        "false",
        "null",
        "123",
        "3.5",
        "1e10",
        "\"quoted\"",
        "- looks like a list entry",
        "-dash",
        "a:b",
        "[5]",
        "{x}",
        "emoji 🎉 ok",
        "ends with emoji 🎉",
    ];

    for s in strings {
        let value = toon!({ "s": s });
        let text = encode(&value);
        assert_eq!(decode(&text).unwrap(), value, "string {:?}", s);
    }
}

#[test]
fn test_round_trip_integer_flag() {
    // An integer literal must not become a float on re-encode.
    let value = decode("n: 1").unwrap();
    assert_eq!(encode(&value), "n: 1");

    let value = decode("n: 1.5").unwrap();
    assert_eq!(encode(&value), "n: 1.5");
}

#[test]
fn test_decode_from_lines_matches_decode() {
    let text = "a: 1\nitems[2]:\n  - x\n  - y";
    let via_text = decode(text).unwrap();
    let via_lines =
        decode_from_lines(text.split('\n'), &DecodeOptions::new()).unwrap();
    assert_eq!(via_text, via_lines);
}

#[test]
fn test_normalized_inputs_round_trip() {
    let value = toon!({
        "nan": f64::NAN,
        "whole": 7.0,
        "neg_zero": -0.0
    });
    let text = encode(&value);
    assert_eq!(decode(&text).unwrap(), normalize(value));
}

#[test]
fn test_serde_bridge() {
    let value = toon!({
        "name": "Alice",
        "age": 30,
        "scores": [1, 2.5, null, true]
    });

    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "Alice",
            "age": 30,
            "scores": [1, 2.5, null, true]
        })
    );

    let back: Value = serde_json::from_value(json).unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_quoted_keys() {
    let value = decode("\"a:b\": 1\n\"\": 2").unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("a:b"), Some(&Value::from(1)));
    assert_eq!(obj.get(""), Some(&Value::from(2)));

    // Keys needing quotes survive a round trip.
    let text = encode(&value);
    assert_eq!(decode(&text).unwrap(), value);
}

#[test]
fn test_multiple_root_values_rejected() {
    assert!(matches!(
        decode("42\n43"),
        Err(Error::MalformedHeader { .. })
    ));
}

#[test]
fn test_missing_colon_in_object() {
    assert!(matches!(
        decode("a: 1\njust words"),
        Err(Error::MalformedHeader { .. })
    ));
}
