//! Byte-exact encoding checks for the three array forms, quoting, and
//! key folding.

use toon_codec::{
    encode, encode_with_options, toon, Delimiter, EncodeOptions, KeyFolding, Map, Value,
};

#[test]
fn test_tabular_array_format() {
    let value = toon!({
        "users": [
            { "id": 1, "name": "Alice", "role": "admin" },
            { "id": 2, "name": "Bob", "role": "user" }
        ]
    });

    assert_eq!(
        encode(&value),
        "users[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user"
    );
}

#[test]
fn test_field_order_follows_first_row() {
    let value = toon!({
        "rows": [
            { "zebra": 1, "apple": 2 },
            { "zebra": 3, "apple": 4 }
        ]
    });

    // Fields keep the first row's insertion order, not alphabetical order.
    assert_eq!(encode(&value), "rows[2]{zebra,apple}:\n  1,2\n  3,4");
}

#[test]
fn test_inline_primitive_array() {
    let value = toon!({ "tags": ["admin", "developer", "ops"] });
    assert_eq!(encode(&value), "tags[3]: admin,developer,ops");
}

#[test]
fn test_mixed_array_list_format() {
    let value = toon!({ "mixed": [1, { "name": "Alice", "age": 30 }, "text"] });
    assert_eq!(
        encode(&value),
        "mixed[3]:\n  - 1\n  - name: Alice\n    age: 30\n  - text"
    );
}

#[test]
fn test_empty_array() {
    let value = toon!({ "items": [] });
    assert_eq!(encode(&value), "items[0]:");

    let root: Value = toon!([]);
    assert_eq!(encode(&root), "[0]:");
}

#[test]
fn test_empty_object_forms() {
    assert_eq!(encode(&Value::Object(Map::new())), "");
    assert_eq!(encode(&toon!({ "meta": {} })), "meta:");
}

#[test]
fn test_root_primitive() {
    assert_eq!(encode(&Value::from(42)), "42");
    assert_eq!(encode(&Value::from("hello world")), "hello world");
    assert_eq!(encode(&Value::Null), "null");
}

#[test]
fn test_tab_delimiter() {
    let value = toon!({
        "items": [
            { "sku": "A1", "qty": 2 },
            { "sku": "B2", "qty": 1 }
        ]
    });

    let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
    assert_eq!(
        encode_with_options(&value, &options),
        "items[2]{sku\tqty}:\n  A1\t2\n  B2\t1"
    );
}

#[test]
fn test_pipe_delimiter() {
    let value = toon!({
        "items": [
            { "sku": "A1", "qty": 2 },
            { "sku": "B2", "qty": 1 }
        ]
    });

    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    assert_eq!(
        encode_with_options(&value, &options),
        "items[2]{sku|qty}:\n  A1|2\n  B2|1"
    );
}

#[test]
fn test_quoting_rules() {
    let value = toon!({
        "normal": "hello world",
        "with_comma": "hello,world",
        "with_spaces": " padded ",
        "boolean_like": "true",
        "number_like": "123",
        "empty": "",
        "with_colon": "a:b",
        "dash_start": "- item"
    });

    let text = encode(&value);
    assert!(text.contains("normal: hello world"));
    assert!(text.contains("with_comma: \"hello,world\""));
    assert!(text.contains("with_spaces: \" padded \""));
    assert!(text.contains("boolean_like: \"true\""));
    assert!(text.contains("number_like: \"123\""));
    assert!(text.contains("empty: \"\""));
    assert!(text.contains("with_colon: \"a:b\""));
    assert!(text.contains("dash_start: \"- item\""));
}

#[test]
fn test_escape_sequences() {
    let value = toon!({ "text": "line1\nline2\ttab \"quote\" back\\slash" });
    assert_eq!(
        encode(&value),
        r#"text: "line1\nline2\ttab \"quote\" back\\slash""#
    );
}

#[test]
fn test_control_characters_use_unicode_escapes() {
    let value = toon!({ "ctl": "a\u{0001}b" });
    assert_eq!(encode(&value), "ctl: \"a\\u0001b\"");
}

#[test]
fn test_number_canonicalization() {
    let value = toon!({
        "int": 42,
        "neg": -7,
        "float": 9.99,
        "whole": 14.0,
        "tiny": 0.0000001,
        "nan": f64::NAN,
        "inf": f64::INFINITY
    });

    assert_eq!(
        encode(&value),
        "int: 42\nneg: -7\nfloat: 9.99\nwhole: 14\ntiny: 0.0000001\nnan: null\ninf: null"
    );
}

#[test]
fn test_large_floats_stay_positional() {
    let value = toon!({ "big": 1e21 });
    assert_eq!(encode(&value), "big: 1000000000000000000000");
}

#[test]
fn test_key_folding() {
    let value = toon!({ "data": { "metadata": { "items": ["a", "b"] } } });
    let options = EncodeOptions::new().with_key_folding(KeyFolding::Safe);
    assert_eq!(
        encode_with_options(&value, &options),
        "data.metadata.items[2]: a,b"
    );
}

#[test]
fn test_key_folding_off_by_default() {
    let value = toon!({ "data": { "metadata": { "ok": true } } });
    assert_eq!(encode(&value), "data:\n  metadata:\n    ok: true");
}

#[test]
fn test_folding_quotes_literal_dotted_keys() {
    let value = toon!({ "a.b": 1, "c": { "d": 2 } });
    let options = EncodeOptions::new().with_key_folding(KeyFolding::Safe);
    assert_eq!(
        encode_with_options(&value, &options),
        "\"a.b\": 1\nc.d: 2"
    );
}

#[test]
fn test_indent_width() {
    let value = toon!({ "outer": { "inner": { "leaf": 1 } } });
    let options = EncodeOptions::new().with_indent(4);
    assert_eq!(
        encode_with_options(&value, &options),
        "outer:\n    inner:\n        leaf: 1"
    );
}

#[test]
fn test_no_trailing_newline() {
    let value = toon!({ "a": 1, "b": 2 });
    let text = encode(&value);
    assert!(!text.ends_with('\n'));
    assert_eq!(text, "a: 1\nb: 2");
}
