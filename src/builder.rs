//! Materializing an event stream into a value tree.
//!
//! The builder replays [`Event`]s against a frame stack. Path expansion —
//! the decode-time inverse of key folding — runs as each object frame
//! closes, so nested objects are already expanded when their parents
//! finish, and only unquoted keys are ever split at dots.

use crate::event::Event;
use crate::options::PathExpansion;
use crate::{Error, Map, Result, Value};

/// Builds a value from an event stream, without path expansion.
///
/// This is the bridge between the streaming interface and the tree
/// interface: feeding it the events of [`crate::decode_stream_sync`]
/// produces exactly what [`crate::decode_from_lines`] returns when
/// expansion is off.
///
/// # Errors
///
/// Fails with [`Error::IncompleteStream`] when the events end mid-value,
/// and propagates any error items from the stream.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{build_value_from_events, decode_stream_sync, toon, DecodeOptions};
///
/// let events = decode_stream_sync(["a: 1"], &DecodeOptions::new()).unwrap();
/// let value = build_value_from_events(events).unwrap();
/// assert_eq!(value, toon!({ "a": 1 }));
/// ```
pub fn build_value_from_events<I>(events: I) -> Result<Value>
where
    I: IntoIterator<Item = Result<Event>>,
{
    Builder::new(PathExpansion::Off, true).run(events)
}

pub(crate) struct Builder {
    expand: PathExpansion,
    strict: bool,
    stack: Vec<Frame>,
    root: Option<Value>,
}

enum Frame {
    Object {
        entries: Vec<(String, bool, Value)>,
        // The key awaiting its value; per frame, so a nested object's
        // keys never collide with its parent's.
        pending: Option<(String, bool)>,
    },
    Array(Vec<Value>),
}

impl Builder {
    pub(crate) fn new(expand: PathExpansion, strict: bool) -> Self {
        Builder {
            expand,
            strict,
            stack: Vec::new(),
            root: None,
        }
    }

    pub(crate) fn run<I>(mut self, events: I) -> Result<Value>
    where
        I: IntoIterator<Item = Result<Event>>,
    {
        for event in events {
            self.step(event?)?;
        }
        self.finish()
    }

    fn step(&mut self, event: Event) -> Result<()> {
        match event {
            Event::StartObject => {
                self.stack.push(Frame::Object {
                    entries: Vec::new(),
                    pending: None,
                });
                Ok(())
            }
            Event::StartArray { length } => {
                self.stack.push(Frame::Array(Vec::with_capacity(length)));
                Ok(())
            }
            Event::Key { key, was_quoted } => match self.stack.last_mut() {
                Some(Frame::Object { pending, .. }) => {
                    if pending.is_some() {
                        return Err(Error::incomplete_stream("key without a following value"));
                    }
                    *pending = Some((key, was_quoted));
                    Ok(())
                }
                _ => Err(Error::custom("key event outside an object")),
            },
            Event::Primitive { value } => self.attach(value),
            Event::EndObject => {
                let (entries, pending) = match self.stack.pop() {
                    Some(Frame::Object { entries, pending }) => (entries, pending),
                    _ => return Err(Error::custom("end of object without a start")),
                };
                if pending.is_some() {
                    return Err(Error::incomplete_stream("key without a following value"));
                }
                let map = match self.expand {
                    PathExpansion::Off => {
                        let mut map = Map::new();
                        for (key, _, value) in entries {
                            map.insert(key, value);
                        }
                        map
                    }
                    PathExpansion::Safe => expand_entries(entries, self.strict)?,
                };
                self.attach(Value::Object(map))
            }
            Event::EndArray => {
                let items = match self.stack.pop() {
                    Some(Frame::Array(items)) => items,
                    _ => return Err(Error::custom("end of array without a start")),
                };
                self.attach(Value::Array(items))
            }
        }
    }

    /// Attaches a completed value to the enclosing frame, or sets it as
    /// the root when the stack is empty.
    fn attach(&mut self, value: Value) -> Result<()> {
        match self.stack.last_mut() {
            Some(Frame::Object { entries, pending }) => {
                let (key, was_quoted) = pending
                    .take()
                    .ok_or_else(|| Error::custom("value without a preceding key"))?;
                entries.push((key, was_quoted, value));
                Ok(())
            }
            Some(Frame::Array(items)) => {
                items.push(value);
                Ok(())
            }
            None => {
                if self.root.is_some() {
                    return Err(Error::custom("multiple root values in event stream"));
                }
                self.root = Some(value);
                Ok(())
            }
        }
    }

    fn finish(self) -> Result<Value> {
        if !self.stack.is_empty() {
            return Err(Error::incomplete_stream("input ended inside a value"));
        }
        self.root
            .ok_or_else(|| Error::incomplete_stream("no value in event stream"))
    }
}

/// Folds an object's entries into a map, splitting unquoted dotted keys
/// into nested objects.
fn expand_entries(entries: Vec<(String, bool, Value)>, strict: bool) -> Result<Map> {
    let mut map = Map::new();
    for (key, was_quoted, value) in entries {
        if !was_quoted && is_expandable(&key) {
            let segments: Vec<&str> = key.split('.').collect();
            insert_path(&mut map, &segments, value, strict, &key)?;
        } else {
            merge_into(&mut map, key, value, strict)?;
        }
    }
    Ok(map)
}

/// A key is only split when every dotted segment is non-empty; `"a..b"`,
/// `".a"` and `"a."` stay literal keys.
fn is_expandable(key: &str) -> bool {
    key.contains('.') && key.split('.').all(|segment| !segment.is_empty())
}

fn insert_path(
    map: &mut Map,
    segments: &[&str],
    value: Value,
    strict: bool,
    full_path: &str,
) -> Result<()> {
    let (head, tail) = segments.split_first().expect("non-empty path");
    if tail.is_empty() {
        return merge_into(map, (*head).to_string(), value, strict);
    }
    if !map.contains_key(head) {
        map.insert((*head).to_string(), Value::Object(Map::new()));
    }
    let slot = map.get_mut(head).expect("just inserted");
    match slot {
        Value::Object(child) => insert_path(child, tail, value, strict, full_path),
        other => {
            if strict {
                return Err(Error::expansion_conflict(full_path, other.kind_name()));
            }
            let mut child = Map::new();
            insert_path(&mut child, tail, value, strict, full_path)?;
            *other = Value::Object(child);
            Ok(())
        }
    }
}

/// Merges a finished value into a map slot, applying the conflict rules:
/// object-with-object merges recursively, mixed kinds conflict in strict
/// mode, and anything else is last-write-wins.
fn merge_into(map: &mut Map, key: String, value: Value, strict: bool) -> Result<()> {
    if !map.contains_key(&key) {
        map.insert(key, value);
        return Ok(());
    }
    let slot = map.get_mut(&key).expect("present");
    let existing = std::mem::take(slot);
    *slot = merge_values(existing, value, strict, &key)?;
    Ok(())
}

fn merge_values(existing: Value, incoming: Value, strict: bool, path: &str) -> Result<Value> {
    match (existing, incoming) {
        (Value::Object(mut a), Value::Object(b)) => {
            for (k, v) in b {
                merge_into(&mut a, k, v, strict)?;
            }
            Ok(Value::Object(a))
        }
        (Value::Object(_), incoming) => {
            if strict {
                Err(Error::expansion_conflict(path, incoming.kind_name()))
            } else {
                Ok(incoming)
            }
        }
        (existing, incoming @ Value::Object(_)) => {
            if strict {
                Err(Error::expansion_conflict(path, existing.kind_name()))
            } else {
                Ok(incoming)
            }
        }
        (_, incoming) => Ok(incoming),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{toon, DecodeOptions};

    fn build(lines: &[&str], expand: PathExpansion, strict: bool) -> Result<Value> {
        let options = DecodeOptions::new().with_strict(strict);
        let events = crate::decode_stream_sync(lines.iter(), &options)?;
        Builder::new(expand, strict).run(events)
    }

    #[test]
    fn builds_objects_and_arrays() {
        let value = build(
            &["name: Alice", "tags[2]: a,b"],
            PathExpansion::Off,
            true,
        )
        .unwrap();
        assert_eq!(value, toon!({ "name": "Alice", "tags": ["a", "b"] }));
    }

    #[test]
    fn expansion_restores_folded_paths() {
        let value = build(
            &["data.metadata.items[2]: a,b"],
            PathExpansion::Safe,
            true,
        )
        .unwrap();
        assert_eq!(
            value,
            toon!({ "data": { "metadata": { "items": ["a", "b"] } } })
        );
    }

    #[test]
    fn expansion_merges_sibling_paths() {
        let value = build(
            &["a.b: 1", "a.c: 2"],
            PathExpansion::Safe,
            true,
        )
        .unwrap();
        assert_eq!(value, toon!({ "a": { "b": 1, "c": 2 } }));
    }

    #[test]
    fn quoted_keys_are_never_split() {
        let value = build(&["\"a.b\": 1"], PathExpansion::Safe, true).unwrap();
        assert_eq!(value, toon!({ "a.b": 1 }));
    }

    #[test]
    fn malformed_dotted_keys_stay_literal() {
        let value = build(&["\"a..b\": 1"], PathExpansion::Safe, true).unwrap();
        assert_eq!(value, toon!({ "a..b": 1 }));
        assert!(is_expandable("a.b"));
        assert!(!is_expandable("a..b"));
        assert!(!is_expandable(".a"));
        assert!(!is_expandable("a."));
        assert!(!is_expandable("plain"));
    }

    #[test]
    fn strict_conflict_object_vs_primitive() {
        let err = build(&["a.b: 1", "a: 2"], PathExpansion::Safe, true).unwrap_err();
        assert_eq!(
            err,
            Error::ExpansionConflict {
                path: "a".to_string(),
                kind: "number",
            }
        );
    }

    #[test]
    fn lenient_conflict_is_last_write_wins() {
        let value = build(&["a.b: 1", "a: 2"], PathExpansion::Safe, false).unwrap();
        assert_eq!(value, toon!({ "a": 2 }));
    }

    #[test]
    fn lenient_conflict_other_direction() {
        let value = build(&["a: 2", "a.b: 1"], PathExpansion::Safe, false).unwrap();
        assert_eq!(value, toon!({ "a": { "b": 1 } }));
    }

    #[test]
    fn expansion_applies_inside_arrays() {
        let value = build(
            &["items[1]:", "  - a.b: 1"],
            PathExpansion::Safe,
            true,
        )
        .unwrap();
        assert_eq!(value, toon!({ "items": [{ "a": { "b": 1 } }] }));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let value = build(&["a: 1", "a: 2"], PathExpansion::Off, true).unwrap();
        assert_eq!(value, toon!({ "a": 2 }));
    }

    #[test]
    fn incomplete_streams_fail() {
        let events = vec![
            Ok(Event::StartObject),
            Ok(Event::Key {
                key: "a".to_string(),
                was_quoted: false,
            }),
        ];
        let err = build_value_from_events(events).unwrap_err();
        assert!(matches!(err, Error::IncompleteStream(_)));

        let events = vec![Ok(Event::StartArray { length: 1 })];
        let err = build_value_from_events(events).unwrap_err();
        assert!(matches!(err, Error::IncompleteStream(_)));
    }

    #[test]
    fn empty_event_stream_fails() {
        let err = build_value_from_events(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::IncompleteStream(_)));
    }
}
