//! TOON encoding.
//!
//! The encoder walks a value and yields one output line per step. It picks
//! between the three array representations automatically:
//!
//! - **Inline**: every element is a primitive (`tags[3]: a,b,c`)
//! - **Tabular**: homogeneous objects with primitive leaves
//!   (`users[2]{id,name}:` followed by delimited rows)
//! - **List**: everything else, as dash-prefixed entries
//!
//! [`Lines`] is a pull-based iterator over a borrowed value: it holds a
//! frame stack instead of recursing, suspends after each emitted line, and
//! never allocates the full output. [`crate::encode`] joins it with LF.
//!
//! The §4.1 value substitutions (non-finite floats, dates, big integers)
//! are applied inline while formatting, so encoding never fails.

use crate::literal::{format_number, key_needs_quoting, needs_quoting, quoted};
use crate::normalize::{normalize_bigint, normalize_float};
use crate::options::KeyFolding;
use crate::{EncodeOptions, Number, Value};

use chrono::SecondsFormat;

/// Lazy line iterator produced by [`encode_lines`].
///
/// Yields each line of the encoded document without a terminator. The
/// caller owns the joined output; the iterator only borrows the value.
pub struct Lines<'a> {
    opts: EncodeOptions,
    root: Option<&'a Value>,
    stack: Vec<Frame<'a>>,
}

enum Frame<'a> {
    Object {
        iter: indexmap::map::Iter<'a, String, Value>,
        col: usize,
    },
    List {
        iter: std::slice::Iter<'a, Value>,
        col: usize,
    },
    Table {
        iter: std::slice::Iter<'a, Value>,
        fields: Vec<&'a str>,
        col: usize,
    },
}

/// Returns the lazy line sequence for a value.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode_lines, toon, EncodeOptions};
///
/// let value = toon!({ "name": "Alice", "tags": ["a", "b"] });
/// let lines: Vec<String> = encode_lines(&value, &EncodeOptions::new()).collect();
/// assert_eq!(lines, vec!["name: Alice", "tags[2]: a,b"]);
/// ```
pub fn encode_lines<'a>(value: &'a Value, options: &EncodeOptions) -> Lines<'a> {
    Lines {
        opts: options.clone(),
        root: Some(value),
        stack: Vec::new(),
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(root) = self.root.take() {
            match root {
                Value::Object(map) if map.is_empty() => return None,
                Value::Object(map) => {
                    self.stack.push(Frame::Object {
                        iter: map.iter(),
                        col: 0,
                    });
                }
                Value::Array(items) => {
                    let (text, frame) = self.array_text("", items, self.opts.indent);
                    if let Some(frame) = frame {
                        self.stack.push(frame);
                    }
                    return Some(text);
                }
                primitive => {
                    return Some(self.primitive_literal(primitive));
                }
            }
        }

        loop {
            let step = match self.stack.last_mut()? {
                Frame::Object { iter, col } => iter.next().map(|(k, v)| Step::Entry(k, v, *col)),
                Frame::List { iter, col } => iter.next().map(|v| Step::ListEntry(v, *col)),
                Frame::Table { iter, fields, col } => {
                    let col = *col;
                    iter.next().map(|v| Step::Row(v, fields.clone(), col))
                }
            };
            match step {
                None => {
                    self.stack.pop();
                }
                Some(Step::Entry(key, value, col)) => {
                    return Some(self.object_entry_line(key, value, col));
                }
                Some(Step::ListEntry(value, col)) => {
                    return Some(self.list_entry_line(value, col));
                }
                Some(Step::Row(value, fields, col)) => {
                    return Some(self.row_line(value, &fields, col));
                }
            }
        }
    }
}

enum Step<'a> {
    Entry(&'a str, &'a Value, usize),
    ListEntry(&'a Value, usize),
    Row(&'a Value, Vec<&'a str>, usize),
}

impl<'a> Lines<'a> {
    fn object_entry_line(&mut self, key: &'a str, value: &'a Value, col: usize) -> String {
        let (key_display, value) = self.fold_key(key, value);
        let (text, frame) = self.entry_text(&key_display, value, col + self.opts.indent);
        if let Some(frame) = frame {
            self.stack.push(frame);
        }
        format!("{}{}", " ".repeat(col), text)
    }

    fn list_entry_line(&mut self, value: &'a Value, col: usize) -> String {
        let pad = " ".repeat(col);
        match value {
            Value::Object(map) if map.is_empty() => format!("{}-", pad),
            Value::Object(map) => {
                let mut iter = map.iter();
                let (first_key, first_value) = iter.next().expect("non-empty object");
                // Remaining keys align under the first one, two columns
                // past the dash.
                self.stack.push(Frame::Object {
                    iter,
                    col: col + 2,
                });
                let (key_display, first_value) = self.fold_key(first_key, first_value);
                let (text, frame) =
                    self.entry_text(&key_display, first_value, col + 2 + self.opts.indent);
                if let Some(frame) = frame {
                    self.stack.push(frame);
                }
                format!("{}- {}", pad, text)
            }
            Value::Array(items) => {
                let (text, frame) = self.array_text("", items, col + self.opts.indent);
                if let Some(frame) = frame {
                    self.stack.push(frame);
                }
                format!("{}- {}", pad, text)
            }
            primitive => format!("{}- {}", pad, self.primitive_literal(primitive)),
        }
    }

    fn row_line(&self, value: &'a Value, fields: &[&'a str], col: usize) -> String {
        let delim = self.opts.delimiter.as_str();
        let map = match value {
            Value::Object(map) => map,
            // Unreachable by construction: the form selector only picks
            // tabular when every element is an object.
            _ => return format!("{}{}", " ".repeat(col), self.primitive_literal(value)),
        };
        let cells: Vec<String> = fields
            .iter()
            .map(|field| match map.get(field) {
                Some(v) => self.primitive_literal(v),
                None => "null".to_string(),
            })
            .collect();
        format!("{}{}", " ".repeat(col), cells.join(delim))
    }

    /// Renders one `key: value` entry without its leading padding, pushing
    /// no frames itself but returning the child frame to open, if any.
    fn entry_text(
        &self,
        key_display: &str,
        value: &'a Value,
        body_col: usize,
    ) -> (String, Option<Frame<'a>>) {
        match value {
            Value::Object(map) if map.is_empty() => (format!("{}:", key_display), None),
            Value::Object(map) => (
                format!("{}:", key_display),
                Some(Frame::Object {
                    iter: map.iter(),
                    col: body_col,
                }),
            ),
            Value::Array(items) => {
                let (text, frame) = self.array_text(key_display, items, body_col);
                (text, frame)
            }
            primitive => (
                format!("{}: {}", key_display, self.primitive_literal(primitive)),
                None,
            ),
        }
    }

    /// Renders an array header (and inline body when applicable) without
    /// padding. `key_display` is empty for keyless headers at the root and
    /// on dash lines.
    fn array_text(
        &self,
        key_display: &str,
        items: &'a [Value],
        body_col: usize,
    ) -> (String, Option<Frame<'a>>) {
        let delim = self.opts.delimiter.as_char();
        if items.is_empty() {
            return (format!("{}[0]:", key_display), None);
        }
        if items.iter().all(is_primitive) {
            let cells: Vec<String> = items.iter().map(|v| self.primitive_literal(v)).collect();
            return (
                format!(
                    "{}[{}]: {}",
                    key_display,
                    items.len(),
                    cells.join(self.opts.delimiter.as_str())
                ),
                None,
            );
        }
        if let Some(fields) = tabular_fields(items) {
            let folding = self.opts.key_folding == KeyFolding::Safe;
            let header_fields: Vec<String> = fields
                .iter()
                .map(|f| {
                    if key_needs_quoting(f, delim, folding) {
                        quoted(f)
                    } else {
                        (*f).to_string()
                    }
                })
                .collect();
            let text = format!(
                "{}[{}]{{{}}}:",
                key_display,
                items.len(),
                header_fields.join(self.opts.delimiter.as_str())
            );
            return (
                text,
                Some(Frame::Table {
                    iter: items.iter(),
                    fields,
                    col: body_col,
                }),
            );
        }
        (
            format!("{}[{}]:", key_display, items.len()),
            Some(Frame::List {
                iter: items.iter(),
                col: body_col,
            }),
        )
    }

    /// Collapses a chain of single-key objects into a dotted key, per the
    /// key-folding rules. Returns the display form of the key and the
    /// value the entry should carry.
    fn fold_key(&self, key: &'a str, value: &'a Value) -> (String, &'a Value) {
        let delim = self.opts.delimiter.as_char();
        let folding = self.opts.key_folding == KeyFolding::Safe;
        if !folding || self.opts.flatten_depth <= 1 || !segment_foldable(key, delim) {
            return (self.key_display(key), value);
        }

        let mut segments = vec![key];
        let mut current = value;
        while segments.len() < self.opts.flatten_depth {
            let Value::Object(map) = current else { break };
            if map.len() != 1 {
                break;
            }
            let (next_key, next_value) = map.iter().next().expect("single entry");
            if !segment_foldable(next_key, delim) {
                break;
            }
            segments.push(next_key);
            current = next_value;
        }

        if segments.len() == 1 {
            (self.key_display(key), value)
        } else {
            (segments.join("."), current)
        }
    }

    fn key_display(&self, key: &str) -> String {
        let folding = self.opts.key_folding == KeyFolding::Safe;
        if key_needs_quoting(key, self.opts.delimiter.as_char(), folding) {
            quoted(key)
        } else {
            key.to_string()
        }
    }

    /// Canonical literal for a primitive, applying the §4.1 substitutions
    /// inline (non-finite → null, date → ISO string, bigint → number or
    /// quoted decimal string).
    fn primitive_literal(&self, value: &Value) -> String {
        let delim = self.opts.delimiter.as_char();
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Value::Number(Number::Integer(i)) => i.to_string(),
            Value::Number(Number::Float(f)) => match normalize_float(*f) {
                Value::Number(n) => format_number(&n),
                _ => "null".to_string(),
            },
            Value::String(s) => self.string_literal(s, delim),
            Value::Date(dt) => {
                self.string_literal(&dt.to_rfc3339_opts(SecondsFormat::Millis, true), delim)
            }
            Value::BigInt(n) => match normalize_bigint(n) {
                Value::Number(n) => format_number(&n),
                Value::String(s) => self.string_literal(&s, delim),
                _ => "null".to_string(),
            },
            Value::Array(_) | Value::Object(_) => "null".to_string(),
        }
    }

    fn string_literal(&self, s: &str, delim: char) -> String {
        if needs_quoting(s, delim) {
            quoted(s)
        } else {
            s.to_string()
        }
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// A key may become a folded-path segment only when it would survive the
/// decoder's dot-splitting untouched: non-empty, dotless, and never in
/// need of quotes.
fn segment_foldable(segment: &str, delimiter: char) -> bool {
    !segment.is_empty() && !segment.contains('.') && !key_needs_quoting(segment, delimiter, true)
}

/// Tabular form applies when every element is a non-empty object, all
/// objects carry the same keys in the same order, and every leaf is a
/// primitive. Returns the field list in first-row order.
fn tabular_fields(items: &[Value]) -> Option<Vec<&str>> {
    let first = match items.first() {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return None,
    };
    let fields: Vec<&str> = first.keys().map(String::as_str).collect();

    for item in items {
        let map = match item {
            Value::Object(map) => map,
            _ => return None,
        };
        if !map.keys().map(String::as_str).eq(fields.iter().copied()) {
            return None;
        }
        if !map.values().all(is_primitive) {
            return None;
        }
    }
    Some(fields)
}
