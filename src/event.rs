//! Structural events and the streaming decoder.
//!
//! The decoder consumes indented lines and emits a flat stream of
//! [`Event`]s. A well-formed stream matches the grammar:
//!
//! ```text
//! value  := object | array | primitive
//! object := StartObject (Key value)* EndObject
//! array  := StartArray value{N} EndArray
//! ```
//!
//! [`DecoderCore`] is push/pull: lines go in one at a time, events drain
//! out between lines. The indent stack replaces recursion on the input, so
//! arbitrarily deep documents decode in constant call depth, and both the
//! synchronous [`Events`] iterator and the asynchronous
//! [`crate::EventStream`] drive the same machine, which guarantees
//! identical event order.

use std::collections::VecDeque;

use crate::line::{self, Content, Header, Token};
use crate::literal::parse_scalar;
use crate::{DecodeOptions, Error, Result, Value};

/// One structural step of a decoded document.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_stream_sync, DecodeOptions, Event, Value};
///
/// let events: Vec<_> = decode_stream_sync(["name: Alice"], &DecodeOptions::new())
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     events,
///     vec![
///         Event::StartObject,
///         Event::Key { key: "name".to_string(), was_quoted: false },
///         Event::Primitive { value: Value::from("Alice") },
///         Event::EndObject,
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartObject,
    EndObject,
    StartArray { length: usize },
    EndArray,
    Key { key: String, was_quoted: bool },
    Primitive { value: Value },
}

enum Scope {
    Object {
        col: usize,
    },
    List {
        col: usize,
        declared: usize,
        seen: usize,
        header_line: usize,
    },
    Table {
        col: usize,
        fields: Vec<Token>,
        declared: usize,
        seen: usize,
        delimiter: char,
        header_line: usize,
    },
    /// A `key:` line whose body has not been seen yet. Becomes an object
    /// if the next line is indented below it, otherwise an empty object.
    Pending {
        child_col: usize,
    },
}

#[derive(Clone, Copy, PartialEq)]
enum ScopeKind {
    Object,
    List,
    Table,
    Pending,
}

impl Scope {
    fn col(&self) -> usize {
        match self {
            Scope::Object { col }
            | Scope::List { col, .. }
            | Scope::Table { col, .. }
            | Scope::Pending { child_col: col } => *col,
        }
    }

    fn kind(&self) -> ScopeKind {
        match self {
            Scope::Object { .. } => ScopeKind::Object,
            Scope::List { .. } => ScopeKind::List,
            Scope::Table { .. } => ScopeKind::Table,
            Scope::Pending { .. } => ScopeKind::Pending,
        }
    }
}

/// The line-driven decoder state machine shared by the sync and async
/// event interfaces.
pub(crate) struct DecoderCore {
    indent: usize,
    strict: bool,
    line_no: usize,
    started: bool,
    events: VecDeque<Event>,
    stack: Vec<Scope>,
    finished: bool,
}

impl DecoderCore {
    pub(crate) fn new(options: &DecodeOptions) -> Self {
        DecoderCore {
            indent: options.indent,
            strict: options.strict,
            line_no: 0,
            started: false,
            events: VecDeque::new(),
            stack: Vec::new(),
            finished: false,
        }
    }

    pub(crate) fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Consumes one line, appending any events it completes.
    pub(crate) fn feed_line(&mut self, raw: &str) -> Result<()> {
        self.line_no += 1;
        let (col, content) = line::split_indent(raw, self.line_no)?;
        if content.is_empty() {
            return Ok(());
        }

        self.resolve_pending(col)?;

        while self.stack.last().is_some_and(|top| col < top.col()) {
            self.close_top()?;
        }

        match self.stack.last().map(|top| (top.kind(), top.col())) {
            None => {
                if self.started {
                    return Err(Error::malformed_header(
                        self.line_no,
                        "unexpected content after root value",
                    ));
                }
                if col != 0 {
                    return Err(Error::indentation(
                        self.line_no,
                        format!("root value must not be indented, found {} spaces", col),
                    ));
                }
                self.started = true;
                self.start_root(content)
            }
            Some((kind, expected)) => {
                if col != expected {
                    return Err(Error::indentation(
                        self.line_no,
                        format!("expected {} leading spaces, found {}", expected, col),
                    ));
                }
                match kind {
                    ScopeKind::Object => self.object_line(content, col),
                    ScopeKind::List => self.list_line(content, col),
                    ScopeKind::Table => self.table_line(content),
                    ScopeKind::Pending => unreachable!("pending resolved above"),
                }
            }
        }
    }

    /// Closes everything still open. Idempotent; called at end of input.
    pub(crate) fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        while !self.stack.is_empty() {
            self.close_top()?;
        }
        if !self.started {
            // Empty input decodes to an empty object.
            self.events.push_back(Event::StartObject);
            self.events.push_back(Event::EndObject);
            self.started = true;
        }
        Ok(())
    }

    /// Decides whether a trailing `key:` opened an object or was empty.
    fn resolve_pending(&mut self, col: usize) -> Result<()> {
        let child_col = match self.stack.last() {
            Some(Scope::Pending { child_col }) => *child_col,
            _ => return Ok(()),
        };
        if col == child_col {
            *self.stack.last_mut().expect("pending scope") = Scope::Object { col: child_col };
            self.events.push_back(Event::StartObject);
        } else if col > child_col {
            // Indentation anomalies are fatal in both modes; the parser
            // cannot place a line that matches no expected column.
            return Err(Error::indentation(
                self.line_no,
                format!("expected {} leading spaces, found {}", child_col, col),
            ));
        } else {
            self.events.push_back(Event::StartObject);
            self.events.push_back(Event::EndObject);
            self.stack.pop();
        }
        Ok(())
    }

    fn close_top(&mut self) -> Result<()> {
        match self.stack.pop().expect("scope to close") {
            Scope::Object { .. } => self.events.push_back(Event::EndObject),
            Scope::Pending { .. } => {
                self.events.push_back(Event::StartObject);
                self.events.push_back(Event::EndObject);
            }
            Scope::List {
                declared,
                seen,
                header_line,
                ..
            } => {
                if self.strict && seen != declared {
                    return Err(Error::length_mismatch(header_line, declared, seen));
                }
                self.events.push_back(Event::EndArray);
            }
            Scope::Table {
                declared,
                seen,
                header_line,
                ..
            } => {
                if self.strict && seen != declared {
                    return Err(Error::length_mismatch(header_line, declared, seen));
                }
                self.events.push_back(Event::EndArray);
            }
        }
        Ok(())
    }

    fn start_root(&mut self, content: &str) -> Result<()> {
        match line::parse_content(content, self.line_no)? {
            Content::Bare(text) => {
                let value = parse_scalar(&text, self.line_no)?;
                self.events.push_back(Event::Primitive { value });
                Ok(())
            }
            Content::Header(header) => {
                if header.key.is_none() {
                    // Keyless header: the root is an array.
                    self.open_array(header, self.indent)
                } else {
                    // The root is an implicit object wrapping every
                    // top-level key; its EndObject is emitted at finish.
                    self.events.push_back(Event::StartObject);
                    self.stack.push(Scope::Object { col: 0 });
                    self.object_entry(header, 0)
                }
            }
        }
    }

    fn object_line(&mut self, content: &str, col: usize) -> Result<()> {
        match line::parse_content(content, self.line_no)? {
            Content::Bare(_) => Err(Error::malformed_header(
                self.line_no,
                "expected 'key: value', missing ':'",
            )),
            Content::Header(header) => self.object_entry(header, col),
        }
    }

    /// Emits one `key[: value]` entry of an object whose key sits at
    /// `key_col`. Nested bodies open one indent level below the key.
    fn object_entry(&mut self, header: Header, key_col: usize) -> Result<()> {
        let key = match header.key {
            Some(ref token) => token.clone(),
            None => {
                return Err(Error::malformed_header(
                    self.line_no,
                    "missing key in object entry",
                ))
            }
        };
        self.events.push_back(Event::Key {
            key: key.text,
            was_quoted: key.was_quoted,
        });

        if header.length.is_some() {
            return self.open_array(header, key_col + self.indent);
        }
        if header.rest.is_empty() {
            self.stack.push(Scope::Pending {
                child_col: key_col + self.indent,
            });
            return Ok(());
        }
        let value = parse_scalar(&header.rest, self.line_no)?;
        self.events.push_back(Event::Primitive { value });
        Ok(())
    }

    /// Handles a header carrying `[N]`, in any of the three forms. The
    /// `Key` event, when there is one, has already been emitted.
    fn open_array(&mut self, header: Header, body_col: usize) -> Result<()> {
        let declared = header.length.expect("array header");
        self.events.push_back(Event::StartArray { length: declared });

        if let Some(fields) = header.fields {
            if !header.rest.is_empty() {
                return Err(Error::malformed_header(
                    self.line_no,
                    "unexpected content after tabular header",
                ));
            }
            if declared == 0 {
                self.events.push_back(Event::EndArray);
                return Ok(());
            }
            let delimiter = header.field_delimiter.unwrap_or(',');
            self.stack.push(Scope::Table {
                col: body_col,
                fields,
                declared,
                seen: 0,
                delimiter,
                header_line: self.line_no,
            });
            return Ok(());
        }

        if !header.rest.is_empty() {
            return self.inline_array(declared, &header.rest);
        }

        if declared == 0 {
            self.events.push_back(Event::EndArray);
        } else {
            self.stack.push(Scope::List {
                col: body_col,
                declared,
                seen: 0,
                header_line: self.line_no,
            });
        }
        Ok(())
    }

    /// A one-line array of primitives. The delimiter is inferred: the
    /// candidates are tried in priority order (comma, tab, pipe) and the
    /// first whose split matches the declared count wins. The encoder
    /// quotes comma and tab unconditionally, which keeps this inference
    /// unambiguous.
    fn inline_array(&mut self, declared: usize, rest: &str) -> Result<()> {
        let cells = split_inline_cells(rest, declared);
        if self.strict && cells.len() != declared {
            return Err(Error::length_mismatch(self.line_no, declared, cells.len()));
        }
        for cell in &cells {
            let value = parse_scalar(cell, self.line_no)?;
            self.events.push_back(Event::Primitive { value });
        }
        self.events.push_back(Event::EndArray);
        Ok(())
    }

    fn list_line(&mut self, content: &str, dash_col: usize) -> Result<()> {
        let entry = if let Some(rest) = content.strip_prefix("- ") {
            rest
        } else if content == "-" {
            ""
        } else {
            return Err(Error::malformed_header(
                self.line_no,
                format!("expected '- ' list entry, found {:?}", content),
            ));
        };

        if let Some(Scope::List {
            declared,
            seen,
            header_line,
            ..
        }) = self.stack.last_mut()
        {
            if *seen >= *declared && self.strict {
                let declared = *declared;
                let found = *seen + 1;
                let line = *header_line;
                return Err(Error::length_mismatch(line, declared, found));
            }
            *seen += 1;
        }
        self.list_entry(entry, dash_col)
    }

    fn list_entry(&mut self, entry: &str, dash_col: usize) -> Result<()> {
        if entry.is_empty() {
            // A bare dash is an empty-object entry.
            self.events.push_back(Event::StartObject);
            self.events.push_back(Event::EndObject);
            return Ok(());
        }
        match line::parse_content(entry, self.line_no)? {
            Content::Bare(text) => {
                let value = parse_scalar(&text, self.line_no)?;
                self.events.push_back(Event::Primitive { value });
                Ok(())
            }
            Content::Header(header) => {
                if header.key.is_none() {
                    // A nested array whose header rides the dash line;
                    // its body sits one level below the dash.
                    self.open_array(header, dash_col + self.indent)
                } else {
                    // An object whose first entry rides the dash line;
                    // its remaining keys align two columns past the dash.
                    self.events.push_back(Event::StartObject);
                    self.stack.push(Scope::Object { col: dash_col + 2 });
                    self.object_entry(header, dash_col + 2)
                }
            }
        }
    }

    fn table_line(&mut self, content: &str) -> Result<()> {
        let (fields, delimiter, declared, seen, header_line) = match self.stack.last() {
            Some(Scope::Table {
                fields,
                delimiter,
                declared,
                seen,
                header_line,
                ..
            }) => (
                fields.clone(),
                *delimiter,
                *declared,
                *seen,
                *header_line,
            ),
            _ => unreachable!("table scope"),
        };

        if seen >= declared && self.strict {
            return Err(Error::length_mismatch(header_line, declared, seen + 1));
        }

        let mut cells = if fields.len() == 1 {
            vec![content.to_string()]
        } else {
            line::split_unquoted(content, delimiter)
        };

        if cells.len() != fields.len() {
            // A row that splits cleanly under another delimiter is a
            // delimiter mismatch rather than a missing-cell row.
            let alternate = [',', '\t', '|']
                .into_iter()
                .filter(|d| *d != delimiter)
                .find(|d| line::split_unquoted(content, *d).len() == fields.len());
            match alternate {
                Some(found) if self.strict => {
                    return Err(Error::delimiter_mismatch(self.line_no, delimiter, found));
                }
                Some(found) => {
                    cells = line::split_unquoted(content, found);
                }
                None if self.strict => {
                    return Err(Error::length_mismatch(
                        self.line_no,
                        fields.len(),
                        cells.len(),
                    ));
                }
                None => {
                    cells.resize(fields.len(), String::new());
                }
            }
        }

        self.events.push_back(Event::StartObject);
        for (field, cell) in fields.iter().zip(&cells) {
            self.events.push_back(Event::Key {
                key: field.text.clone(),
                was_quoted: field.was_quoted,
            });
            // Missing cells padded in lenient mode decode to null.
            let value = if cell.is_empty() {
                Value::Null
            } else {
                parse_scalar(cell, self.line_no)?
            };
            self.events.push_back(Event::Primitive { value });
        }
        self.events.push_back(Event::EndObject);

        if let Some(Scope::Table { seen, .. }) = self.stack.last_mut() {
            *seen += 1;
        }
        Ok(())
    }
}

fn split_inline_cells(rest: &str, declared: usize) -> Vec<String> {
    if declared <= 1 {
        return vec![rest.to_string()];
    }
    for delimiter in [',', '\t', '|'] {
        let cells = line::split_unquoted(rest, delimiter);
        if cells.len() == declared {
            return cells;
        }
    }
    match line::detect_delimiter(rest) {
        Some(delimiter) => line::split_unquoted(rest, delimiter),
        None => vec![rest.to_string()],
    }
}

/// Synchronous event iterator returned by [`crate::decode_stream_sync`].
///
/// Yields events until the input is exhausted or the first error, after
/// which it stops.
pub struct Events<I> {
    core: DecoderCore,
    lines: I,
    pending_error: Option<Error>,
    done: bool,
}

impl<I> Events<I> {
    pub(crate) fn new(core: DecoderCore, lines: I) -> Self {
        Events {
            core,
            lines,
            pending_error: None,
            done: false,
        }
    }
}

impl<I, S> Iterator for Events<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Result<Event>> {
        loop {
            // Events completed before a failure are still delivered; the
            // stream halts right at the failure point.
            if let Some(event) = self.core.pop_event() {
                return Some(Ok(event));
            }
            if let Some(err) = self.pending_error.take() {
                self.done = true;
                return Some(Err(err));
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                Some(line) => {
                    if let Err(err) = self.core.feed_line(line.as_ref()) {
                        self.pending_error = Some(err);
                    }
                }
                None => {
                    if let Err(err) = self.core.finish() {
                        self.pending_error = Some(err);
                    } else {
                        self.done = true;
                    }
                }
            }
        }
    }
}
