//! # toon-codec
//!
//! Encoder and decoder for TOON (Token-Oriented Object Notation), a
//! textual serialization format for JSON-compatible data designed to
//! minimize token count when fed to language models while staying
//! human-readable.
//!
//! ## What is TOON?
//!
//! TOON trades JSON's braces, brackets, and repeated keys for indentation
//! and table headers. Arrays of homogeneous objects — the common shape of
//! structured LLM payloads — collapse into one header line plus one
//! delimited row per element:
//!
//! ```text
//! items[2]{sku,qty,price}:
//!   A1,2,9.99
//!   B2,1,14.5
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "tags": ["admin", "ops"]
//! });
//!
//! let text = encode(&value);
//! assert_eq!(text, "name: Alice\ntags[2]: admin,ops");
//!
//! let back = decode(&text).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Key Features
//!
//! - **Three array forms**: inline primitives, dash lists, and tabular
//!   rows, selected automatically by shape
//! - **Lazy interfaces**: [`encode_lines`] yields one line per step;
//!   [`decode_stream_sync`] and [`decode_stream`] yield structural
//!   [`Event`]s without materializing a tree
//! - **Key folding**: single-key object chains optionally collapse into
//!   dotted paths (`a.b.c: 1`) and expand back on decode
//! - **Strict mode**: declared lengths, delimiter uniformity, and
//!   indentation are cross-checked; lenient mode accepts the observed
//!   shape instead
//! - **Serde interop**: [`Value`] implements `Serialize`/`Deserialize`
//! - **No unsafe code**
//!
//! ## Decoding Streams
//!
//! ```rust
//! use toon_codec::{decode_stream_sync, DecodeOptions, Event};
//!
//! let events: Vec<Event> = decode_stream_sync(["a: 1"], &DecodeOptions::new())
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(events.first(), Some(&Event::StartObject));
//! ```

#![forbid(unsafe_code)]

pub mod builder;
pub mod encode;
pub mod error;
pub mod event;
pub mod format;
mod line;
mod literal;
pub mod macros;
pub mod map;
pub mod normalize;
pub mod options;
pub mod stream;
pub mod value;

pub use builder::build_value_from_events;
pub use encode::{encode_lines, Lines};
pub use error::{Error, Result};
pub use event::{Event, Events};
pub use map::Map;
pub use normalize::normalize;
pub use options::{DecodeOptions, Delimiter, EncodeOptions, KeyFolding, PathExpansion};
pub use stream::EventStream;
pub use value::{Number, Value};

use builder::Builder;
use event::DecoderCore;

/// Encodes a value to TOON with default options.
///
/// The output is LF-joined with no trailing newline and no surrounding
/// whitespace. Encoding cannot fail: values outside the JSON domain are
/// substituted the same way [`normalize`] does.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode, toon};
///
/// let value = toon!({ "id": 7, "name": "Ada" });
/// assert_eq!(encode(&value), "id: 7\nname: Ada");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a value to TOON with explicit options.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};
///
/// let value = toon!({ "nums": [1, 2, 3] });
/// let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
/// assert_eq!(encode_with_options(&value, &options), "nums[3]: 1|2|3");
/// ```
#[must_use]
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> String {
    let mut out = String::new();
    for line in encode_lines(value, options) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
    }
    out
}

/// Decodes TOON text into a value with default options (strict mode, no
/// path expansion).
///
/// The text is split on LF; a final empty line is ignored. Empty input
/// decodes to an empty object.
///
/// # Errors
///
/// Returns an error for malformed headers, bad escapes, unterminated
/// strings, and — in strict mode — for length, delimiter, and
/// indentation anomalies.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode, toon};
///
/// let value = decode("items[2]:\n  - Apple\n  - Banana").unwrap();
/// assert_eq!(value, toon!({ "items": ["Apple", "Banana"] }));
/// ```
pub fn decode(text: &str) -> Result<Value> {
    decode_with_options(text, &DecodeOptions::default())
}

/// Decodes TOON text into a value with explicit options.
///
/// # Errors
///
/// See [`decode`].
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_with_options, toon, DecodeOptions};
///
/// let options = DecodeOptions::new().with_strict(false);
/// let value = decode_with_options("items[3]: a,b", &options).unwrap();
/// assert_eq!(value, toon!({ "items": ["a", "b"] }));
/// ```
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> Result<Value> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    decode_from_lines(lines, options)
}

/// Decodes an iterable of lines (without terminators) into a value,
/// applying path expansion if requested.
///
/// # Errors
///
/// See [`decode`]; additionally surfaces [`Error::ExpansionConflict`]
/// when path expansion meets incompatible kinds in strict mode.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_from_lines, toon, DecodeOptions};
///
/// let value = decode_from_lines(["a: 1", "b: 2"], &DecodeOptions::new()).unwrap();
/// assert_eq!(value, toon!({ "a": 1, "b": 2 }));
/// ```
pub fn decode_from_lines<I>(lines: I, options: &DecodeOptions) -> Result<Value>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let events = Events::new(DecoderCore::new(options), lines.into_iter());
    Builder::new(options.expand_paths, options.strict).run(events)
}

/// Decodes an iterable of lines into a lazy event sequence.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOption`] immediately when `expand_paths`
/// is requested: expansion needs a materialized tree, which the streaming
/// interface never builds. Later structural errors arrive as stream
/// items.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{decode_stream_sync, DecodeOptions, Event};
///
/// let mut events = decode_stream_sync(["[2]: 1,2"], &DecodeOptions::new()).unwrap();
/// assert_eq!(events.next(), Some(Ok(Event::StartArray { length: 2 })));
/// ```
pub fn decode_stream_sync<I>(lines: I, options: &DecodeOptions) -> Result<Events<I::IntoIter>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    reject_expand_paths(options)?;
    Ok(Events::new(DecoderCore::new(options), lines.into_iter()))
}

/// Decodes an asynchronous stream of lines into an asynchronous event
/// stream. Event order is identical to [`decode_stream_sync`] for the
/// same input.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOption`] immediately when `expand_paths`
/// is requested; see [`decode_stream_sync`].
pub fn decode_stream<S>(lines: S, options: &DecodeOptions) -> Result<EventStream<S>>
where
    S: futures_core::Stream + Unpin,
    S::Item: AsRef<str>,
{
    reject_expand_paths(options)?;
    Ok(EventStream::new(DecoderCore::new(options), lines))
}

fn reject_expand_paths(options: &DecodeOptions) -> Result<()> {
    if options.expand_paths != PathExpansion::Off {
        return Err(Error::unsupported_option(
            "expand_paths is not available when streaming events",
        ));
    }
    Ok(())
}
