//! Configuration options for TOON encoding and decoding.
//!
//! - [`EncodeOptions`]: indentation width, delimiter, and key folding
//! - [`DecodeOptions`]: indentation width, strictness, and path expansion
//! - [`Delimiter`]: choice of delimiter for inline arrays and tables
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, EncodeOptions};
//!
//! let value = toon!({ "tags": ["a", "b"] });
//!
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! assert_eq!(encode_with_options(&value, &options), "tags[2]: a|b");
//! ```

/// Delimiter choice for inline arrays and tabular rows.
///
/// - **Comma**: default, most compact
/// - **Tab**: TSV-like output; cells are never trimmed
/// - **Pipe**: readable for markdown-style tables
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the delimiter as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Returns the delimiter for a character, if it is one of the three
    /// recognized delimiters.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Key-folding mode for the encoder.
///
/// In `Safe` mode, chains of single-key objects collapse into a dotted
/// key: `{a: {b: {c: 1}}}` encodes as `a.b.c: 1`. Folding only happens
/// when every intermediate key survives the round trip through
/// [`PathExpansion::Safe`] unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyFolding {
    #[default]
    Off,
    Safe,
}

/// Path-expansion mode for the decoder, the inverse of [`KeyFolding`].
///
/// In `Safe` mode, unquoted keys containing `.` are split into nested
/// objects after the value is built. Not available on the streaming
/// decoders, which never materialize a value tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PathExpansion {
    #[default]
    Off,
    Safe,
}

/// Options controlling the encoder.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{EncodeOptions, Delimiter, KeyFolding};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Tab)
///     .with_key_folding(KeyFolding::Safe)
///     .with_flatten_depth(3);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level. Default 2.
    pub indent: usize,
    /// Delimiter for inline arrays and tabular rows. Default comma.
    pub delimiter: Delimiter,
    /// Whether to fold single-key object chains into dotted keys.
    pub key_folding: KeyFolding,
    /// Maximum number of segments in a folded key. `usize::MAX` by
    /// default; 0 and 1 both disable folding.
    pub flatten_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            key_folding: KeyFolding::default(),
            flatten_depth: usize::MAX,
        }
    }
}

impl EncodeOptions {
    /// Creates the default options: 2-space indent, comma delimiter, no
    /// key folding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the delimiter for inline arrays and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the key-folding mode.
    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    /// Limits folded keys to at most `depth` dotted segments.
    #[must_use]
    pub fn with_flatten_depth(mut self, depth: usize) -> Self {
        self.flatten_depth = depth;
        self
    }
}

/// Options controlling the decoders.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{DecodeOptions, PathExpansion};
///
/// let options = DecodeOptions::new()
///     .with_strict(false)
///     .with_expand_paths(PathExpansion::Safe);
/// assert!(!options.strict);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Spaces per nesting level expected in the input. Default 2.
    pub indent: usize,
    /// Whether to reject count, delimiter, indentation, and escape
    /// anomalies. Default `true`.
    pub strict: bool,
    /// Whether to expand dotted keys into nested objects. Default off.
    /// Rejected by the streaming decoders.
    pub expand_paths: PathExpansion,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent: 2,
            strict: true,
            expand_paths: PathExpansion::default(),
        }
    }
}

impl DecodeOptions {
    /// Creates the default options: 2-space indent, strict mode, no path
    /// expansion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width expected in the input.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables strict validation.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the path-expansion mode.
    #[must_use]
    pub fn with_expand_paths(mut self, expand_paths: PathExpansion) -> Self {
        self.expand_paths = expand_paths;
        self
    }
}
