//! TOON format reference as implemented by this crate.
//!
//! # Overview
//!
//! TOON (Token-Oriented Object Notation) is an indentation-based text
//! format for the JSON data model, built to spend fewer tokens than JSON
//! in language-model prompts while staying readable.
//!
//! # Objects
//!
//! Objects are newline-delimited `key: value` pairs; nesting is expressed
//! with indentation (2 spaces per level by default):
//!
//! ```text
//! name: Alice
//! address:
//!   city: Oslo
//!   zip: "0150"
//! ```
//!
//! A key with no inline value and no indented body denotes an empty
//! object. Keys are unquoted unless they need quoting (see Strings); a
//! quoted key is never split by path expansion.
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` / `false` | `active: true` |
//! | Integer | decimal digits, optional `-` | `count: 42` |
//! | Float | decimal point, no exponent on output | `price: 19.99` |
//! | String | unquoted or `"quoted"` | `name: Alice` |
//!
//! Numbers are canonical: shortest round-trip decimal, positional
//! notation only, no leading zeros, `-0` collapses to `0`. On input,
//! non-finite floats become `null`, temporal instants become ISO-8601
//! UTC strings, and big integers become numbers inside the safe-integer
//! range (|n| ≤ 2^53 − 1) or decimal strings outside it.
//!
//! # Strings
//!
//! Strings are unquoted by default. Quoting applies when a string is
//! empty, starts or ends with whitespace, starts with `-`, contains a
//! structural character (`:`, `#`, `"`, `\`, `[`, `]`, `{`, `}`), a
//! control character, a comma or tab (any delimiter), a pipe under the
//! pipe delimiter, or reads as `true`/`false`/`null` or a number.
//!
//! Escapes inside quoted strings: `\"`, `\\`, `\n`, `\r`, `\t`, `\b`,
//! `\f`, `\uXXXX`. `\/` is accepted when decoding but never produced.
//! Anything else (such as `\x41`) is rejected.
//!
//! # Arrays
//!
//! Every array header declares its length. Three forms exist:
//!
//! **Inline** — all elements are primitives:
//!
//! ```text
//! tags[3]: reading,gaming,coding
//! ```
//!
//! **Tabular** — elements are objects with identical keys (in the same
//! order) and primitive leaves; the header carries the field list and
//! each row one element:
//!
//! ```text
//! users[2]{id,name,role}:
//!   1,Alice,admin
//!   2,Bob,user
//! ```
//!
//! **List** — everything else, one dash-prefixed entry per element. An
//! entry object's first key rides the dash line and its remaining keys
//! align two columns past the dash; a nested array header on the dash
//! line opens its body one indent level below the dash:
//!
//! ```text
//! mixed[3]:
//!   - 1
//!   - name: Alice
//!     role: admin
//!   - [2]: a,b
//! ```
//!
//! An empty array is a header with no body: `items[0]:`. A root-level
//! array drops the key: `[3]: 1,2,3`.
//!
//! # Delimiters
//!
//! Inline arrays and tabular rows may be joined with comma (default),
//! tab, or pipe. The field list of a tabular header fixes the delimiter
//! for its rows; inline arrays infer theirs from the declared count.
//!
//! # Key folding
//!
//! With folding enabled, a chain of single-key objects collapses into a
//! dotted key:
//!
//! ```text
//! data.metadata.items[2]: a,b
//! ```
//!
//! Folding stops at any key that contains a dot, needs quoting, at a
//! multi-key object, or at the configured depth limit. Decoding with
//! path expansion splits unquoted dotted keys back into nested objects.
//!
//! # Strict mode
//!
//! Strict decoding (the default) rejects:
//!
//! - declared lengths that disagree with the counted elements
//! - rows or field lists using a delimiter other than the active one
//! - indentation that is misaligned or uses tabs
//! - unknown escapes and unterminated strings
//!
//! Lenient decoding accepts the observed counts and delimiters; lexical
//! and indentation errors stay fatal because the parser cannot advance
//! deterministically past them.

// This module contains only documentation; no implementation code.
