//! Line tokenizer and header parser.
//!
//! A TOON line splits into `(indent, content)`. The content either carries
//! a header — `key[N]{fields}:` with every part optional except the colon
//! — or is a bare scalar. The scan for the header terminator finds the
//! first `:` that is neither inside a quoted string nor inside `[...]` or
//! `{...}` brackets; quoted strings never span a line break.

use crate::{Delimiter, Error, Result};

/// A key or field name with its quoting flag, which path expansion needs
/// to know whether the name may be split at dots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub was_quoted: bool,
}

/// Parsed form of a line's content.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Content {
    /// A line containing a top-level colon.
    Header(Header),
    /// A line without one: a bare scalar.
    Bare(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Header {
    /// Absent for root-array headers (`[N]:`) and dash-line headers.
    pub key: Option<Token>,
    /// The declared element count from `[N]`.
    pub length: Option<usize>,
    /// Field names from `{...}`, present only for tabular headers.
    pub fields: Option<Vec<Token>>,
    /// The delimiter observed between field names, if more than one.
    pub field_delimiter: Option<char>,
    /// Text after the colon, surrounding whitespace removed.
    pub rest: String,
}

/// Splits a raw line into its indentation width and content, rejecting
/// tabs in the indentation. Whitespace-only lines are blank; trailing
/// whitespace is not significant.
pub(crate) fn split_indent(line: &str, line_no: usize) -> Result<(usize, &str)> {
    if line.trim().is_empty() {
        return Ok((0, ""));
    }
    let mut spaces = 0;
    for ch in line.chars() {
        match ch {
            ' ' => spaces += 1,
            '\t' => {
                return Err(Error::indentation(
                    line_no,
                    "tabs are not allowed in indentation",
                ))
            }
            _ => break,
        }
    }
    Ok((spaces, line[spaces..].trim_end()))
}

/// Finds the byte offset of the first `:` outside quotes and brackets.
/// Also reports the bracket depth remaining at end of line, so callers can
/// reject headers whose `[`/`{` never close.
fn find_colon(content: &str) -> (Option<usize>, usize) {
    let mut in_quote = false;
    let mut escaped = false;
    let mut depth = 0usize;
    for (idx, ch) in content.char_indices() {
        if in_quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quote = false;
            }
            continue;
        }
        match ch {
            '"' => in_quote = true,
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return (Some(idx), depth),
            _ => {}
        }
    }
    (None, depth)
}

/// Parses one line's content into a header or a bare scalar.
pub(crate) fn parse_content(content: &str, line_no: usize) -> Result<Content> {
    let colon = match find_colon(content) {
        (Some(idx), _) => idx,
        (None, depth) => {
            if depth > 0 {
                return Err(Error::malformed_header(line_no, "unbalanced '[' or '{'"));
            }
            return Ok(Content::Bare(content.to_string()));
        }
    };
    let head = content[..colon].trim_end();
    let rest = content[colon + 1..].trim().to_string();

    let (key, after_key) = parse_key(head, line_no)?;
    let (length, after_len) = parse_length(after_key, line_no)?;
    let (fields, field_delimiter, after_fields) = parse_fields(after_len, line_no)?;

    if !after_fields.trim().is_empty() {
        return Err(Error::malformed_header(
            line_no,
            format!("unexpected {:?} before ':'", after_fields.trim()),
        ));
    }
    if fields.is_some() && length.is_none() {
        return Err(Error::malformed_header(
            line_no,
            "field list requires a declared length",
        ));
    }
    if key.is_none() && length.is_none() {
        return Err(Error::malformed_header(line_no, "missing key before ':'"));
    }

    Ok(Content::Header(Header {
        key,
        length,
        fields,
        field_delimiter,
        rest,
    }))
}

/// Reads the optional key at the start of a header, quoted or bare.
fn parse_key(head: &str, line_no: usize) -> Result<(Option<Token>, &str)> {
    if head.starts_with('"') {
        let end = closing_quote(head).ok_or_else(|| Error::unterminated_string(line_no))?;
        let text = crate::literal::unescape_quoted(&head[..=end], line_no)?;
        return Ok((
            Some(Token {
                text,
                was_quoted: true,
            }),
            &head[end + 1..],
        ));
    }
    let cut = head.find(['[', '{']).unwrap_or(head.len());
    let bare = head[..cut].trim();
    if bare.is_empty() {
        Ok((None, &head[cut..]))
    } else {
        Ok((
            Some(Token {
                text: bare.to_string(),
                was_quoted: false,
            }),
            &head[cut..],
        ))
    }
}

/// Reads the optional `[N]` clause.
fn parse_length(input: &str, line_no: usize) -> Result<(Option<usize>, &str)> {
    let input = input.trim_start();
    if !input.starts_with('[') {
        return Ok((None, input));
    }
    let close = input
        .find(']')
        .ok_or_else(|| Error::malformed_header(line_no, "unbalanced '['"))?;
    let digits = input[1..close].trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed_header(
            line_no,
            format!("invalid array length {:?}", digits),
        ));
    }
    let length: usize = digits
        .parse()
        .map_err(|_| Error::malformed_header(line_no, format!("invalid array length {:?}", digits)))?;
    Ok((Some(length), &input[close + 1..]))
}

/// Reads the optional `{fields}` clause and the delimiter it uses.
fn parse_fields(input: &str, line_no: usize) -> Result<(Option<Vec<Token>>, Option<char>, &str)> {
    let input = input.trim_start();
    if !input.starts_with('{') {
        return Ok((None, None, input));
    }
    let close = closing_brace(input)
        .ok_or_else(|| Error::malformed_header(line_no, "unbalanced '{'"))?;
    let inner = &input[1..close];
    if inner.trim().is_empty() {
        return Err(Error::malformed_header(line_no, "empty field list"));
    }

    let delimiter = detect_delimiter(inner);
    let active = delimiter.unwrap_or(',');
    let mut fields = Vec::new();
    for raw in split_unquoted(inner, active) {
        let token = field_token(&raw, active, line_no)?;
        fields.push(token);
    }
    Ok((Some(fields), delimiter, &input[close + 1..]))
}

fn field_token(raw: &str, delimiter: char, line_no: usize) -> Result<Token> {
    let trimmed = if delimiter == '\t' { raw } else { raw.trim() };
    if trimmed.starts_with('"') {
        Ok(Token {
            text: crate::literal::unescape_quoted(trimmed, line_no)?,
            was_quoted: true,
        })
    } else if trimmed.is_empty() {
        Err(Error::malformed_header(line_no, "empty field name"))
    } else {
        Ok(Token {
            text: trimmed.to_string(),
            was_quoted: false,
        })
    }
}

/// Byte offset of the quote closing a string that starts at offset 0.
fn closing_quote(s: &str) -> Option<usize> {
    debug_assert!(s.starts_with('"'));
    let mut escaped = false;
    for (idx, ch) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Some(idx);
        }
    }
    None
}

/// Byte offset of the `}` closing a brace that opens at offset 0,
/// ignoring braces inside quoted strings.
fn closing_brace(s: &str) -> Option<usize> {
    debug_assert!(s.starts_with('{'));
    let mut in_quote = false;
    let mut escaped = false;
    for (idx, ch) in s.char_indices().skip(1) {
        if in_quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quote = false;
            }
            continue;
        }
        match ch {
            '"' => in_quote = true,
            '}' => return Some(idx),
            _ => {}
        }
    }
    None
}

/// First delimiter character appearing outside quotes, if any.
pub(crate) fn detect_delimiter(s: &str) -> Option<char> {
    let mut in_quote = false;
    let mut escaped = false;
    for ch in s.chars() {
        if in_quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quote = false;
            }
            continue;
        }
        match ch {
            '"' => in_quote = true,
            ',' | '\t' | '|' => return Some(ch),
            _ => {}
        }
    }
    None
}

/// Splits on a delimiter, ignoring occurrences inside quoted strings.
/// Cells keep their quotes; surrounding spaces are trimmed except under
/// the tab delimiter.
pub(crate) fn split_unquoted(s: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut escaped = false;
    for ch in s.chars() {
        if in_quote {
            current.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_quote = false;
            }
            continue;
        }
        if ch == delimiter {
            cells.push(current);
            current = String::new();
        } else {
            if ch == '"' {
                in_quote = true;
            }
            current.push(ch);
        }
    }
    cells.push(current);

    if delimiter == Delimiter::Tab.as_char() {
        cells
    } else {
        cells.into_iter().map(|c| c.trim().to_string()).collect()
    }
}
