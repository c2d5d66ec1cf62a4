//! Escape sequence handling.
//!
//! HL7 v2 lets a value carry a delimiter character by writing it as an escape sequence
//! bracketed by the escape character: `\F\` field, `\S\` component, `\T\` subcomponent,
//! `\R\` repetition, `\E\` escape. Line breaks cannot appear inside a segment and travel
//! as hex data (`\X0D\`, `\X0A\`). Other sequences (highlighting, formatting) are left
//! verbatim.
//!
//! Decoding must run after a field has been split, otherwise a decoded delimiter would be
//! split on again.

use crate::Delimiters;
use std::borrow::Cow;

/// Decode the delimiter escape sequences in `value`.
///
/// Unknown sequences and an unterminated trailing escape are copied through unchanged.
pub fn decode<'a>(value: &'a str, delimiters: &Delimiters) -> Cow<'a, str> {
    let esc = delimiters.escape;
    if !value.contains(esc) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find(esc) {
        out.push_str(&rest[..start]);
        let after = &rest[start + esc.len_utf8()..];

        let Some(end) = after.find(esc) else {
            out.push_str(&rest[start..]);
            return Cow::Owned(out);
        };

        let code = &after[..end];
        if let Some(c) = sequence_char(code, delimiters) {
            out.push(c);
        } else if let Some(text) = hex_text(code) {
            out.push_str(&text);
        } else {
            out.push(esc);
            out.push_str(code);
            out.push(esc);
        }
        rest = &after[end + esc.len_utf8()..];
    }

    out.push_str(rest);
    Cow::Owned(out)
}

/// Encode every reserved character in `value` as its escape sequence.
///
/// `\r` and `\n` are written as hex data so a value can never end its segment.
pub fn encode<'a>(value: &'a str, delimiters: &Delimiters) -> Cow<'a, str> {
    if !value
        .chars()
        .any(|c| delimiters.is_reserved(c) || is_line_break(c))
    {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if let Some(code) = sequence_code(c, delimiters) {
            out.push(delimiters.escape);
            out.push(code);
            out.push(delimiters.escape);
        } else if is_line_break(c) {
            out.push(delimiters.escape);
            out.push_str(&format!("X{:02X}", c as u32));
            out.push(delimiters.escape);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Text of an `Xhhhh..` hex data sequence, when it is well formed UTF-8.
fn hex_text(code: &str) -> Option<String> {
    let hex = code.strip_prefix('X')?;
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

fn sequence_char(code: &str, d: &Delimiters) -> Option<char> {
    match code {
        "F" => Some(d.field),
        "S" => Some(d.component),
        "T" => Some(d.subcomponent),
        "R" => Some(d.repetition),
        "E" => Some(d.escape),
        _ => None,
    }
}

fn sequence_code(c: char, d: &Delimiters) -> Option<char> {
    if c == d.escape {
        Some('E')
    } else if c == d.field {
        Some('F')
    } else if c == d.component {
        Some('S')
    } else if c == d.subcomponent {
        Some('T')
    } else if c == d.repetition {
        Some('R')
    } else {
        None
    }
}
