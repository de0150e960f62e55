//! RTF writer: one formatting group per character.

use std::fmt::Write as _;

use crate::style::{ResolvedStyle, resolve_style};
use crate::surface::TextSurface;

/// Fixed document header: RTF version, single-entry font table, empty
/// color table, default paragraph state.
pub const PREAMBLE: &str =
    "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0\\fswiss\\fcharset0 Sans;}}{\\colortbl;}\\viewkind4\\uc1\\pard\\f0";

/// Encode the whole surface as an RTF byte stream.
///
/// Every character with any styling gets its own group: `{prefix char}`,
/// where the prefix concatenates control words in a fixed order (bold,
/// italic, underline, size, family marker). Wrapping per character trades
/// output size for not having to track format transitions between
/// characters; RTF readers tolerate arbitrary grouping.
pub fn encode(surface: &TextSurface) -> String {
    let mut out = String::with_capacity(PREAMBLE.len() + surface.len_chars() * 4 + 1);
    out.push_str(PREAMBLE);

    for (pos, ch) in surface.chars().enumerate() {
        let style = resolve_style(surface, pos);
        let prefix = format_prefix(&style);
        if prefix.is_empty() {
            push_escaped(&mut out, ch);
        } else {
            out.push('{');
            out.push_str(&prefix);
            out.push(' ');
            push_escaped(&mut out, ch);
            out.push('}');
        }
    }

    out.push('}');
    out
}

/// Control words for a character's style, concatenated in fixed order.
fn format_prefix(style: &ResolvedStyle) -> String {
    let mut prefix = String::new();
    if style.bold {
        prefix.push_str("\\b");
    }
    if style.italic {
        prefix.push_str("\\i");
    }
    if style.underline {
        prefix.push_str("\\ul");
    }
    if let Some(half) = style.size {
        let _ = write!(prefix, "\\fs{half}");
    }
    if style.family.is_some() {
        // Single font table slot; any family maps to \f0.
        prefix.push_str("\\f0");
    }
    prefix
}

/// Append one character, escaping RTF syntax.
///
/// Backslash and braces become `\` + literal; code points above 127 become
/// `\uN?` with the decimal scalar value and a literal `?` fallback.
fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' | '{' | '}' => {
            out.push('\\');
            out.push(ch);
        }
        ch if (ch as u32) > 127 => {
            let _ = write!(out, "\\u{}?", ch as u32);
        }
        ch => out.push(ch),
    }
}
