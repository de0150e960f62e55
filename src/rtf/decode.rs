//! RTF reader: a control-word state machine replaying inserts against a
//! text surface.

use crate::surface::{HalfPoints, TagKey, TextSurface};

/// Formatting accumulated from control words, applied to the next text
/// flush. Reset whenever a group closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PendingFormat {
    bold: bool,
    italic: bool,
    underline: bool,
    size: Option<HalfPoints>,
}

impl PendingFormat {
    fn tag_keys(&self) -> Vec<TagKey> {
        let mut keys = Vec::new();
        if self.bold {
            keys.push(TagKey::Bold);
        }
        if self.italic {
            keys.push(TagKey::Italic);
        }
        if self.underline {
            keys.push(TagKey::Underline);
        }
        if let Some(half) = self.size {
            keys.push(TagKey::Size(half));
        }
        keys
    }
}

struct Parser<'a> {
    surface: &'a mut TextSurface,
    /// Header until `\pard`; header content never reaches the surface.
    in_header: bool,
    format: PendingFormat,
    text: String,
}

/// Decode an RTF stream, appending its text and formatting to `surface`.
///
/// The parser is best-effort and total: unknown control words, malformed
/// size parameters, and structurally odd nesting are absorbed silently.
/// Group close (`}`) resets all pending formatting without restoring the
/// enclosing group's; this dialect is committed to that flat model.
pub fn decode(rtf: &str, surface: &mut TextSurface) {
    let mut parser = Parser {
        surface,
        in_header: true,
        format: PendingFormat::default(),
        text: String::new(),
    };
    parser.run(rtf);
}

impl Parser<'_> {
    fn run(&mut self, rtf: &str) {
        let chars: Vec<char> = rtf.chars().collect();
        let mut in_control = false;
        let mut word = String::new();
        let mut seen_param = false;

        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];

            if in_control {
                // A control word is a run of letters optionally followed by
                // a numeric parameter; a letter after the parameter starts
                // ordinary text again (`\f0Hello` is `f0` + `Hello`).
                let extends = (ch.is_ascii_alphabetic() && !seen_param)
                    || ch.is_ascii_digit()
                    || ch == '-';
                if extends {
                    if !ch.is_ascii_alphabetic() {
                        seen_param = true;
                    }
                    word.push(ch);
                    i += 1;
                    continue;
                }
                self.dispatch(&word);
                in_control = false;
                if ch == ' ' {
                    // The space is the word's terminator, consumed with it.
                    i += 1;
                    continue;
                }
                // Any other terminator is reprocessed as ordinary input.
            }

            match ch {
                '\\' => {
                    if let Some(&next) = chars.get(i + 1) {
                        if matches!(next, '\\' | '{' | '}') {
                            self.text.push(next);
                            i += 2;
                            continue;
                        }
                    }
                    self.flush();
                    in_control = true;
                    word.clear();
                    seen_param = false;
                }
                '{' => self.flush(),
                '}' => {
                    self.flush();
                    // Flat model: discard all accumulated formatting, even
                    // formatting an enclosing group established.
                    self.format = PendingFormat::default();
                }
                _ => {
                    if !self.in_header {
                        self.text.push(ch);
                    }
                }
            }
            i += 1;
        }

        self.flush();
    }

    /// Flush accumulated body text to the surface with the pending format.
    fn flush(&mut self) {
        if self.text.is_empty() || self.in_header {
            return;
        }
        let at = self.surface.len_chars();
        let text = std::mem::take(&mut self.text);
        self.surface.insert_tagged(at, &text, &self.format.tag_keys());
    }

    fn dispatch(&mut self, word: &str) {
        match word {
            "rtf" | "ansi" | "deff0" | "fonttbl" | "colortbl" => self.in_header = true,
            "pard" => self.in_header = false,
            _ if self.in_header => {}
            "b" => self.format.bold = true,
            "i" => self.format.italic = true,
            "ul" => self.format.underline = true,
            "par" => {
                self.flush();
                // Paragraph breaks insert an unformatted newline.
                self.surface.append("\n");
            }
            _ => {
                if let Some(param) = word.strip_prefix("fs") {
                    // Half-points; a malformed parameter is ignored.
                    if let Ok(half) = param.parse::<HalfPoints>() {
                        self.format.size = Some(half);
                    }
                }
            }
        }
    }
}
