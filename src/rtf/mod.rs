//! The simplified RTF dialect scriv reads and writes.
//!
//! RTF streams are built from control words (`\b`, `\fs24`), control
//! symbols (`\{` escapes), groups (`{ }`), and literal text. This dialect
//! keeps just enough of the format to persist per-character styling:
//!
//! - a fixed header: version marker, a one-entry font table, an empty
//!   color table, default paragraph state
//! - one explicitly-scoped formatting group per styled character on the
//!   write path, e.g. `{\b\fs28 A}`
//! - bold/italic/underline, size in half-points, and a constant `\f0`
//!   family marker (the font table has a single slot, so the family name
//!   itself is not encoded)
//!
//! Deliberate limitations, kept for compatibility with the files the
//! original tool produced: group close resets all pending formatting
//! instead of restoring the enclosing group's (flat, non-stacking model),
//! and the `\uN?` escapes the encoder emits for non-ASCII characters are
//! not interpreted on read, so only the `?` fallback survives a round
//! trip. Unknown control words are ignored without error.

mod decode;
mod encode;

pub use decode::decode;
pub use encode::{PREAMBLE, encode};
