//! End-to-end codec properties: encode a styled surface, decode the bytes,
//! compare text and resolved styles.

use proptest::prelude::*;

use scriv::rtf::{self, PREAMBLE};
use scriv::storage::{self, FileFormat};
use scriv::style::model::{set_family, set_size};
use scriv::style::resolve_style;
use scriv::surface::{TagKey, TextSurface};

fn round_trip(surface: &TextSurface) -> TextSurface {
    let encoded = rtf::encode(surface);
    let mut decoded = TextSurface::empty();
    rtf::decode(&encoded, &mut decoded);
    decoded
}

#[test]
fn test_scenario_bold_ab_plain_c() {
    let mut surface = TextSurface::from_text("ABC");
    surface.apply_tag(TagKey::Bold, 0..2);

    let encoded = rtf::encode(&surface);
    assert_eq!(encoded, format!("{PREAMBLE}{{\\b A}}{{\\b B}}C}}"));

    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "ABC");
    assert!(resolve_style(&decoded, 0).bold);
    assert!(resolve_style(&decoded, 1).bold);
    assert!(resolve_style(&decoded, 2).is_plain());
}

#[test]
fn test_escaping_round_trip() {
    let surface = TextSurface::from_text("a\\b{c}d");
    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "a\\b{c}d");
}

#[test]
fn test_escaped_chars_keep_their_formatting() {
    let mut surface = TextSurface::from_text("\\{}");
    surface.apply_tag(TagKey::Underline, 0..3);
    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "\\{}");
    for pos in 0..3 {
        assert!(resolve_style(&decoded, pos).underline, "pos {pos}");
    }
}

#[test]
fn test_mixed_flags_round_trip() {
    let mut surface = TextSurface::from_text("abcd");
    surface.apply_tag(TagKey::Bold, 0..2);
    surface.apply_tag(TagKey::Italic, 1..3);
    surface.apply_tag(TagKey::Underline, 3..4);

    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "abcd");
    for pos in 0..4 {
        let want = resolve_style(&surface, pos);
        let got = resolve_style(&decoded, pos);
        assert_eq!(
            (want.bold, want.italic, want.underline),
            (got.bold, got.italic, got.underline),
            "pos {pos}"
        );
    }
}

#[test]
fn test_size_round_trips_in_half_points() {
    let mut surface = TextSurface::from_text("big");
    set_size(&mut surface, 0..3, 18.0);
    let decoded = round_trip(&surface);
    assert_eq!(resolve_style(&decoded, 1).size, Some(36));
}

#[test]
fn test_family_is_not_preserved() {
    // The dialect has a single font table slot: families all encode as
    // \f0, which the reader ignores.
    let mut surface = TextSurface::from_text("x");
    set_family(&mut surface, 0..1, "Serif");
    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "x");
    assert_eq!(resolve_style(&decoded, 0).family, None);
}

#[test]
fn test_non_ascii_is_lossy_by_design() {
    // \u233? is written but not read back; only the fallback '?' survives.
    let surface = TextSurface::from_text("café");
    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "caf?");
}

#[test]
fn test_newlines_round_trip() {
    let mut surface = TextSurface::from_text("First\nSecond");
    surface.apply_tag(TagKey::Bold, 0..5);
    let decoded = round_trip(&surface);
    assert_eq!(decoded.text(), "First\nSecond");
    assert!(resolve_style(&decoded, 4).bold);
    assert!(!resolve_style(&decoded, 6).bold);
}

#[test]
fn test_header_boundary_from_foreign_producer() {
    // Looser input than our own writer emits: spaces as delimiters, no
    // per-character groups.
    let mut surface = TextSurface::empty();
    rtf::decode(
        "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Sans;}}{\\colortbl;}\\pard Hello}",
        &mut surface,
    );
    assert_eq!(surface.text(), "Hello");
    assert!(resolve_style(&surface, 0).is_plain());
}

#[test]
fn test_par_control_word_becomes_newline() {
    let mut surface = TextSurface::empty();
    rtf::decode(
        "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0 Sans;}}{\\colortbl;}\\pard First\\par Second}",
        &mut surface,
    );
    assert_eq!(surface.text(), "First\nSecond");
}

#[test]
fn test_file_round_trip_through_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.rtf");

    let mut surface = TextSurface::from_text("Styled text here");
    surface.apply_tag(TagKey::Bold, 0..6);
    set_size(&mut surface, 7..11, 16.0);

    storage::save_document(&path, &surface, FileFormat::Rtf).unwrap();
    let loaded = storage::load_document(&path, FileFormat::Rtf).unwrap();

    assert_eq!(loaded.surface.text(), "Styled text here");
    assert!(resolve_style(&loaded.surface, 0).bold);
    assert_eq!(resolve_style(&loaded.surface, 8).size, Some(32));
    assert!(resolve_style(&loaded.surface, 12).is_plain());
}

/// Printable-ASCII documents whose first character cannot be mistaken for
/// part of the preamble's trailing `\f0` control word (a leading digit,
/// minus, or space is absorbed as its parameter or delimiter - the one
/// ambiguity the fixed header leaves).
fn doc_text() -> impl Strategy<Value = String> {
    "[ -~]{0,40}".prop_filter("first char must not extend \\f0", |t| {
        !t.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == ' ')
    })
}

proptest! {
    #[test]
    fn prop_plain_ascii_round_trip(
        text in doc_text(),
        ranges in proptest::collection::vec(
            (0usize..40, 0usize..40, 0usize..3),
            0..6,
        ),
    ) {
        let mut surface = TextSurface::from_text(&text);
        let len = text.chars().count();
        for (a, b, kind) in ranges {
            let (start, end) = (a.min(b).min(len), a.max(b).min(len));
            if start >= end {
                continue;
            }
            let key = match kind {
                0 => TagKey::Bold,
                1 => TagKey::Italic,
                _ => TagKey::Underline,
            };
            surface.apply_tag(key, start..end);
        }

        let decoded = round_trip(&surface);
        prop_assert_eq!(decoded.text(), surface.text());
        for pos in 0..len {
            let want = resolve_style(&surface, pos);
            let got = resolve_style(&decoded, pos);
            prop_assert_eq!(
                (want.bold, want.italic, want.underline),
                (got.bold, got.italic, got.underline),
                "style mismatch at {}",
                pos
            );
        }
    }
}
