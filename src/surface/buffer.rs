use std::ops::Range;

use ropey::Rope;

use super::tags::{TagKey, TagKind, TagTable};

/// A styled text buffer backed by a rope with a tag overlay.
///
/// The rope stores the character sequence; the [`TagTable`] stores which
/// formatting tags cover which half-open character ranges. Every edit keeps
/// the overlay in step with the text, so a tag range never outlives the
/// characters it covers.
///
/// All positions are character indices (not bytes); line/column views are
/// provided for the terminal UI.
pub struct TextSurface {
    rope: Rope,
    tags: TagTable,
    dirty: bool,
}

impl TextSurface {
    /// Create a surface from unstyled text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            tags: TagTable::new(),
            dirty: false,
        }
    }

    /// Create an empty surface.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Whether the surface has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the surface as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The full text content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// The character at `pos`, if in bounds.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        (pos < self.rope.len_chars()).then(|| self.rope.char(pos))
    }

    /// Iterate all characters.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// Iterate `range`, yielding each character with its covering tags in
    /// tag-creation order.
    pub fn iter_styled(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (char, Vec<&TagKey>)> + '_ {
        let start = range.start.min(self.rope.len_chars());
        let end = range.end.min(self.rope.len_chars());
        self.rope
            .slice(start..end)
            .chars()
            .enumerate()
            .map(move |(i, ch)| (ch, self.tags.tags_at(start + i).collect()))
    }

    // --- Text mutation ---

    /// Insert `text` at character index `at`.
    ///
    /// Tag ranges strictly containing `at` grow to cover the new text; see
    /// [`super::tags::RangeSet::shift_for_insert`] for boundary behavior.
    pub fn insert(&mut self, at: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let at = at.min(self.rope.len_chars());
        self.rope.insert(at, text);
        self.tags.shift_for_insert(at, text.chars().count());
        self.dirty = true;
    }

    /// Append `text` at the end of the buffer and return its char range.
    pub fn append(&mut self, text: &str) -> Range<usize> {
        let start = self.rope.len_chars();
        self.insert(start, text);
        start..start + text.chars().count()
    }

    /// Insert `text` at `at` and apply `keys` over exactly the inserted range.
    pub fn insert_tagged(&mut self, at: usize, text: &str, keys: &[TagKey]) -> Range<usize> {
        let at = at.min(self.rope.len_chars());
        let len = text.chars().count();
        self.insert(at, text);
        let range = at..at + len;
        for key in keys {
            self.tags.apply(key.clone(), range.clone());
        }
        range
    }

    /// Delete the character range, dropping any tag coverage over it.
    pub fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.rope.len_chars());
        let end = range.end.min(self.rope.len_chars());
        if start >= end {
            return;
        }
        self.rope.remove(start..end);
        self.tags.shift_for_remove(&(start..end));
        self.dirty = true;
    }

    // --- Tag table ---

    pub fn apply_tag(&mut self, key: TagKey, range: Range<usize>) {
        if range.start < range.end {
            self.tags.apply(key, range);
            self.dirty = true;
        }
    }

    pub fn remove_tag(&mut self, key: &TagKey, range: Range<usize>) {
        if range.start < range.end {
            self.tags.remove(key, range);
            self.dirty = true;
        }
    }

    /// Remove every tag of `kind` intersecting `range` (size/family
    /// exclusivity sweep).
    pub fn clear_tag_kind(&mut self, kind: TagKind, range: &Range<usize>) {
        self.tags.clear_kind(kind, range);
        self.dirty = true;
    }

    /// Tags covering `pos`, in creation order.
    pub fn tags_at(&self, pos: usize) -> impl Iterator<Item = &TagKey> {
        self.tags.tags_at(pos)
    }

    /// Tags intersecting `range`, in creation order.
    pub fn tags_intersecting<'a>(
        &'a self,
        range: &'a Range<usize>,
    ) -> impl Iterator<Item = &'a TagKey> {
        self.tags.tags_intersecting(range)
    }

    /// Whether `key` covers every character of `range`.
    pub fn tag_covers(&self, key: &TagKey, range: &Range<usize>) -> bool {
        self.tags.covers(key, range)
    }

    /// Whether `key` covers the character at `pos`.
    pub fn tag_at(&self, key: &TagKey, pos: usize) -> bool {
        self.tags.contains(key, pos)
    }

    // --- Line views for the UI ---

    /// Number of lines (a trailing newline opens a final empty line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Content of a line without its trailing newline.
    pub fn line_text(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        Some(
            line.trim_end_matches('\n')
                .trim_end_matches('\r')
                .to_string(),
        )
    }

    /// Length of a line in characters (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_text(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Character index of the first character of `line_idx`.
    pub fn line_to_char(&self, line_idx: usize) -> usize {
        let line = line_idx.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line)
    }

    /// Convert a character index to a (line, column) pair, columns in chars.
    pub fn char_to_line_col(&self, pos: usize) -> (usize, usize) {
        let pos = pos.min(self.rope.len_chars());
        let line = self.rope.char_to_line(pos);
        (line, pos - self.rope.line_to_char(line))
    }

    /// Convert (line, column) to a character index, clamping both.
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line) + col.min(self.line_len(line))
    }
}

impl std::fmt::Debug for TextSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextSurface")
            .field(
                "rope",
                &format_args!("Rope({} chars)", self.rope.len_chars()),
            )
            .field("tags", &self.tags)
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_surface() {
        let surface = TextSurface::empty();
        assert!(surface.is_empty());
        assert_eq!(surface.len_chars(), 0);
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn test_from_text_preserves_content() {
        let surface = TextSurface::from_text("hello\nworld");
        assert_eq!(surface.len_chars(), 11);
        assert_eq!(surface.line_text(0), Some("hello".to_string()));
        assert_eq!(surface.line_text(1), Some("world".to_string()));
    }

    #[test]
    fn test_char_at() {
        let surface = TextSurface::from_text("abc");
        assert_eq!(surface.char_at(1), Some('b'));
        assert_eq!(surface.char_at(3), None);
    }

    // --- Dirty tracking ---

    #[test]
    fn test_new_surface_is_clean() {
        assert!(!TextSurface::from_text("hello").is_dirty());
    }

    #[test]
    fn test_edits_mark_dirty() {
        let mut surface = TextSurface::from_text("hello");
        surface.insert(0, "x");
        assert!(surface.is_dirty());
        surface.mark_clean();
        surface.apply_tag(TagKey::Bold, 0..2);
        assert!(surface.is_dirty());
    }

    // --- Edits and the tag overlay ---

    #[test]
    fn test_insert_inside_tagged_range_extends_it() {
        let mut surface = TextSurface::from_text("abcd");
        surface.apply_tag(TagKey::Bold, 1..3);
        surface.insert(2, "XY");
        assert_eq!(surface.text(), "abXYcd");
        assert!(surface.tag_covers(&TagKey::Bold, &(1..5)));
    }

    #[test]
    fn test_insert_before_tagged_range_shifts_it() {
        let mut surface = TextSurface::from_text("abcd");
        surface.apply_tag(TagKey::Italic, 2..4);
        surface.insert(0, "--");
        assert!(surface.tag_covers(&TagKey::Italic, &(4..6)));
        assert!(!surface.tag_at(&TagKey::Italic, 2));
    }

    #[test]
    fn test_insert_at_range_end_stays_unstyled() {
        let mut surface = TextSurface::from_text("ab");
        surface.apply_tag(TagKey::Bold, 0..2);
        surface.append("c");
        assert!(surface.tag_covers(&TagKey::Bold, &(0..2)));
        assert!(!surface.tag_at(&TagKey::Bold, 2));
    }

    #[test]
    fn test_remove_drops_tag_coverage() {
        let mut surface = TextSurface::from_text("abcdef");
        surface.apply_tag(TagKey::Underline, 2..5);
        surface.remove(1..4);
        assert_eq!(surface.text(), "aef");
        // Only the surviving tagged character (was 'e' at 4, now at 1).
        assert!(surface.tag_at(&TagKey::Underline, 1));
        assert!(!surface.tag_at(&TagKey::Underline, 0));
        assert!(!surface.tag_at(&TagKey::Underline, 2));
    }

    #[test]
    fn test_insert_tagged_applies_exactly_over_inserted_range() {
        let mut surface = TextSurface::from_text("xy");
        let range = surface.insert_tagged(1, "ab", &[TagKey::Bold, TagKey::Size(28)]);
        assert_eq!(range, 1..3);
        assert_eq!(surface.text(), "xaby");
        assert!(surface.tag_covers(&TagKey::Bold, &(1..3)));
        assert!(!surface.tag_at(&TagKey::Bold, 0));
        assert!(!surface.tag_at(&TagKey::Bold, 3));
    }

    #[test]
    fn test_append_returns_inserted_range() {
        let mut surface = TextSurface::from_text("ab");
        assert_eq!(surface.append("cd"), 2..4);
        assert_eq!(surface.text(), "abcd");
    }

    // --- Styled iteration ---

    #[test]
    fn test_iter_styled_yields_covering_tags() {
        let mut surface = TextSurface::from_text("abc");
        surface.apply_tag(TagKey::Bold, 0..2);
        surface.apply_tag(TagKey::Italic, 1..3);
        let styled: Vec<(char, usize)> = surface
            .iter_styled(0..3)
            .map(|(ch, tags)| (ch, tags.len()))
            .collect();
        assert_eq!(styled, vec![('a', 1), ('b', 2), ('c', 1)]);
    }

    #[test]
    fn test_tags_intersecting_selection() {
        let mut surface = TextSurface::from_text("abcdef");
        surface.apply_tag(TagKey::Bold, 0..2);
        surface.apply_tag(TagKey::Size(28), 1..4);
        surface.apply_tag(TagKey::Italic, 5..6);
        let range = 2..5;
        let touching: Vec<_> = surface.tags_intersecting(&range).collect();
        assert_eq!(touching, vec![&TagKey::Size(28)]);
    }

    #[test]
    fn test_iter_styled_clamps_range() {
        let surface = TextSurface::from_text("ab");
        assert_eq!(surface.iter_styled(0..100).count(), 2);
    }

    // --- Line views ---

    #[test]
    fn test_line_col_round_trip() {
        let surface = TextSurface::from_text("hello\nworld");
        let pos = surface.line_col_to_char(1, 2);
        assert_eq!(pos, 8);
        assert_eq!(surface.char_to_line_col(pos), (1, 2));
    }

    #[test]
    fn test_line_col_to_char_clamps() {
        let surface = TextSurface::from_text("hi\nthere");
        assert_eq!(surface.line_col_to_char(0, 99), 2);
        assert_eq!(surface.line_col_to_char(99, 0), 3);
    }

    #[test]
    fn test_line_len_multibyte() {
        let surface = TextSurface::from_text("café\nx");
        assert_eq!(surface.line_len(0), 4);
    }
}
