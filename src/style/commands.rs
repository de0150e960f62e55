//! Discrete formatting commands over a selection or caret.
//!
//! Translates toolbar-level actions (toggle bold, set size, nudge size, set
//! family) into style-model operations. With no selection, boolean toggles
//! park a pending override at the caret so subsequently typed text inherits
//! the toggled state; size and family changes require a selection.

use std::ops::Range;

use crate::style::model::{
    self, DEFAULT_SIZE_PT, MAX_SIZE_PT, MIN_SIZE_PT, NUDGE_STEP_PT,
};
use crate::surface::{TagKey, TextSurface};

/// Point sizes offered by the size selector.
pub const FONT_SIZE_PRESETS: &[f32] = &[
    8.0, 9.0, 10.0, 11.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 28.0, 32.0, 36.0, 48.0, 72.0,
];

/// Families offered by the family selector.
pub const FONT_FAMILIES: &[&str] = &[
    "Sans",
    "Serif",
    "Monospace",
    "Arial",
    "Times New Roman",
    "Courier New",
];

/// Formatting command state: the caret-anchored pending toggles.
#[derive(Debug, Clone, Default)]
pub struct FormatCommands {
    /// Boolean overrides typed text should pick up, set by toggling with no
    /// selection. Cleared when the caret moves.
    pending: Vec<(TagKey, bool)>,
}

impl FormatCommands {
    pub const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Toggle a boolean tag.
    ///
    /// With a selection: if every selected character already carries the
    /// tag, it is removed over the selection; otherwise it is applied over
    /// the whole selection (a mixed range becomes uniform). Without a
    /// selection: flips the pending override at `caret`.
    pub fn toggle(
        &mut self,
        surface: &mut TextSurface,
        selection: Option<Range<usize>>,
        caret: usize,
        key: TagKey,
    ) {
        match selection {
            Some(range) if range.start < range.end => {
                if surface.tag_covers(&key, &range) {
                    model::remove_boolean(surface, &key, range);
                } else {
                    model::apply_boolean(surface, key, range);
                }
            }
            _ => {
                let current = self.effective_at_caret(surface, caret, &key);
                self.set_pending(key, !current);
            }
        }
    }

    /// Set the font size over the selection. Returns the clamped value, or
    /// `None` when there is no selection (size changes require one).
    pub fn set_size(
        &self,
        surface: &mut TextSurface,
        selection: Option<Range<usize>>,
        points: f32,
    ) -> Option<f32> {
        let range = nonempty(selection)?;
        Some(model::set_size(surface, range, points))
    }

    /// Nudge the size by `delta` steps of two points, reading the current
    /// size from the first selected character (default 12pt). Returns the
    /// applied value, or `None` without a selection.
    pub fn nudge_size(
        &self,
        surface: &mut TextSurface,
        selection: Option<Range<usize>>,
        delta: i32,
    ) -> Option<f32> {
        let range = nonempty(selection)?;
        let current = model::resolve_style(surface, range.start)
            .size
            .map_or(DEFAULT_SIZE_PT, model::to_points);
        #[allow(clippy::cast_precision_loss, reason = "delta is a small step count")]
        let target = (current + NUDGE_STEP_PT * delta as f32).clamp(MIN_SIZE_PT, MAX_SIZE_PT);
        Some(model::set_size(surface, range, target))
    }

    /// Set the family over the selection. A no-op without one.
    pub fn set_family(
        &self,
        surface: &mut TextSurface,
        selection: Option<Range<usize>>,
        name: &str,
    ) -> bool {
        let Some(range) = nonempty(selection) else {
            return false;
        };
        model::set_family(surface, range, name);
        true
    }

    /// Apply the pending overrides to a freshly inserted range.
    ///
    /// Overrides stay armed so continued typing keeps the style; they are
    /// dropped by [`FormatCommands::clear_pending`] when the caret moves.
    pub fn apply_pending(&self, surface: &mut TextSurface, inserted: Range<usize>) {
        for (key, on) in &self.pending {
            if *on {
                model::apply_boolean(surface, key.clone(), inserted.clone());
            } else {
                model::remove_boolean(surface, key, inserted.clone());
            }
        }
    }

    /// Whether a pending override for `key` is armed, and its state.
    pub fn pending_state(&self, key: &TagKey) -> Option<bool> {
        self.pending
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, on)| *on)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop all pending overrides (caret moved or selection changed).
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// The boolean state typed text at `caret` would get for `key`: the
    /// pending override if armed, else whether an existing tag range would
    /// grow across the insertion point.
    pub fn effective_at_caret(&self, surface: &TextSurface, caret: usize, key: &TagKey) -> bool {
        if let Some(on) = self.pending_state(key) {
            return on;
        }
        inherits_at(surface, caret, key)
    }

    fn set_pending(&mut self, key: TagKey, on: bool) {
        if let Some(entry) = self.pending.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = on;
        } else {
            self.pending.push((key, on));
        }
    }
}

/// Whether text inserted at `caret` falls strictly inside a range carrying
/// `key` (only interior insertions grow a tag range).
fn inherits_at(surface: &TextSurface, caret: usize, key: &TagKey) -> bool {
    caret > 0 && surface.tag_at(key, caret - 1) && surface.tag_at(key, caret)
}

fn nonempty(selection: Option<Range<usize>>) -> Option<Range<usize>> {
    selection.filter(|r| r.start < r.end)
}
