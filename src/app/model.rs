use std::ops::Range;

use crate::storage::Session;
use crate::style::{FormatCommands, resolve_style};
use crate::surface::{TagKey, TextSurface};

/// Cursor position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (character offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    pub(super) const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }

    pub(super) const fn col_memory(&self) -> usize {
        self.col_memory
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// An action deferred behind the unsaved-changes confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Quit,
    NewDocument,
    OpenPrompt,
}

/// What a status-line prompt is collecting a path for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    SaveAs { and_then: Option<PendingAction> },
    Open,
}

/// Modal state of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal editing.
    Edit,
    /// Unsaved-changes confirmation before the pending action runs.
    Confirm(PendingAction),
    /// Collecting a file path on the status line.
    Prompt { kind: PromptKind, input: String },
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The styled document being edited.
    pub surface: TextSurface,
    /// Which file the buffer belongs to.
    pub session: Session,
    /// Formatting commands and the caret-anchored pending format.
    pub commands: FormatCommands,
    /// Editing cursor.
    pub cursor: Cursor,
    /// Selection anchor (char index); the selection runs from the anchor
    /// to the caret.
    pub anchor: Option<usize>,
    /// First visible line.
    pub scroll_offset: usize,
    /// Rows available for the document area.
    pub view_height: u16,
    /// Modal state.
    pub mode: Mode,
    /// Transient status message, shown until replaced.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl Model {
    /// Create a model for a loaded (or empty) surface.
    pub fn new(surface: TextSurface, session: Session, view_height: u16) -> Self {
        Self {
            surface,
            session,
            commands: FormatCommands::new(),
            cursor: Cursor::new(),
            anchor: None,
            scroll_offset: 0,
            view_height,
            mode: Mode::Edit,
            status: None,
            should_quit: false,
        }
    }

    /// The caret as a character index.
    pub fn caret(&self) -> usize {
        self.surface
            .line_col_to_char(self.cursor.line, self.cursor.col)
    }

    /// Place the caret at a character index.
    pub fn set_caret(&mut self, pos: usize) {
        let (line, col) = self.surface.char_to_line_col(pos);
        self.cursor.line = line;
        self.cursor.set_col(col);
    }

    /// The selected character range, if non-empty.
    pub fn selection(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        let caret = self.caret();
        let (start, end) = if anchor <= caret {
            (anchor, caret)
        } else {
            (caret, anchor)
        };
        (start < end).then_some(start..end)
    }

    /// Title for the status bar, with the unsaved-changes marker.
    pub fn title(&self) -> String {
        self.session.title(self.surface.is_dirty())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Style summary for the status bar: the resolved style at the caret
    /// (or selection start), with pending caret overrides folded in. This
    /// is the size-selector echo: whatever it shows is what typing or the
    /// next nudge starts from.
    pub fn style_echo(&self) -> String {
        let caret = self.caret();
        let pos = self.selection().map_or_else(
            || {
                if caret == self.surface.len_chars() {
                    caret.saturating_sub(1)
                } else {
                    caret
                }
            },
            |sel| sel.start,
        );
        let style = resolve_style(&self.surface, pos);

        let mut flags = String::new();
        let bold = self
            .commands
            .pending_state(&TagKey::Bold)
            .unwrap_or(style.bold);
        let italic = self
            .commands
            .pending_state(&TagKey::Italic)
            .unwrap_or(style.italic);
        let underline = self
            .commands
            .pending_state(&TagKey::Underline)
            .unwrap_or(style.underline);
        if bold {
            flags.push('B');
        }
        if italic {
            flags.push('I');
        }
        if underline {
            flags.push('U');
        }
        if flags.is_empty() {
            flags.push('-');
        }

        let family = style.family.clone().unwrap_or_else(|| "Sans".to_string());
        format!("{flags} {}pt {family}", style.size_points())
    }

    /// Scroll so the cursor line is inside the viewport.
    pub fn ensure_cursor_visible(&mut self) {
        let height = usize::from(self.view_height.max(1));
        if self.cursor.line < self.scroll_offset {
            self.scroll_offset = self.cursor.line;
        } else if self.cursor.line >= self.scroll_offset + height {
            self.scroll_offset = self.cursor.line + 1 - height;
        }
    }

    // --- Cursor movement ---

    pub(super) fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(1, false),
            Direction::Down => self.move_vertical(1, true),
        }
    }

    pub(super) fn move_line_start(&mut self) {
        self.cursor.set_col(0);
    }

    pub(super) fn move_line_end(&mut self) {
        let len = self.surface.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    pub(super) fn move_doc_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    pub(super) fn move_doc_end(&mut self) {
        let last = self.surface.line_count().saturating_sub(1);
        self.cursor.line = last;
        self.cursor.set_col(self.surface.line_len(last));
    }

    /// Move up or down by `lines`, keeping the sticky column.
    pub(super) fn move_vertical(&mut self, lines: usize, down: bool) {
        let last = self.surface.line_count().saturating_sub(1);
        self.cursor.line = if down {
            (self.cursor.line + lines).min(last)
        } else {
            self.cursor.line.saturating_sub(lines)
        };
        let max_col = self.surface.line_len(self.cursor.line);
        self.cursor.col = self.cursor.col_memory().min(max_col);
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.set_col(self.cursor.col - 1);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.surface.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.surface.line_len(self.cursor.line) {
            self.cursor.set_col(self.cursor.col + 1);
        } else if self.cursor.line + 1 < self.surface.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }
}
