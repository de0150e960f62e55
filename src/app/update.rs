use std::path::PathBuf;

use tracing::error;

use crate::storage::{self, Session};
use crate::style::{FONT_FAMILIES, FONT_SIZE_PRESETS, resolve_style};
use crate::surface::{TagKey, TextSurface};

use super::model::{Cursor, Direction, Mode, Model, PendingAction, PromptKind};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Editing
    /// Insert a character (including '\n') at the caret, replacing any
    /// selection.
    Insert(char),
    /// Delete the selection or the character before the caret.
    Backspace,
    /// Delete the selection or the character at the caret.
    DeleteForward,

    // Cursor
    /// Move the caret; `true` extends the selection.
    Move(Direction, bool),
    LineStart(bool),
    LineEnd(bool),
    DocStart(bool),
    DocEnd(bool),
    PageUp(bool),
    PageDown(bool),
    SelectAll,

    // Formatting
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    /// Grow or shrink the selection's size by steps of two points.
    NudgeSize(i32),
    /// Step the selection's size through the preset list.
    SizePreset { next: bool },
    /// Advance the selection's family through the family list.
    CycleFamily,

    // Files
    Save,
    RequestNew,
    RequestOpen,
    RequestQuit,

    // Unsaved-changes confirmation
    ConfirmSave,
    ConfirmDiscard,

    // Status-line path prompt
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,

    /// Leave the current modal state.
    Cancel,
    /// Terminal was resized to (width, height).
    Resize(u16, u16),
}

/// Apply a message to the model. Pure state transition; all I/O it does
/// (save/load) is synchronous and reported through the status line.
pub fn update(model: &mut Model, message: Message) {
    match message {
        Message::Insert(ch) => {
            let mut buf = [0u8; 4];
            insert_text(model, ch.encode_utf8(&mut buf));
        }
        Message::Backspace => {
            if let Some(sel) = model.selection() {
                model.surface.remove(sel.clone());
                model.set_caret(sel.start);
                model.anchor = None;
            } else {
                let caret = model.caret();
                if caret > 0 {
                    model.surface.remove(caret - 1..caret);
                    model.set_caret(caret - 1);
                }
            }
            model.status = None;
            model.ensure_cursor_visible();
        }
        Message::DeleteForward => {
            if let Some(sel) = model.selection() {
                model.surface.remove(sel.clone());
                model.set_caret(sel.start);
                model.anchor = None;
            } else {
                let caret = model.caret();
                if caret < model.surface.len_chars() {
                    model.surface.remove(caret..caret + 1);
                }
            }
            model.status = None;
        }

        Message::Move(dir, select) => move_caret(model, dir, select),
        Message::LineStart(select) => movement(model, select, Model::move_line_start),
        Message::LineEnd(select) => movement(model, select, Model::move_line_end),
        Message::DocStart(select) => movement(model, select, Model::move_doc_start),
        Message::DocEnd(select) => movement(model, select, Model::move_doc_end),
        Message::PageUp(select) => {
            let page = usize::from(model.view_height.max(1));
            movement(model, select, |m| m.move_vertical(page, false));
        }
        Message::PageDown(select) => {
            let page = usize::from(model.view_height.max(1));
            movement(model, select, |m| m.move_vertical(page, true));
        }
        Message::SelectAll => {
            model.anchor = Some(0);
            let end = model.surface.len_chars();
            model.set_caret(end);
        }

        Message::ToggleBold => toggle(model, TagKey::Bold),
        Message::ToggleItalic => toggle(model, TagKey::Italic),
        Message::ToggleUnderline => toggle(model, TagKey::Underline),
        Message::NudgeSize(delta) => {
            let sel = model.selection();
            match model.commands.nudge_size(&mut model.surface, sel, delta) {
                Some(applied) => model.set_status(format!("Size: {applied}pt")),
                None => model.set_status("Select text to change its size"),
            }
        }
        Message::SizePreset { next } => size_preset(model, next),
        Message::CycleFamily => cycle_family(model),

        Message::Save => save_or_prompt(model, None),
        Message::RequestNew => request(model, PendingAction::NewDocument),
        Message::RequestOpen => request(model, PendingAction::OpenPrompt),
        Message::RequestQuit => request(model, PendingAction::Quit),

        Message::ConfirmSave => {
            if let Mode::Confirm(action) = &model.mode {
                let action = *action;
                model.mode = Mode::Edit;
                save_or_prompt(model, Some(action));
            }
        }
        Message::ConfirmDiscard => {
            if let Mode::Confirm(action) = &model.mode {
                let action = *action;
                model.mode = Mode::Edit;
                run_pending(model, Some(action));
            }
        }

        Message::PromptInput(ch) => {
            if let Mode::Prompt { input, .. } = &mut model.mode {
                input.push(ch);
            }
        }
        Message::PromptBackspace => {
            if let Mode::Prompt { input, .. } = &mut model.mode {
                input.pop();
            }
        }
        Message::PromptSubmit => prompt_submit(model),

        Message::Cancel => {
            model.mode = Mode::Edit;
            model.status = None;
        }
        Message::Resize(_w, h) => {
            // One row is reserved for the status bar.
            model.view_height = h.saturating_sub(1).max(1);
            model.ensure_cursor_visible();
        }
    }
}

/// Insert text at the caret, replacing the selection and applying any
/// caret-anchored pending format to the inserted range.
fn insert_text(model: &mut Model, text: &str) {
    if let Some(sel) = model.selection() {
        model.surface.remove(sel.clone());
        model.set_caret(sel.start);
        model.anchor = None;
    }
    let at = model.caret();
    model.surface.insert(at, text);
    let len = text.chars().count();
    model.commands.apply_pending(&mut model.surface, at..at + len);
    model.set_caret(at + len);
    model.status = None;
    model.ensure_cursor_visible();
}

/// Shared movement plumbing: pending format dies on caret movement, and a
/// shift-move grows the selection from the current caret.
fn movement(model: &mut Model, select: bool, f: impl FnOnce(&mut Model)) {
    model.commands.clear_pending();
    if select {
        if model.anchor.is_none() {
            model.anchor = Some(model.caret());
        }
    } else {
        model.anchor = None;
    }
    f(model);
    model.ensure_cursor_visible();
}

fn move_caret(model: &mut Model, dir: Direction, select: bool) {
    // A plain arrow with an active selection collapses to the edge in the
    // direction of travel instead of moving.
    if !select {
        if let Some(sel) = model.selection() {
            model.commands.clear_pending();
            let edge = match dir {
                Direction::Left | Direction::Up => sel.start,
                Direction::Right | Direction::Down => sel.end,
            };
            model.set_caret(edge);
            model.anchor = None;
            if matches!(dir, Direction::Up | Direction::Down) {
                model.move_cursor(dir);
            }
            model.ensure_cursor_visible();
            return;
        }
    }
    movement(model, select, |m| m.move_cursor(dir));
}

fn toggle(model: &mut Model, key: TagKey) {
    let sel = model.selection();
    let caret = model.caret();
    model.commands.toggle(&mut model.surface, sel, caret, key);
}

fn size_preset(model: &mut Model, next: bool) {
    let Some(sel) = model.selection() else {
        model.set_status("Select text to change its size");
        return;
    };
    let current = resolve_style(&model.surface, sel.start).size_points();
    let target = if next {
        FONT_SIZE_PRESETS
            .iter()
            .copied()
            .find(|&p| p > current + 0.01)
            .unwrap_or(current)
    } else {
        FONT_SIZE_PRESETS
            .iter()
            .rev()
            .copied()
            .find(|&p| p < current - 0.01)
            .unwrap_or(current)
    };
    if let Some(applied) = model.commands.set_size(&mut model.surface, Some(sel), target) {
        model.set_status(format!("Size: {applied}pt"));
    }
}

fn cycle_family(model: &mut Model) {
    let Some(sel) = model.selection() else {
        model.set_status("Select text to change its family");
        return;
    };
    let current = resolve_style(&model.surface, sel.start).family;
    let idx = current
        .as_deref()
        .and_then(|f| FONT_FAMILIES.iter().position(|&n| n == f));
    let name = FONT_FAMILIES[idx.map_or(0, |i| (i + 1) % FONT_FAMILIES.len())];
    model.commands.set_family(&mut model.surface, Some(sel), name);
    model.set_status(format!("Family: {name}"));
}

/// Run `action` now, or route through the unsaved-changes confirmation.
fn request(model: &mut Model, action: PendingAction) {
    if model.surface.is_dirty() {
        model.mode = Mode::Confirm(action);
    } else {
        run_pending(model, Some(action));
    }
}

fn run_pending(model: &mut Model, action: Option<PendingAction>) {
    match action {
        None => {}
        Some(PendingAction::Quit) => model.should_quit = true,
        Some(PendingAction::NewDocument) => new_document(model),
        Some(PendingAction::OpenPrompt) => {
            model.mode = Mode::Prompt {
                kind: PromptKind::Open,
                input: String::new(),
            };
        }
    }
}

/// Save to the session path, or prompt for one first.
fn save_or_prompt(model: &mut Model, and_then: Option<PendingAction>) {
    if model.session.path().is_some() {
        if do_save(model) {
            run_pending(model, and_then);
        }
    } else {
        model.mode = Mode::Prompt {
            kind: PromptKind::SaveAs { and_then },
            input: "Untitled.rtf".to_string(),
        };
    }
}

fn do_save(model: &mut Model) -> bool {
    let Some(path) = model.session.path() else {
        return false;
    };
    let path = path.to_path_buf();
    match storage::save_document(&path, &model.surface, model.session.format()) {
        Ok(()) => {
            model.surface.mark_clean();
            model.set_status(format!("Saved {}", model.session.display_name()));
            true
        }
        Err(err) => {
            error!(%err, "save failed");
            model.set_status(err.to_string());
            false
        }
    }
}

fn prompt_submit(model: &mut Model) {
    let Mode::Prompt { kind, input } = std::mem::replace(&mut model.mode, Mode::Edit) else {
        return;
    };
    let input = input.trim();
    if input.is_empty() {
        model.status = None;
        return;
    }
    let path = PathBuf::from(input);
    match kind {
        PromptKind::SaveAs { and_then } => {
            model.session.set_path(path);
            if do_save(model) {
                run_pending(model, and_then);
            }
        }
        PromptKind::Open => open_document(model, path),
    }
}

fn new_document(model: &mut Model) {
    let forced = model.session.forced_plain();
    model.surface = TextSurface::empty();
    model.session = Session::untitled().force_plain(forced);
    reset_view(model);
    model.set_status("New document");
}

fn open_document(model: &mut Model, path: PathBuf) {
    let session = Session::with_path(path.clone()).force_plain(model.session.forced_plain());
    match storage::load_document(&path, session.format()) {
        Ok(loaded) => {
            model.surface = loaded.surface;
            model.session = session;
            reset_view(model);
            if loaded.fell_back_to_plain {
                model.set_status("Could not parse RTF; loaded as plain text");
            } else {
                model.set_status(format!("Opened {}", model.session.display_name()));
            }
        }
        Err(err) => {
            error!(%err, "open failed");
            model.set_status(err.to_string());
        }
    }
}

fn reset_view(model: &mut Model) {
    model.cursor = Cursor::new();
    model.anchor = None;
    model.scroll_offset = 0;
    model.commands.clear_pending();
}
