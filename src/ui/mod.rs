//! Terminal rendering: the document pane and the status bar.
//!
//! Terminal cells cannot change size or family, so those attributes are
//! surfaced through the status bar's style echo; bold, italic, underline,
//! and the selection render as cell modifiers.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{Mode, Model, PendingAction, PromptKind};
use crate::style::resolve_style;

/// Render the whole frame: document area above, one status row below.
pub fn render(frame: &mut Frame, model: &Model) {
    let [doc_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());
    render_document(frame, model, doc_area);
    render_status(frame, model, status_area);
    position_cursor(frame, model, doc_area, status_area);
}

fn render_document(frame: &mut Frame, model: &Model, area: Rect) {
    let height = usize::from(area.height);
    let selection = model.selection();
    let last = (model.scroll_offset + height).min(model.surface.line_count());

    let lines: Vec<Line<'_>> = (model.scroll_offset..last)
        .map(|line_idx| styled_line(model, line_idx, selection.as_ref()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Build one display line, grouping characters with equal styling into
/// single spans.
fn styled_line(model: &Model, line_idx: usize, selection: Option<&Range<usize>>) -> Line<'static> {
    let Some(text) = model.surface.line_text(line_idx) else {
        return Line::default();
    };
    let line_start = model.surface.line_to_char(line_idx);

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for (offset, ch) in text.chars().enumerate() {
        let style = char_style(model, line_start + offset, selection);
        if run_style == Some(style) {
            run.push(ch);
        } else {
            if let Some(prev) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            run.push(ch);
            run_style = Some(style);
        }
    }
    if let Some(prev) = run_style {
        spans.push(Span::styled(run, prev));
    }
    Line::from(spans)
}

fn char_style(model: &Model, pos: usize, selection: Option<&Range<usize>>) -> Style {
    let resolved = resolve_style(&model.surface, pos);
    let mut style = Style::default();
    if resolved.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if resolved.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if resolved.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if selection.is_some_and(|sel| sel.contains(&pos)) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_status(frame: &mut Frame, model: &Model, area: Rect) {
    let text = match &model.mode {
        Mode::Prompt { kind, input } => format!("{}{input}", prompt_label(kind)),
        Mode::Confirm(action) => confirm_text(*action),
        Mode::Edit => {
            let left = model.status.as_ref().map_or_else(
                || model.title(),
                |msg| format!("{}  {msg}", model.title()),
            );
            let right = model.style_echo();
            let width = usize::from(area.width);
            let pad = width.saturating_sub(left.width() + right.width() + 1);
            format!("{left} {}{right}", " ".repeat(pad))
        }
    };
    let bar = Paragraph::new(text).style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(bar, area);
}

fn prompt_label(kind: &PromptKind) -> &'static str {
    match kind {
        PromptKind::SaveAs { .. } => "Save as: ",
        PromptKind::Open => "Open: ",
    }
}

fn confirm_text(action: PendingAction) -> String {
    let what = match action {
        PendingAction::Quit => "quitting",
        PendingAction::NewDocument => "starting a new document",
        PendingAction::OpenPrompt => "opening another file",
    };
    format!("Save changes before {what}? (y)es / (n)o / Esc cancels")
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "columns are clamped to the terminal area first"
)]
fn position_cursor(frame: &mut Frame, model: &Model, doc_area: Rect, status_area: Rect) {
    if let Mode::Prompt { kind, input } = &model.mode {
        let col = prompt_label(kind).width() + input.width();
        let x = status_area.x + col.min(usize::from(status_area.width.saturating_sub(1))) as u16;
        frame.set_cursor_position((x, status_area.y));
        return;
    }

    let Some(row) = model.cursor.line.checked_sub(model.scroll_offset) else {
        return;
    };
    if row >= usize::from(doc_area.height) {
        return;
    }
    let text = model.surface.line_text(model.cursor.line).unwrap_or_default();
    let col_width: usize = text
        .chars()
        .take(model.cursor.col)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    let x = doc_area.x + col_width.min(usize::from(doc_area.width.saturating_sub(1))) as u16;
    frame.set_cursor_position((x, doc_area.y + row as u16));
}
