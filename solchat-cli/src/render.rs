//! Drawing the input line and the suggestion dropdown below it.

use std::io::{self, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use solchat_core::config::UiConfig;
use solchat_core::{CompletionController, SuggestionState, leading_token};
use unicode_width::UnicodeWidthStr;

use crate::line_editor::LineEditor;

/// Width of the usage column in the dropdown.
const USAGE_COLUMN: usize = 26;

/// Window `[start, end)` of at most `max` rows that keeps `selected` visible.
pub fn visible_window(selected: usize, total: usize, max: usize) -> (usize, usize) {
    let max = max.max(1).min(total);
    let start = if selected < max { 0 } else { selected + 1 - max };
    (start, (start + max).min(total))
}

/// Dropdown lines for the current suggestions, one per visible candidate,
/// plus a counter line when the list is scrolled.
pub fn dropdown_rows(
    suggestions: &SuggestionState,
    max_visible: usize,
    color: bool,
    width: usize,
) -> Vec<String> {
    if !suggestions.is_open() {
        return Vec::new();
    }
    let candidates = suggestions.candidates();
    let selected = suggestions.highlighted_index();
    let (start, end) = visible_window(selected, candidates.len(), max_visible);

    let mut rows: Vec<String> = (start..end)
        .map(|i| {
            let cmd = candidates[i];
            let marker = if !color && i == selected { "> " } else { "  " };
            let line = truncate(
                &format!("{marker}{:<USAGE_COLUMN$} {}", cmd.usage(), cmd.description),
                width,
            );
            match (color, i == selected) {
                (true, true) => line.reverse().to_string(),
                (true, false) => line.cyan().to_string(),
                (false, _) => line,
            }
        })
        .collect();

    if candidates.len() > end - start {
        let counter = truncate(
            &format!("  ({}/{} commands)", end - start, candidates.len()),
            width,
        );
        rows.push(if color {
            counter.dark_grey().to_string()
        } else {
            counter
        });
    }
    rows
}

fn truncate(line: &str, width: usize) -> String {
    if line.width() <= width {
        return line.to_string();
    }
    let mut out = String::new();
    for ch in line.chars() {
        if (out.as_str().width() + ch.to_string().as_str().width()) > width {
            break;
        }
        out.push(ch);
    }
    out
}

/// Redraws the prompt, the buffer, the ghost hint and the dropdown.
pub struct Renderer<'a> {
    ui: &'a UiConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(ui: &'a UiConfig) -> Self {
        Self { ui }
    }

    fn write_line(&self, out: &mut impl Write, editor: &LineEditor) -> io::Result<()> {
        queue!(out, MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
        if self.ui.color {
            write!(out, "{}", self.ui.prompt.as_str().bold().blue())?;
        } else {
            write!(out, "{}", self.ui.prompt)?;
        }
        write!(out, "{}", editor.text())
    }

    pub fn draw(
        &self,
        out: &mut impl Write,
        editor: &LineEditor,
        controller: &CompletionController,
        width: usize,
    ) -> io::Result<()> {
        self.write_line(out, editor)?;

        let typing_trigger = editor.text() == leading_token(editor.text());
        if self.ui.ghost_text
            && typing_trigger
            && let Some(ghost) = controller.ghost_text()
        {
            if self.ui.color {
                write!(out, "{}", ghost.dark_grey())?;
            } else {
                write!(out, "{ghost}")?;
            }
        }

        let rows = dropdown_rows(
            controller.suggestions(),
            self.ui.max_visible_suggestions,
            self.ui.color,
            width,
        );
        for row in &rows {
            write!(out, "\r\n{row}")?;
        }
        if !rows.is_empty() {
            queue!(out, MoveUp(rows.len() as u16))?;
        }

        let column = self.ui.prompt.as_str().width() + editor.before_caret().width();
        queue!(out, MoveToColumn(column as u16))?;
        out.flush()
    }

    /// Leave the final line on screen and move below it.
    pub fn finish(&self, out: &mut impl Write, editor: &LineEditor) -> io::Result<()> {
        self.write_line(out, editor)?;
        write!(out, "\r\n")?;
        out.flush()
    }
}
