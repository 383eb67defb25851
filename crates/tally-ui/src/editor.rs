//! Multi-line text buffer backing the duration input area.
//!
//! The cursor is tracked as `(row, column)` where the column counts `char`s,
//! so every edit lands on a character boundary. Display widths for wide
//! characters come from [`unicode_width`].

use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Width of the line-number gutter, including the trailing space.
const GUTTER_WIDTH: u16 = 5;

// ── Editor ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Editor {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full buffer contents joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the buffer and park the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = self.lines.len() - 1;
        self.col = self.current_len();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as `(row, char column)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Terminal columns between the line start and the cursor.
    pub fn display_column(&self) -> usize {
        self.lines[self.row]
            .chars()
            .take(self.col)
            .collect::<String>()
            .width()
    }

    // ── Editing ───────────────────────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        let idx = self.byte_index();
        self.lines[self.row].insert(idx, c);
        self.col += 1;
    }

    /// Insert pasted text, honouring embedded newlines.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        for c in normalized.chars() {
            self.insert_char(c);
        }
    }

    pub fn newline(&mut self) {
        let idx = self.byte_index();
        let rest = self.lines[self.row].split_off(idx);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let idx = self.byte_index();
            self.lines[self.row].remove(idx);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_len();
            self.lines[self.row].push_str(&line);
        }
    }

    /// Delete the character under the cursor, joining lines at line end.
    pub fn delete(&mut self) {
        if self.col < self.current_len() {
            let idx = self.byte_index();
            self.lines[self.row].remove(idx);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    // ── Movement ──────────────────────────────────────────────────────────────

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.current_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.current_len());
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.current_len();
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn current_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn byte_index(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(self.col)
            .map_or(line.len(), |(i, _)| i)
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Draw the editor with a line-number gutter and place the terminal cursor.
///
/// Scrolls vertically so the cursor row stays visible. `placeholder` is shown
/// dimmed while the buffer is empty.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    editor: &Editor,
    title: &str,
    placeholder: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.editor_border)
        .title(format!(" {} ", title));
    let inner = block.inner(area);

    let visible_rows = usize::from(inner.height.max(1));
    let (row, _) = editor.cursor();
    let scroll = (row + 1).saturating_sub(visible_rows);

    let lines: Vec<Line> = if editor.is_empty() && editor.lines().len() == 1 {
        vec![Line::from(vec![
            gutter_span(1, theme.editor_line_number),
            Span::styled(placeholder.to_string(), theme.placeholder),
        ])]
    } else {
        editor
            .lines()
            .iter()
            .enumerate()
            .skip(scroll)
            .take(visible_rows)
            .map(|(i, line)| {
                Line::from(vec![
                    gutter_span(i + 1, theme.editor_line_number),
                    Span::styled(line.clone(), theme.text),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);

    if inner.width > GUTTER_WIDTH && inner.height > 0 {
        // The cursor sits at the right edge once the line outgrows the pane.
        let text_width = usize::from(inner.width - GUTTER_WIDTH - 1);
        let column = editor.display_column().min(text_width) as u16;
        let x = inner.x.saturating_add(GUTTER_WIDTH).saturating_add(column);
        let y = inner
            .y
            .saturating_add(u16::try_from(row - scroll).unwrap_or(u16::MAX));
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn gutter_span(number: usize, style: Style) -> Span<'static> {
    Span::styled(format!("{:>4} ", number), style)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
