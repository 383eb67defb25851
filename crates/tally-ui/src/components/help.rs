//! Centered help modal.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tally_core::messages::Messages;

use crate::themes::Theme;

/// Rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub fn help_lines<'a>(messages: Messages, theme: &'a Theme) -> Vec<Line<'a>> {
    messages
        .help_lines()
        .iter()
        .map(|line| {
            let style = if line.starts_with("  ") {
                theme.key_hint
            } else {
                theme.text
            };
            Line::from(Span::styled(*line, style))
        })
        .collect()
}

/// Draw the help modal over whatever is already on screen.
pub fn render_help(frame: &mut Frame, area: Rect, messages: Messages, theme: &Theme) {
    let modal = centered_rect(area, 70, 80);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.modal_border)
        .title(format!(" {} ", messages.ui_labels().help_title));

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(Text::from(help_lines(messages, theme)))
            .block(block)
            .wrap(Wrap { trim: false }),
        modal,
    );
}
