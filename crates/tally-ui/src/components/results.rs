//! Summary panel shown after a successful calculation.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use tally_core::messages::Messages;
use tally_pipeline::aggregator::FormattedSummary;

use crate::themes::Theme;

/// Width the labels are padded to so the values line up.
const LABEL_WIDTH: usize = 16;

pub struct ResultsPanel<'a> {
    pub summary: &'a FormattedSummary,
    pub messages: Messages,
    pub theme: &'a Theme,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(summary: &'a FormattedSummary, messages: Messages, theme: &'a Theme) -> Self {
        Self {
            summary,
            messages,
            theme,
        }
    }

    /// One line per field: total, each speed total, count, average, max.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let labels = self.messages.summary_labels();
        let mut lines = Vec::with_capacity(4 + self.summary.speeds.len());

        lines.push(self.row(labels.total.to_string(), self.summary.total.clone(), true));
        for (factor, value) in &self.summary.speeds {
            lines.push(self.row(self.messages.speed_label(factor), value.clone(), false));
        }
        lines.push(self.row(labels.count.to_string(), self.summary.count.to_string(), false));
        lines.push(self.row(labels.average.to_string(), self.summary.average.clone(), false));
        lines.push(self.row(labels.max.to_string(), self.summary.max.clone(), false));
        lines
    }

    fn row(&self, label: String, value: String, headline: bool) -> Line<'a> {
        let value_style = if headline {
            self.theme.highlight
        } else {
            self.theme.value
        };
        Line::from(vec![
            Span::styled(pad_label(&label), self.theme.label),
            Span::styled(value, value_style),
        ])
    }
}

/// Pad `label` plus a colon to [`LABEL_WIDTH`] display columns.
fn pad_label(label: &str) -> String {
    use unicode_width::UnicodeWidthStr;

    let text = format!("{}:", label);
    let pad = LABEL_WIDTH.saturating_sub(text.width()).max(1);
    format!("{}{}", text, " ".repeat(pad))
}

/// Draw the results panel, or an empty bordered box when there is no summary.
pub fn render_results(
    frame: &mut Frame,
    area: Rect,
    summary: Option<&FormattedSummary>,
    messages: Messages,
    theme: &Theme,
) {
    let title = format!(" {} ", messages.ui_labels().results_title);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border)
        .title(title);

    let lines = match summary {
        Some(summary) => ResultsPanel::new(summary, messages, theme).to_lines(),
        None => vec![Line::from(Span::styled("-", theme.dim))],
    };

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tally_core::messages::Locale;
    use tally_pipeline::aggregator::aggregate;

    fn sample() -> FormattedSummary {
        aggregate(&[5400, 2700]).expect("summary").formatted()
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_results_lines_english() {
        let theme = Theme::dark();
        let summary = sample();
        let lines = ResultsPanel::new(&summary, Messages::new(Locale::English), &theme).to_lines();
        let texts = texts(&lines);

        assert_eq!(texts.len(), 6);
        assert!(texts[0].starts_with("Total duration:"));
        assert!(texts[0].ends_with("02:15:00"));
        assert!(texts[1].starts_with("At 1.5x:") && texts[1].ends_with("01:30:00"));
        assert!(texts[2].starts_with("At 2.0x:") && texts[2].ends_with("01:07:30"));
        assert!(texts[3].ends_with('2'));
        assert!(texts[4].ends_with("01:07:30"));
        assert!(texts[5].ends_with("01:30:00"));
    }

    #[test]
    fn test_results_total_uses_highlight_style() {
        let theme = Theme::dark();
        let summary = sample();
        let lines = ResultsPanel::new(&summary, Messages::default(), &theme).to_lines();
        assert_eq!(lines[0].spans[1].style, theme.highlight);
        assert_eq!(lines[3].spans[1].style, theme.value);
    }

    #[test]
    fn test_results_lines_chinese() {
        let theme = Theme::dark();
        let summary = sample();
        let lines = ResultsPanel::new(&summary, Messages::new(Locale::Chinese), &theme).to_lines();
        let texts = texts(&lines);
        assert!(texts[0].starts_with("总时长:"));
        assert!(texts[1].starts_with("1.5x倍速:"));
    }

    #[test]
    fn test_pad_label_aligns_wide_text() {
        assert_eq!(pad_label("Average").len(), LABEL_WIDTH);
        // Four CJK characters plus colon occupy 9 columns.
        assert!(pad_label("平均时长").ends_with(&" ".repeat(LABEL_WIDTH - 9)));
    }

    #[test]
    fn test_render_results_does_not_panic() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let summary = sample();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_results(frame, area, Some(&summary), Messages::default(), &theme);
            })
            .unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_results(frame, area, None, Messages::default(), &theme);
            })
            .unwrap();
    }
}
