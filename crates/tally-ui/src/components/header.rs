use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Width of the `=` rule under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Screen header rendering three lines:
///
/// 1. Application title with sparkle decorations.
/// 2. A 60-column `=` separator.
/// 3. Key hints.
pub struct Header<'a> {
    pub title: &'a str,
    pub hints: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, hints: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            hints,
            theme,
        }
    }

    /// Number of rows [`Header::to_lines`] produces.
    pub const HEIGHT: u16 = 3;

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(format!(" {} ", self.title), self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            Line::from(Span::styled(self.hints, self.theme.key_hint)),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
