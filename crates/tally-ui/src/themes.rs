use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Absent or unparseable values are reported as
/// [`BackgroundType::Unknown`].
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    let Some(bg) = value.and_then(|v| v.split(';').next_back()) else {
        return BackgroundType::Unknown;
    };
    match bg.parse::<u8>() {
        Ok(n) if n <= 6 => BackgroundType::Dark,
        Ok(_) => BackgroundType::Light,
        Err(_) => BackgroundType::Unknown,
    }
}

/// Every style used by the vidtally terminal UI.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,
    /// The headline total in the results panel.
    pub highlight: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Editor ───────────────────────────────────────────────────────────────
    pub editor_border: Style,
    pub editor_line_number: Style,
    pub placeholder: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub panel_border: Style,
    pub modal_border: Style,
    pub key_hint: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            editor_border: Style::default().fg(Color::Cyan),
            editor_line_number: Style::default().fg(Color::DarkGray),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            panel_border: Style::default().fg(Color::DarkGray),
            modal_border: Style::default().fg(Color::Yellow),
            key_hint: Style::default().fg(Color::Cyan),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text with saturated accents so content stays legible on a white
    /// canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            highlight: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            editor_border: Style::default().fg(Color::Blue),
            editor_line_number: Style::default().fg(Color::Gray),
            placeholder: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            panel_border: Style::default().fg(Color::Gray),
            modal_border: Style::default().fg(Color::Magenta),
            key_hint: Style::default().fg(Color::Blue),
        }
    }

    /// Classic theme using only the basic 8-colour ANSI palette and no
    /// modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            highlight: Style::default().fg(Color::Green),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            editor_border: Style::default().fg(Color::White),
            editor_line_number: Style::default().fg(Color::DarkGray),
            placeholder: Style::default().fg(Color::DarkGray),

            panel_border: Style::default().fg(Color::DarkGray),
            modal_border: Style::default().fg(Color::White),
            key_hint: Style::default().fg(Color::Cyan),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
