//! One-line notice area below the editor.

use std::time::{Duration, Instant};

use ratatui::text::{Line, Span};

use crate::themes::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A message shown to the user, optionally expiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn new(text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: None,
        }
    }

    /// A notice that disappears `ttl` after `now`.
    pub fn transient(text: impl Into<String>, kind: NoticeKind, now: Instant, ttl: Duration) -> Self {
        Self {
            expires_at: Some(now + ttl),
            ..Self::new(text, kind)
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|t| now >= t)
    }

    pub fn to_line<'a>(&self, theme: &'a Theme) -> Line<'a> {
        let (icon, style) = match self.kind {
            NoticeKind::Info => ("ℹ", theme.info),
            NoticeKind::Success => ("✔", theme.success),
            NoticeKind::Warning => ("⚠", theme.warning),
            NoticeKind::Error => ("✖", theme.error),
        };
        Line::from(vec![
            Span::styled(format!("{} ", icon), style),
            Span::styled(self.text.clone(), style),
        ])
    }
}
