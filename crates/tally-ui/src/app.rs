//! Main application state and TUI event loop for vidtally.
//!
//! [`App`] owns the theme, the editor buffer, the calculator state machine and
//! the live-validation debouncer. Key handling is synchronous; the only async
//! step is the clipboard copy, which the event loop awaits directly.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::Show,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;
use tracing::{debug, info};

use tally_core::error::TallyError;
use tally_core::limits::SUCCESS_NOTICE_TTL;
use tally_core::messages::Messages;
use tally_pipeline::analysis::live_feedback;
use tally_runtime::calculator::{Calculator, CalculatorState};
use tally_runtime::clipboard::Clipboard;
use tally_runtime::debouncer::Debouncer;

use crate::components::header::Header;
use crate::components::help::render_help;
use crate::components::results::render_results;
use crate::components::status::{Notice, NoticeKind};
use crate::editor::{render_editor, Editor};
use crate::themes::Theme;

/// How long the event loop waits for input before servicing timers.
const TICK_RATE: Duration = Duration::from_millis(50);

/// Rows of the results panel: total, two speed totals, count, average, max,
/// plus the border.
const RESULTS_HEIGHT: u16 = 8;

// ── AppCommand ────────────────────────────────────────────────────────────────

/// Follow-up work a key press asks the event loop to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    CopyResult,
}

// ── TerminalGuard ─────────────────────────────────────────────────────────────

/// Leaves raw mode and the alternate screen on drop, including when the event
/// loop returns early with an error or its future is dropped.
pub struct TerminalGuard<W: Write> {
    out: W,
    enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Arm the guard. `enhanced` records whether keyboard enhancement flags
    /// were (or will be) pushed and need popping.
    pub fn new(out: W, enhanced: bool) -> Self {
        Self { out, enhanced }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
        let _ = execute!(self.out, DisableBracketedPaste, LeaveAlternateScreen, Show);
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the vidtally TUI.
pub struct App {
    pub theme: Theme,
    pub messages: Messages,
    pub editor: Editor,
    pub calculator: Calculator,
    /// Result of the last user action (calculate, copy).
    pub notice: Option<Notice>,
    /// Format warning from the debounced live check.
    pub live_warning: Option<Notice>,
    pub show_help: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    clipboard: Clipboard,
    debouncer: Debouncer<String>,
    live_rx: mpsc::Receiver<String>,
}

impl App {
    /// Construct a new application. Edits schedule tokio tasks, so keys must
    /// be handled inside a runtime.
    pub fn new(theme_name: &str, messages: Messages) -> Self {
        let (debouncer, live_rx) = Debouncer::with_default_delay();
        Self {
            theme: Theme::from_name(theme_name),
            messages,
            editor: Editor::new(),
            calculator: Calculator::default(),
            notice: None,
            live_warning: None,
            show_help: false,
            should_quit: false,
            clipboard: Clipboard::default(),
            debouncer,
            live_rx,
        }
    }

    /// Replace the clipboard backend.
    pub fn with_clipboard(mut self, clipboard: Clipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the interactive TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a short timeout so that debounced
    /// live-validation results, which arrive on an async channel, are drained
    /// with `try_recv` between key presses.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        // Ctrl+Enter is only distinguishable from Enter with the kitty
        // keyboard protocol; F5 covers terminals without it.
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        let _guard = TerminalGuard::new(io::stdout(), enhanced);

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }
        debug!(enhanced, "terminal initialised");

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Some(AppCommand::CopyResult) = self.handle_key(key) {
                            self.copy_result().await;
                        }
                    }
                    Event::Paste(text) => self.handle_paste(&text),
                    _ => {}
                }
            }

            self.drain_live_feedback();
            self.expire_notices(Instant::now());

            if self.should_quit {
                return Ok(());
            }
        }
    }

    // ── Input handling ────────────────────────────────────────────────────────

    /// Apply a key press. Returns a command when the loop has async work to do.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AppCommand> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.show_help {
            match key.code {
                KeyCode::Esc | KeyCode::F(1) => self.show_help = false,
                KeyCode::Char('h') if ctrl => self.show_help = false,
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('h') if ctrl => self.show_help = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(5) => self.calculate(),
            KeyCode::Enter if ctrl => self.calculate(),
            KeyCode::Char('l') if ctrl => self.clear(),
            KeyCode::Char('y') if ctrl => return Some(AppCommand::CopyResult),
            KeyCode::Enter => {
                self.editor.newline();
                self.on_edit();
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                self.on_edit();
            }
            KeyCode::Delete => {
                self.editor.delete();
                self.on_edit();
            }
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.move_home(),
            KeyCode::End => self.editor.move_end(),
            KeyCode::Tab => {
                self.editor.insert_char('\t');
                self.on_edit();
            }
            KeyCode::Char(c)
                if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.editor.insert_char(c);
                self.on_edit();
            }
            _ => {}
        }
        None
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.show_help {
            return;
        }
        self.editor.insert_str(text);
        self.on_edit();
    }

    fn on_edit(&mut self) {
        self.debouncer.trigger(self.editor.text());
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    /// Run the pipeline over the editor contents and update the notice.
    pub fn calculate(&mut self) {
        let text = self.editor.text();
        let Some(state) = self.calculator.calculate(&text) else {
            return;
        };

        self.notice = match state {
            CalculatorState::Ready(calc) => {
                info!(
                    count = calc.summary.count,
                    total_seconds = calc.summary.total_seconds,
                    advisories = calc.advisories.len(),
                    "calculation ready"
                );
                if calc.advisories.is_empty() {
                    None
                } else {
                    let text = calc
                        .advisories
                        .iter()
                        .map(|a| self.messages.advisory(a))
                        .collect::<Vec<_>>()
                        .join("; ");
                    Some(Notice::new(text, NoticeKind::Warning))
                }
            }
            CalculatorState::Error(err) => {
                Some(Notice::new(self.messages.error(err), NoticeKind::Error))
            }
            CalculatorState::Idle | CalculatorState::Validating => None,
        };
    }

    /// Empty the editor and forget any result.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.editor.clear();
        self.calculator.clear();
        self.notice = None;
        self.live_warning = None;
    }

    /// Preload the editor, e.g. from the `[INPUT]` file, and schedule the
    /// live check for it.
    pub fn load_text(&mut self, text: &str) {
        self.editor.set_text(text);
        let lines = self.editor.lines().iter().filter(|l| !l.trim().is_empty()).count();
        self.notice = Some(Notice::new(self.messages.input_loaded(lines), NoticeKind::Info));
        self.on_edit();
    }

    /// Copy the current summary line to the clipboard.
    pub async fn copy_result(&mut self) {
        let text = match self.calculator.clipboard_text(&self.messages) {
            Ok(text) => text,
            Err(TallyError::NothingToCopy) => {
                self.notice = Some(Notice::new(
                    self.messages.nothing_to_copy(),
                    NoticeKind::Warning,
                ));
                return;
            }
            Err(err) => {
                self.notice = Some(Notice::new(self.messages.error(&err), NoticeKind::Error));
                return;
            }
        };

        self.notice = Some(match self.clipboard.copy(&text).await {
            Ok(method) => {
                info!(?method, "result copied");
                Notice::transient(
                    self.messages.copy_success(),
                    NoticeKind::Success,
                    Instant::now(),
                    SUCCESS_NOTICE_TTL,
                )
            }
            Err(err) => {
                debug!(error = %err, "copy failed");
                Notice::new(self.messages.copy_failure(), NoticeKind::Error)
            }
        });
    }

    // ── Timers ────────────────────────────────────────────────────────────────

    /// Apply any debounced live-validation payloads (non-blocking).
    pub fn drain_live_feedback(&mut self) {
        while let Ok(text) = self.live_rx.try_recv() {
            self.apply_live_feedback(&text);
        }
    }

    fn apply_live_feedback(&mut self, text: &str) {
        self.live_warning = live_feedback(text)
            .map(|advisory| Notice::new(self.messages.advisory(&advisory), NoticeKind::Warning));
    }

    pub fn expire_notices(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let labels = self.messages.ui_labels();
        let [header_area, editor_area, status_area, results_area] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(RESULTS_HEIGHT),
        ])
        .areas(frame.area());

        let header = Header::new(labels.app_title, labels.key_hints, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        render_editor(
            frame,
            editor_area,
            &self.editor,
            labels.editor_title,
            labels.placeholder,
            &self.theme,
        );

        let status = self
            .notice
            .as_ref()
            .or(self.live_warning.as_ref())
            .map(|n| n.to_line(&self.theme))
            .unwrap_or_else(|| Line::from(""));
        frame.render_widget(Paragraph::new(status), status_area);

        let formatted = self.calculator.summary().map(|s| s.formatted());
        render_results(
            frame,
            results_area,
            formatted.as_ref(),
            self.messages,
            &self.theme,
        );

        if self.show_help {
            render_help(frame, frame.area(), self.messages, &self.theme);
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
