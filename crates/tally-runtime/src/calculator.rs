//! Calculator state machine: `Idle → Validating → (Error | Ready)`.

use std::time::Instant;

use tally_core::error::{Result, TallyError};
use tally_core::formatting::format_duration;
use tally_core::messages::Messages;
use tally_pipeline::aggregator::Summary;
use tally_pipeline::analysis::{calculate, Calculation};
use tracing::debug;

use crate::rate_limiter::RateLimiter;

// ── CalculatorState ───────────────────────────────────────────────────────────

/// Where the calculator is in its lifecycle.
#[derive(Debug, Default)]
pub enum CalculatorState {
    /// Nothing calculated yet, or cleared.
    #[default]
    Idle,
    /// A calculation is running.
    Validating,
    /// The last calculation failed; no summary is available.
    Error(TallyError),
    /// The last calculation produced a summary.
    Ready(Calculation),
}

impl CalculatorState {
    pub fn is_ready(&self) -> bool {
        matches!(self, CalculatorState::Ready(_))
    }

    pub fn calculation(&self) -> Option<&Calculation> {
        match self {
            CalculatorState::Ready(calc) => Some(calc),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&TallyError> {
        match self {
            CalculatorState::Error(err) => Some(err),
            _ => None,
        }
    }
}

// ── Calculator ────────────────────────────────────────────────────────────────

/// Rate-limited front for [`calculate`] that remembers the last outcome.
#[derive(Debug, Default)]
pub struct Calculator {
    limiter: RateLimiter,
    state: CalculatorState,
}

impl Calculator {
    pub fn new(limiter: RateLimiter) -> Self {
        Self {
            limiter,
            state: CalculatorState::Idle,
        }
    }

    /// Run a calculation over `raw`.
    ///
    /// Returns `None` (and leaves the state untouched) when the request falls
    /// inside the rate-limit window.
    pub fn calculate(&mut self, raw: &str) -> Option<&CalculatorState> {
        self.calculate_at(raw, Instant::now())
    }

    /// [`Calculator::calculate`] at an explicit instant.
    pub fn calculate_at(&mut self, raw: &str, now: Instant) -> Option<&CalculatorState> {
        if !self.limiter.try_acquire_at(now) {
            debug!("calculate request dropped by rate limiter");
            return None;
        }

        self.state = CalculatorState::Validating;
        self.state = match calculate(raw) {
            Ok(calc) => CalculatorState::Ready(calc),
            Err(err) => {
                debug!(error = %err, "calculation failed");
                CalculatorState::Error(err)
            }
        };

        Some(&self.state)
    }

    /// Return to `Idle`, discarding any result or error.
    pub fn clear(&mut self) {
        self.state = CalculatorState::Idle;
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.state.calculation().map(|c| &c.summary)
    }

    /// Text to place on the clipboard for the current result.
    ///
    /// Fails with [`TallyError::NothingToCopy`] unless the calculator is
    /// `Ready`.
    pub fn clipboard_text(&self, messages: &Messages) -> Result<String> {
        let summary = self.summary().ok_or(TallyError::NothingToCopy)?;
        Ok(messages.clipboard_text(
            &format_duration(summary.total_seconds, true),
            summary.count,
        ))
    }
}
