//! Cancellable delayed delivery for live validation.
//!
//! Each [`Debouncer::trigger`] aborts the previously scheduled task and
//! schedules a new one. Only the payload of the most recent trigger is ever
//! delivered, `delay` after that trigger, through the `mpsc` receiver returned
//! by [`Debouncer::new`].

use std::time::Duration;

use tally_core::limits::DEBOUNCE_DELAY;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::Sender<T>,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its payloads arrive on.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(delay: Duration) -> (Self, mpsc::Receiver<T>) {
        // Superseded payloads are aborted before sending, so the buffer only
        // ever needs room for a handful of deliveries.
        let (tx, rx) = mpsc::channel(16);
        (
            Self {
                delay,
                tx,
                pending: None,
            },
            rx,
        )
    }

    /// A debouncer using the live-validation delay.
    pub fn with_default_delay() -> (Self, mpsc::Receiver<T>) {
        Self::new(DEBOUNCE_DELAY)
    }

    /// Schedule `payload` for delivery, cancelling any earlier schedule.
    pub fn trigger(&mut self, payload: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(payload).await.is_err() {
                tracing::debug!("debounce receiver dropped; payload discarded");
            }
        }));
    }

    /// Cancel the pending delivery, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a delivery is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
