//! Search-text debouncing for the presentation side.
//!
//! Raw text events go in; a query comes out only after the text has been
//! stable for the quiet period, is long enough, and differs from the last
//! query that was let through.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

pub const QUIET_PERIOD: Duration = Duration::from_millis(300);
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    min_chars: usize,
    pending: Option<(String, Instant)>,
    last_emitted: Option<String>,
}

impl Debouncer {
    pub fn new(quiet_period: Duration, min_chars: usize) -> Self {
        Self {
            quiet_period,
            min_chars,
            pending: None,
            last_emitted: None,
        }
    }

    /// Records a text change, restarting the quiet period.
    pub fn push(&mut self, text: String, now: Instant) {
        self.pending = Some((text, now + self.quiet_period));
    }

    /// When the pending text will be ready, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {}
            _ => return None,
        }
        let (text, _) = self.pending.take()?;
        self.accept(text)
    }

    /// Releases the pending text without waiting for its deadline.
    pub fn flush(&mut self) -> Option<String> {
        let (text, _) = self.pending.take()?;
        self.accept(text)
    }

    fn accept(&mut self, text: String) -> Option<String> {
        if text.chars().count() < self.min_chars {
            return None;
        }
        if self.last_emitted.as_deref() == Some(text.as_str()) {
            return None;
        }
        self.last_emitted = Some(text.clone());
        Some(text)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(QUIET_PERIOD, MIN_QUERY_CHARS)
    }
}

/// Runs a [`Debouncer`] between two channels until either side closes.
/// Text still pending when the input closes is flushed.
pub async fn debounce_queries(
    mut input: mpsc::Receiver<String>,
    output: mpsc::Sender<String>,
    mut debouncer: Debouncer,
) {
    loop {
        let deadline = debouncer.deadline();
        tokio::select! {
            text = input.recv() => match text {
                Some(text) => debouncer.push(text, Instant::now()),
                None => {
                    if let Some(query) = debouncer.flush() {
                        let _ = output.send(query).await;
                    }
                    return;
                }
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(query) = debouncer.poll(Instant::now()) {
                    if output.send(query).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
