//! Cancellable question timers
//!
//! Runs the one-second countdown and the lock-to-advance delay as tokio
//! tasks that report back over a channel. Each event carries the index
//! of the question it was armed for, so a consumer can drop events that
//! arrive after the question has changed.

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Event emitted by an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One countdown period elapsed for `question`
    Tick { question: usize },
    /// The feedback delay for `question` elapsed
    Advance { question: usize },
}

impl TimerEvent {
    pub fn question(&self) -> usize {
        match self {
            TimerEvent::Tick { question } | TimerEvent::Advance { question } => *question,
        }
    }
}

/// A spawned timer task that stops when cancelled or dropped
#[derive(Debug)]
struct ArmedTimer {
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ArmedTimer {
    fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ArmedTimer {
    fn drop(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(()); // Receiver may already be gone
        }
        self.handle.abort();
    }
}

/// Countdown and advance timers for a quiz session.
///
/// At most one countdown and one pending advance exist at a time;
/// re-arming either replaces the previous one. Must be used from within
/// a tokio runtime.
#[derive(Debug)]
pub struct QuestionTimer {
    events_tx: mpsc::Sender<TimerEvent>,
    tick_period: Duration,
    advance_delay: Duration,
    countdown: Option<ArmedTimer>,
    advance: Option<ArmedTimer>,
}

impl QuestionTimer {
    /// Create a timer pair reporting on `events_tx`
    pub fn new(
        events_tx: mpsc::Sender<TimerEvent>,
        tick_period: Duration,
        advance_delay: Duration,
    ) -> Self {
        Self {
            events_tx,
            tick_period,
            advance_delay,
            countdown: None,
            advance: None,
        }
    }

    /// Start ticking for `question`, replacing any running countdown
    pub fn start_countdown(&mut self, question: usize) {
        self.stop_countdown();

        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let events_tx = self.events_tx.clone();
        let period = self.tick_period;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if events_tx.send(TimerEvent::Tick { question }).await.is_err() {
                            break;
                        }
                    }
                    _ = &mut cancel_rx => break,
                }
            }
        });

        self.countdown = Some(ArmedTimer {
            cancel_tx: Some(cancel_tx),
            handle,
        });
    }

    /// Stop the countdown if one is running
    pub fn stop_countdown(&mut self) {
        self.countdown = None;
    }

    /// Fire a single `Advance` for `question` after the feedback delay
    pub fn schedule_advance(&mut self, question: usize) {
        self.advance = None;

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let events_tx = self.events_tx.clone();
        let delay = self.advance_delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = time::sleep(delay) => {
                    let _ = events_tx.send(TimerEvent::Advance { question }).await;
                }
                _ = cancel_rx => {}
            }
        });

        self.advance = Some(ArmedTimer {
            cancel_tx: Some(cancel_tx),
            handle,
        });
    }

    /// Cancel every pending timer
    pub fn cancel_all(&mut self) {
        self.countdown = None;
        self.advance = None;
    }

    /// Whether a countdown task is still alive
    pub fn is_counting(&self) -> bool {
        self.countdown.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Whether an advance is still pending
    pub fn has_pending_advance(&self) -> bool {
        self.advance.as_ref().is_some_and(|t| !t.is_finished())
    }
}
