//! Quiz session controller
//!
//! Owns a `QuizSession` together with its timers, routes timer events
//! into it, and performs the hand-off (store write plus navigation) when
//! the last question has been answered.

use crate::config::QuizConfig;
use crate::models::QuestionBank;
use crate::navigation::{Navigator, Route, SessionContext};
use crate::session::flow::{Advance, Phase, QuizSession, SessionRules, TickOutcome};
use crate::session::timer::{QuestionTimer, TimerEvent};
use crate::store::{KeyValueStore, FINAL_SCORE_KEY};
use std::time::Duration;
use tokio::sync::mpsc;

/// Seconds per countdown step
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What handling an event or action did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerUpdate {
    /// Nothing changed (stale or out-of-phase event, no-op action)
    Unchanged,
    /// Countdown moved
    Ticked(u32),
    /// An option was chosen
    Selected(usize),
    /// The current question locked
    Locked,
    /// Moved on to the question at this index
    NextQuestion(usize),
    /// Score handed off and navigation issued
    Finished(u32),
}

/// Drives one quiz session from the first question to the hand-off
#[derive(Debug)]
pub struct QuizController {
    session: QuizSession,
    timer: QuestionTimer,
    events_rx: mpsc::Receiver<TimerEvent>,
    context: SessionContext,
}

impl QuizController {
    /// Start a session over `bank` and arm the first countdown.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(bank: QuestionBank, config: &QuizConfig, context: SessionContext) -> Self {
        Self::with_rules(
            bank,
            SessionRules::from(config),
            TICK_PERIOD,
            config.advance_delay(),
            context,
        )
    }

    /// Start a session with explicit rules and timer periods
    pub fn with_rules(
        bank: QuestionBank,
        rules: SessionRules,
        tick_period: Duration,
        advance_delay: Duration,
        context: SessionContext,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(32);
        let mut timer = QuestionTimer::new(events_tx, tick_period, advance_delay);
        timer.start_countdown(0);

        tracing::info!(
            player = %context.player_name,
            room = %context.room_code,
            questions = bank.len(),
            "quiz session started"
        );

        Self {
            session: QuizSession::new(bank, rules),
            timer,
            events_rx,
            context,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn is_finished(&self) -> bool {
        self.session.phase() == Phase::Finished
    }

    /// Whether the countdown for the current question is running
    pub fn is_counting(&self) -> bool {
        self.timer.is_counting()
    }

    /// Whether the move to the next question (or the finish) is pending
    pub fn is_advancing(&self) -> bool {
        self.timer.has_pending_advance()
    }

    /// Choose an option on the open question
    pub fn select(&mut self, option: usize) -> ControllerUpdate {
        if self.session.select(option) {
            ControllerUpdate::Selected(option)
        } else {
            ControllerUpdate::Unchanged
        }
    }

    /// Lock in the current selection, stopping the countdown
    pub fn submit(&mut self) -> ControllerUpdate {
        if !self.session.submit() {
            return ControllerUpdate::Unchanged;
        }
        self.on_locked();
        ControllerUpdate::Locked
    }

    /// Next pending timer event without waiting
    pub fn try_next_event(&mut self) -> Option<TimerEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Wait for the next timer event
    pub async fn next_event(&mut self) -> Option<TimerEvent> {
        self.events_rx.recv().await
    }

    /// Apply a timer event.
    ///
    /// Events armed for a question other than the current one are
    /// dropped. On the final advance the score is written to `store`
    /// and `navigator` is sent to the leaderboard exactly once.
    pub fn handle_event(
        &mut self,
        event: TimerEvent,
        store: &mut dyn KeyValueStore,
        navigator: &mut dyn Navigator,
    ) -> ControllerUpdate {
        if event.question() != self.session.current_index() || self.is_finished() {
            tracing::trace!(?event, "dropping stale timer event");
            return ControllerUpdate::Unchanged;
        }

        match event {
            TimerEvent::Tick { .. } => match self.session.tick() {
                TickOutcome::Counting(left) => ControllerUpdate::Ticked(left),
                TickOutcome::TimedOut => {
                    self.on_locked();
                    ControllerUpdate::Locked
                }
                TickOutcome::Ignored => ControllerUpdate::Unchanged,
            },
            TimerEvent::Advance { .. } => match self.session.advance() {
                Some(Advance::Next(index)) => {
                    self.timer.start_countdown(index);
                    ControllerUpdate::NextQuestion(index)
                }
                Some(Advance::Finished(score)) => {
                    self.finish(score, store, navigator);
                    ControllerUpdate::Finished(score)
                }
                None => ControllerUpdate::Unchanged,
            },
        }
    }

    /// Abandon the session; pending timers are cancelled and nothing is
    /// persisted
    pub fn abandon(mut self) {
        self.timer.cancel_all();
        tracing::info!(
            question = self.session.current_index(),
            "quiz session abandoned"
        );
    }

    fn on_locked(&mut self) {
        self.timer.stop_countdown();
        self.timer.schedule_advance(self.session.current_index());
    }

    fn finish(&mut self, score: u32, store: &mut dyn KeyValueStore, navigator: &mut dyn Navigator) {
        self.timer.cancel_all();

        // The context carries the score even if the store write fails
        if let Err(e) = store.set(FINAL_SCORE_KEY, &score.to_string()) {
            tracing::warn!(error = %e, "failed to persist final score");
        }

        self.context.final_score = Some(score);
        navigator.go_to(Route::Leaderboard, self.context.clone());
    }
}
