//! Quiz session state machine
//!
//! Pure, synchronous per-question flow: countdown, option selection,
//! lock-in and scoring. Timers live elsewhere and only feed `tick` and
//! `advance` into this type.

use crate::config::QuizConfig;
use crate::models::{Question, QuestionBank};

/// Where the current question is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Timer running, answer selectable
    Active,
    /// Answer committed, feedback shown, timer frozen
    Locked,
    /// Past the last question; no further mutation
    Finished,
}

/// How a question got locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    Submitted,
    TimedOut,
}

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Countdown continues with this many seconds left
    Counting(u32),
    /// Time ran out and the question locked
    TimedOut,
    /// Question was not active; nothing changed
    Ignored,
}

/// Result of leaving the locked state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index
    Next(usize),
    /// No questions left; carries the final score
    Finished(u32),
}

/// Feedback for a locked question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_option: String },
}

/// Scoring and timing parameters for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRules {
    pub question_duration: u32,
    pub correct_award: u32,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            question_duration: crate::QUESTION_DURATION,
            correct_award: crate::CORRECT_AWARD,
        }
    }
}

impl From<&QuizConfig> for SessionRules {
    fn from(config: &QuizConfig) -> Self {
        Self {
            question_duration: config.question_duration_secs.max(1),
            correct_award: config.correct_award,
        }
    }
}

/// State of one run through the question bank
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    rules: SessionRules,
    current_index: usize,
    time_remaining: u32,
    selected_option: Option<usize>,
    answered: bool,
    score: u32,
    phase: Phase,
    lock_reason: Option<LockReason>,
    correct_count: usize,
}

impl QuizSession {
    /// Start a session at the first question with a full timer
    pub fn new(bank: QuestionBank, rules: SessionRules) -> Self {
        Self {
            bank,
            rules,
            current_index: 0,
            time_remaining: rules.question_duration,
            selected_option: None,
            answered: false,
            score: 0,
            phase: Phase::Active,
            lock_reason: None,
            correct_count: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    pub fn current_question(&self) -> &Question {
        // current_index never exceeds last_index, and banks are non-empty
        &self.bank.questions()[self.current_index]
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lock_reason(&self) -> Option<LockReason> {
        self.lock_reason
    }

    pub fn rules(&self) -> SessionRules {
        self.rules
    }

    /// Number of questions answered correctly so far
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index == self.bank.last_index()
    }

    /// Submit is only offered with a selection on an open question
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Active && !self.answered && self.selected_option.is_some()
    }

    /// Feedback for the locked question, `None` while still open
    pub fn feedback(&self) -> Option<Feedback> {
        if !self.answered {
            return None;
        }
        let question = self.current_question();
        match self.selected_option {
            Some(option) if question.is_correct(option) => Some(Feedback::Correct),
            _ => Some(Feedback::Incorrect {
                correct_option: question.correct_option().to_string(),
            }),
        }
    }

    /// One second elapsed on the active question
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Active || self.answered {
            return TickOutcome::Ignored;
        }

        if self.time_remaining > 1 {
            self.time_remaining -= 1;
            TickOutcome::Counting(self.time_remaining)
        } else {
            self.time_remaining = 0;
            self.lock(LockReason::TimedOut);
            TickOutcome::TimedOut
        }
    }

    /// Choose an option; overwrites any earlier choice until lock-in
    pub fn select(&mut self, option: usize) -> bool {
        if self.phase != Phase::Active || self.answered || option >= crate::OPTION_COUNT {
            return false;
        }
        self.selected_option = Some(option);
        true
    }

    /// Lock in the current selection
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.lock(LockReason::Submitted);
        true
    }

    /// Leave the locked state after the feedback delay
    pub fn advance(&mut self) -> Option<Advance> {
        if self.phase != Phase::Locked {
            return None;
        }

        if self.current_index < self.bank.last_index() {
            self.current_index += 1;
            self.time_remaining = self.rules.question_duration;
            self.selected_option = None;
            self.answered = false;
            self.lock_reason = None;
            self.phase = Phase::Active;
            tracing::debug!(question = self.current_index, "advanced to next question");
            Some(Advance::Next(self.current_index))
        } else {
            self.phase = Phase::Finished;
            tracing::info!(
                score = self.score,
                correct = self.correct_count,
                total = self.bank.len(),
                "quiz session finished"
            );
            Some(Advance::Finished(self.score))
        }
    }

    // The only place `answered` flips and the only place score changes.
    fn lock(&mut self, reason: LockReason) {
        self.answered = true;
        self.lock_reason = Some(reason);
        self.phase = Phase::Locked;

        let correct = self
            .selected_option
            .is_some_and(|option| self.current_question().is_correct(option));
        if correct {
            self.score += self.rules.correct_award;
            self.correct_count += 1;
        }

        tracing::info!(
            question = self.current_index,
            ?reason,
            selected = ?self.selected_option,
            correct,
            score = self.score,
            "answer locked"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> QuizSession {
        QuizSession::new(QuestionBank::builtin(), SessionRules::default())
    }

    fn run_out_clock(session: &mut QuizSession) -> usize {
        let mut ticks = 0;
        while session.tick() != TickOutcome::TimedOut {
            ticks += 1;
            assert!(ticks < 100, "countdown never expired");
        }
        ticks + 1
    }

    #[test]
    fn test_initial_state() {
        let s = session();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.time_remaining(), 15);
        assert_eq!(s.selected_option(), None);
        assert!(!s.is_answered());
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Active);
        assert!(!s.can_submit());
        assert!(s.feedback().is_none());
    }

    #[test]
    fn test_countdown_strictly_decreases_then_locks() {
        let mut s = session();
        let mut previous = s.time_remaining();
        for _ in 0..14 {
            match s.tick() {
                TickOutcome::Counting(left) => {
                    assert!(left < previous);
                    previous = left;
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(s.time_remaining(), 1);
        assert_eq!(s.tick(), TickOutcome::TimedOut);
        assert_eq!(s.time_remaining(), 0);
        assert!(s.is_answered());
        assert_eq!(s.lock_reason(), Some(LockReason::TimedOut));
    }

    #[test]
    fn test_timer_frozen_once_locked() {
        let mut s = session();
        s.tick();
        s.select(2);
        assert!(s.submit());
        let frozen = s.time_remaining();
        assert_eq!(s.tick(), TickOutcome::Ignored);
        assert_eq!(s.tick(), TickOutcome::Ignored);
        assert_eq!(s.time_remaining(), frozen);
    }

    #[test]
    fn test_reselect_overwrites_without_scoring() {
        let mut s = session();
        assert!(s.select(0));
        assert!(s.select(3));
        assert!(s.select(2));
        assert_eq!(s.selected_option(), Some(2));
        assert_eq!(s.score(), 0);
        assert!(!s.is_answered());
    }

    #[test]
    fn test_submit_requires_selection() {
        let mut s = session();
        assert!(!s.submit());
        assert!(!s.is_answered());
        assert_eq!(s.phase(), Phase::Active);
    }

    #[test]
    fn test_correct_submit_scores_once() {
        let mut s = session();
        s.select(2);
        assert!(s.submit());
        assert_eq!(s.score(), 100);
        assert_eq!(s.feedback(), Some(Feedback::Correct));

        // No second evaluation for the same question
        assert!(!s.submit());
        assert!(!s.select(1));
        assert_eq!(s.tick(), TickOutcome::Ignored);
        assert_eq!(s.score(), 100);
        assert_eq!(s.selected_option(), Some(2));
    }

    #[test]
    fn test_timeout_without_selection_is_incorrect() {
        let mut s = session();
        assert_eq!(run_out_clock(&mut s), 15);
        assert_eq!(s.score(), 0);
        assert_eq!(
            s.feedback(),
            Some(Feedback::Incorrect {
                correct_option: "Paris".to_string()
            })
        );
        assert_eq!(s.advance(), Some(Advance::Next(1)));
    }

    #[test]
    fn test_timeout_scores_pending_selection() {
        let mut s = session();
        s.select(2);
        run_out_clock(&mut s);
        assert_eq!(s.lock_reason(), Some(LockReason::TimedOut));
        assert_eq!(s.score(), 100);
    }

    #[test]
    fn test_advance_resets_question_state() {
        let mut s = session();
        assert_eq!(s.advance(), None);

        s.tick();
        s.select(0);
        s.submit();
        assert_eq!(s.advance(), Some(Advance::Next(1)));
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.time_remaining(), 15);
        assert_eq!(s.selected_option(), None);
        assert!(!s.is_answered());
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.advance(), None);
    }

    #[test]
    fn test_mixed_answers_scenario() {
        let mut s = session();

        s.select(2);
        s.submit();
        assert_eq!(s.advance(), Some(Advance::Next(1)));

        s.select(0);
        s.submit();
        assert_eq!(s.advance(), Some(Advance::Next(2)));

        run_out_clock(&mut s);
        assert!(s.is_last_question());
        assert_eq!(s.advance(), Some(Advance::Finished(100)));
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.correct_count(), 1);
    }

    #[test]
    fn test_finished_session_is_inert() {
        let mut s = session();
        for _ in 0..3 {
            run_out_clock(&mut s);
            s.advance();
        }
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.score(), 0);

        assert_eq!(s.tick(), TickOutcome::Ignored);
        assert!(!s.select(1));
        assert!(!s.submit());
        assert_eq!(s.advance(), None);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn test_custom_rules() {
        let rules = SessionRules {
            question_duration: 3,
            correct_award: 250,
        };
        let mut s = QuizSession::new(QuestionBank::builtin(), rules);
        assert_eq!(s.time_remaining(), 3);
        s.select(2);
        s.submit();
        assert_eq!(s.score(), 250);
    }

    #[test]
    fn test_rules_from_config() {
        let config = QuizConfig::new().with_question_duration(30).with_correct_award(10);
        let rules = SessionRules::from(&config);
        assert_eq!(rules.question_duration, 30);
        assert_eq!(rules.correct_award, 10);
    }
}
