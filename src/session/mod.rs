//! Quiz session module
//!
//! The timed question/answer state machine, the timers that drive it,
//! and the controller that ties both to the store and navigation.

pub mod controller;
pub mod flow;
pub mod timer;

pub use controller::{ControllerUpdate, QuizController};
pub use flow::{Advance, Feedback, LockReason, Phase, QuizSession, SessionRules, TickOutcome};
pub use timer::{QuestionTimer, TimerEvent};
