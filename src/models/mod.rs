//! Data models module
//!
//! Contains question records, the question bank, lobby players and
//! leaderboard entries.

pub mod player;
pub mod question;

// Re-export commonly used types
pub use player::{
    mock_leaderboard,
    mock_roster,
    rank_scores,
    Player,
    PlayerScore,
    PlayerStatus,
};
pub use question::{builtin_questions, Question, QuestionBank};
