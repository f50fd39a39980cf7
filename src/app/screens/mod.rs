//! TUI screen components
//!
//! Contains individual screen implementations for each route.

pub mod admin;
pub mod join;
pub mod leaderboard;
pub mod lobby;
pub mod quiz;

pub use admin::{AdminAction, AdminField, AdminScreen, StatusKind};
pub use join::{JoinAction, JoinField, JoinScreen};
pub use leaderboard::{LeaderboardAction, LeaderboardScreen};
pub use lobby::{LobbyAction, LobbyScreen};
pub use quiz::{QuizAction, QuizScreen};
