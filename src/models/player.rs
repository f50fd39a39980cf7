//! Player and leaderboard data models
//!
//! The roster and rival scores are local mock data; only the local
//! player's score comes from a real quiz session.

use serde::{Deserialize, Serialize};

/// Lobby readiness of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Connected,
    Ready,
}

impl PlayerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerStatus::Connected => "Waiting",
            PlayerStatus::Ready => "Ready",
        }
    }
}

/// A player in the lobby roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: PlayerStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status,
        }
    }

    /// Upper-cased first character used as an avatar
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}

/// Mock lobby roster with the local player listed first
pub fn mock_roster(local_player: &str) -> Vec<Player> {
    vec![
        Player::new("1", local_player, PlayerStatus::Ready),
        Player::new("2", "Alex", PlayerStatus::Connected),
        Player::new("3", "Sarah", PlayerStatus::Ready),
        Player::new("4", "Mike", PlayerStatus::Connected),
    ]
}

/// A ranked leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub id: String,
    pub name: String,
    pub score: u32,
    /// 1-based position after ranking; 0 until ranked
    pub rank: usize,
}

impl PlayerScore {
    pub fn new(id: impl Into<String>, name: impl Into<String>, score: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score,
            rank: 0,
        }
    }

    /// Podium positions get special styling
    pub fn is_podium(&self) -> bool {
        (1..=3).contains(&self.rank)
    }
}

/// Sort by score descending and assign 1-based ranks.
///
/// The sort is stable, so entries with equal scores keep their input
/// order.
pub fn rank_scores(mut scores: Vec<PlayerScore>) -> Vec<PlayerScore> {
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    for (index, entry) in scores.iter_mut().enumerate() {
        entry.rank = index + 1;
    }
    scores
}

/// Ranked leaderboard combining the local player's score with mock rivals
pub fn mock_leaderboard(local_player: &str, final_score: u32) -> Vec<PlayerScore> {
    rank_scores(vec![
        PlayerScore::new("1", local_player, final_score),
        PlayerScore::new("2", "Alex", 250),
        PlayerScore::new("3", "Sarah", 200),
        PlayerScore::new("4", "Mike", 150),
        PlayerScore::new("5", "Emma", 100),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_puts_local_player_first() {
        let roster = mock_roster("Zoe");
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0].name, "Zoe");
        assert_eq!(roster[0].status, PlayerStatus::Ready);
        assert_eq!(roster[0].initial(), 'Z');
    }

    #[test]
    fn test_initial_of_lowercase_name() {
        let player = Player::new("9", "émile", PlayerStatus::Connected);
        assert_eq!(player.initial(), 'É');
        let nameless = Player::new("9", "", PlayerStatus::Connected);
        assert_eq!(nameless.initial(), '?');
    }

    #[test]
    fn test_leaderboard_ranking() {
        let board = mock_leaderboard("Zoe", 300);
        let names: Vec<&str> = board.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Alex", "Sarah", "Mike", "Emma"]);
        let ranks: Vec<usize> = board.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_leaderboard_tie_keeps_local_player_ahead() {
        let board = mock_leaderboard("Zoe", 100);
        assert_eq!(board[3].name, "Zoe");
        assert_eq!(board[4].name, "Emma");
        assert!(!board[3].is_podium());
        assert!(board[2].is_podium());
    }

    #[test]
    fn test_zero_score_ranks_last() {
        let board = mock_leaderboard("Zoe", 0);
        assert_eq!(board.last().unwrap().name, "Zoe");
        assert_eq!(board.last().unwrap().rank, 5);
    }
}
