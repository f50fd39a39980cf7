//! Screen routes and the context handed between them

use crate::{DEFAULT_PLAYER_NAME, DEFAULT_ROOM_CODE};
use serde::{Deserialize, Serialize};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Join form: player name and room code
    #[default]
    Join,
    /// Waiting room before the quiz starts
    Lobby,
    /// Timed question flow
    Quiz,
    /// Final rankings
    Leaderboard,
    /// Question bank editor
    Admin,
}

impl Route {
    /// Route identifier, in URL path form
    pub fn path(&self) -> &'static str {
        match self {
            Route::Join => "/",
            Route::Lobby => "/lobby",
            Route::Quiz => "/quiz",
            Route::Leaderboard => "/leaderboard",
            Route::Admin => "/admin",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Join),
            "/lobby" => Some(Route::Lobby),
            "/quiz" => Some(Route::Quiz),
            "/leaderboard" => Some(Route::Leaderboard),
            "/admin" => Some(Route::Admin),
            _ => None,
        }
    }
}

/// Player identity and results carried from screen to screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub player_name: String,
    pub room_code: String,
    /// Set once a quiz session reaches its end
    pub final_score: Option<u32>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            room_code: DEFAULT_ROOM_CODE.to_string(),
            final_score: None,
        }
    }
}

impl SessionContext {
    pub fn new(player_name: impl Into<String>, room_code: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            room_code: room_code.into(),
            final_score: None,
        }
    }

    pub fn with_final_score(mut self, score: u32) -> Self {
        self.final_score = Some(score);
        self
    }
}

/// Transfers control to another screen; fire-and-forget
pub trait Navigator {
    fn go_to(&mut self, route: Route, context: SessionContext);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        for route in [
            Route::Join,
            Route::Lobby,
            Route::Quiz,
            Route::Leaderboard,
            Route::Admin,
        ] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nowhere"), None);
    }

    #[test]
    fn test_default_context() {
        let context = SessionContext::default();
        assert_eq!(context.player_name, "Player");
        assert_eq!(context.room_code, "DEMO01");
        assert!(context.final_score.is_none());
        assert_eq!(context.with_final_score(300).final_score, Some(300));
    }
}
