use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quizmaster::app::screens::{
    JoinAction, JoinScreen, LeaderboardAction, LeaderboardScreen, LobbyAction, LobbyScreen,
};
use quizmaster::app::state::{NavigationAction, StateManager};
use quizmaster::navigation::{Navigator, Route, SessionContext};
use std::time::Duration;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(screen: &mut JoinScreen, text: &str) {
    for c in text.chars() {
        screen.handle_key_event(key(KeyCode::Char(c)));
    }
}

#[test]
fn test_join_hands_context_to_lobby() {
    let mut state = StateManager::new();
    assert_eq!(state.take_entered(), Some(Route::Join));

    let mut join = JoinScreen::new(6);
    type_text(&mut join, "Quinn");
    join.handle_key_event(key(KeyCode::Tab));
    type_text(&mut join, "abc1234");
    assert_eq!(join.room_code(), "ABC123");

    let context = match join.handle_key_event(key(KeyCode::Enter)) {
        Some(JoinAction::Join(context)) => context,
        other => panic!("expected join, got {:?}", other),
    };
    state.go_to(Route::Lobby, context);

    assert_eq!(state.current_route(), Route::Lobby);
    assert_eq!(state.take_entered(), Some(Route::Lobby));
    assert_eq!(state.context().player_name, "Quinn");
    assert_eq!(state.context().room_code, "ABC123");
}

#[test]
fn test_join_blocked_until_both_fields_filled() {
    let mut join = JoinScreen::new(6);
    type_text(&mut join, "Quinn");
    assert_eq!(join.handle_key_event(key(KeyCode::Enter)), None);
    assert!(join.error_message().is_some());

    join.handle_key_event(key(KeyCode::Tab));
    type_text(&mut join, "   ");
    assert!(!join.can_join());
}

#[tokio::test(start_paused = true)]
async fn test_lobby_start_then_leaderboard_round_trip() {
    let mut state = StateManager::new();
    state.go_to(Route::Lobby, SessionContext::new("Quinn", "ABC123"));

    let mut lobby = LobbyScreen::new();
    lobby.enter(state.context(), Duration::from_secs(5));
    tokio::time::advance(Duration::from_secs(5)).await;
    assert_eq!(lobby.poll_start(), Some(LobbyAction::StartQuiz));
    let context = state.context().clone();
    state.go_to(Route::Quiz, context);

    // The quiz hands its score over with the context
    let finished = state.context().clone().with_final_score(300);
    state.go_to(Route::Leaderboard, finished);

    let mut board = LeaderboardScreen::new();
    board.enter(state.context());
    assert_eq!(board.player_rank(), Some(1));
    assert_eq!(board.standings()[0].name, "Quinn");

    board.handle_navigation(NavigationAction::Right);
    assert_eq!(
        board.handle_navigation(NavigationAction::Select),
        Some(LeaderboardAction::PlayAgain)
    );
    assert_eq!(state.previous_route(), Some(Route::Quiz));
}

#[test]
fn test_route_paths_round_trip() {
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
fn test_back_from_join_quits() {
    let mut state = StateManager::new();
    state.handle_navigation(NavigationAction::Back);
    assert!(state.should_quit());
}

#[test]
fn test_admin_back_returns_to_join() {
    let mut state = StateManager::new();
    state.take_entered();
    state.transition_to(Route::Admin);
    assert_eq!(state.take_entered(), Some(Route::Admin));

    state.go_back();
    assert_eq!(state.current_route(), Route::Join);
    assert_eq!(state.take_entered(), Some(Route::Join));
}
