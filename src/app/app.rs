//! Main application controller
//!
//! Manages the TUI, application state, and screen rendering loop.

use crate::{
    app::{
        screens::{
            AdminAction, AdminScreen, JoinAction, JoinScreen, LeaderboardAction,
            LeaderboardScreen, LobbyAction, LobbyScreen, QuizAction, QuizScreen,
        },
        state::StateManager,
        tui::Tui,
    },
    config::{persistence::QuestionBankStorage, QuizConfig},
    models::QuestionBank,
    navigation::{Navigator, Route, SessionContext},
    session::QuizController,
    store::{JsonFileStore, KeyValueStore, MemoryStore, PLAYER_NAME_KEY, ROOM_CODE_KEY},
    QuizError, Result,
};
use crossterm::event::KeyEvent;
use std::io;

/// TUI application controller
pub struct App {
    /// Terminal UI handler
    tui: Tui,
    /// Application state manager
    state_manager: StateManager,
    /// Application config
    config: QuizConfig,
    /// Player identity and final score
    store: Box<dyn KeyValueStore>,
    /// Question bank used to start sessions
    questions: QuestionBankStorage,
    /// Screen components
    join_screen: JoinScreen,
    lobby_screen: LobbyScreen,
    quiz_screen: QuizScreen,
    leaderboard_screen: LeaderboardScreen,
    admin_screen: AdminScreen,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = QuizConfig::load()?;
        // Write the defaults once so there is a file to edit
        if !QuizConfig::config_file_path()?.exists() {
            if let Err(e) = config.save() {
                tracing::warn!(error = %e, "failed to write default config");
            }
        }

        let store: Box<dyn KeyValueStore> = match JsonFileStore::new() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "store unavailable, keeping data in memory");
                Box::new(MemoryStore::new())
            }
        };
        let questions = QuestionBankStorage::new()?;

        Ok(Self {
            tui: Tui::new(config.tick_rate())?,
            state_manager: StateManager::new(),
            join_screen: JoinScreen::new(config.max_room_code_len),
            lobby_screen: LobbyScreen::new(),
            quiz_screen: QuizScreen::new(),
            leaderboard_screen: LeaderboardScreen::new(),
            admin_screen: AdminScreen::new(questions.clone()),
            config,
            store,
            questions,
        })
    }

    /// Initialize the application and TUI
    pub fn init(&mut self) -> Result<()> {
        self.tui
            .init()
            .map_err(|e| QuizError::TuiError(format!("Failed to set up terminal: {}", e)))?;
        tracing::info!("application started");
        Ok(())
    }

    /// Restore the terminal
    pub fn restore(&mut self) -> Result<()> {
        self.tui.restore()?;
        Ok(())
    }

    /// Run the main application loop
    pub async fn run(&mut self) -> Result<()> {
        while !self.state_manager.should_quit() {
            while let Some(route) = self.state_manager.take_entered() {
                self.on_enter(route);
            }
            self.poll_timers();
            self.draw()
                .map_err(|e| QuizError::TuiError(format!("Failed to draw: {}", e)))?;
            let key = self
                .tui
                .next_key()
                .await
                .map_err(|e| QuizError::TuiError(format!("Failed to read input: {}", e)))?;
            if let Some(key) = key {
                self.handle_key(key);
            }
        }
        self.quiz_screen.abandon();
        tracing::info!("application exiting");
        Ok(())
    }

    /// Draw the current screen
    fn draw(&mut self) -> io::Result<()> {
        let route = self.state_manager.current_route();
        let join_screen = &self.join_screen;
        let lobby_screen = &self.lobby_screen;
        let quiz_screen = &self.quiz_screen;
        let leaderboard_screen = &self.leaderboard_screen;
        let admin_screen = &mut self.admin_screen;

        self.tui.draw(|f| match route {
            Route::Join => join_screen.render(f),
            Route::Lobby => lobby_screen.render(f),
            Route::Quiz => quiz_screen.render(f),
            Route::Leaderboard => leaderboard_screen.render(f),
            Route::Admin => admin_screen.render(f),
        })
    }

    /// Per-visit set-up for a screen that was just navigated to
    fn on_enter(&mut self, route: Route) {
        let context = self.state_manager.context().clone();
        match route {
            Route::Join => {
                self.quiz_screen.abandon();
                self.lobby_screen.leave();
                self.join_screen.prefill(
                    self.store.get(PLAYER_NAME_KEY),
                    self.store.get(ROOM_CODE_KEY),
                );
            }
            Route::Lobby => self
                .lobby_screen
                .enter(&context, self.config.lobby_start_delay()),
            Route::Quiz => self.start_quiz(context),
            Route::Leaderboard => self.leaderboard_screen.enter(&context),
            Route::Admin => self.admin_screen.enter(),
        }
    }

    /// Build a bank from the saved questions and start a session over it
    fn start_quiz(&mut self, context: SessionContext) {
        let bank = self
            .questions
            .load_questions()
            .and_then(QuestionBank::new);

        match bank {
            Ok(bank) => {
                let controller = QuizController::start(bank, &self.config, context);
                self.quiz_screen.start(controller);
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot start quiz");
                self.join_screen
                    .set_error(crate::error::user_friendly_message(&e));
                self.state_manager.go_to(Route::Join, context);
            }
        }
    }

    /// Service the lobby auto-start and the quiz timers
    fn poll_timers(&mut self) {
        match self.state_manager.current_route() {
            Route::Lobby => {
                if self.lobby_screen.poll_start() == Some(LobbyAction::StartQuiz) {
                    let context = self.state_manager.context().clone();
                    self.state_manager.go_to(Route::Quiz, context);
                }
            }
            Route::Quiz => {
                self.quiz_screen
                    .poll_timers(self.store.as_mut(), &mut self.state_manager);
            }
            _ => {}
        }
    }

    /// Handle a key press on the current screen
    fn handle_key(&mut self, key: KeyEvent) {
        if StateManager::is_force_quit(&key) {
            self.state_manager.quit();
            return;
        }

        match self.state_manager.current_route() {
            Route::Join => self.handle_join_key(key),
            Route::Lobby => {
                let action = StateManager::key_to_navigation(key);
                self.state_manager.handle_navigation(action.clone());
                if self.lobby_screen.handle_navigation(action) == Some(LobbyAction::Leave) {
                    self.state_manager.transition_to(Route::Join);
                }
            }
            Route::Quiz => {
                if self.quiz_screen.handle_key_event(key) == Some(QuizAction::Abandon) {
                    self.quiz_screen.abandon();
                    self.state_manager.transition_to(Route::Join);
                }
            }
            Route::Leaderboard => {
                let action = StateManager::key_to_navigation(key);
                self.state_manager.handle_navigation(action.clone());
                match self.leaderboard_screen.handle_navigation(action) {
                    Some(LeaderboardAction::PlayAgain) => {
                        let mut context = self.state_manager.context().clone();
                        context.final_score = None;
                        self.state_manager.go_to(Route::Quiz, context);
                    }
                    Some(LeaderboardAction::Home) => self.state_manager.transition_to(Route::Join),
                    None => {}
                }
            }
            Route::Admin => {
                if self.admin_screen.handle_key_event(key) == Some(AdminAction::Back) {
                    self.state_manager.go_back();
                }
            }
        }
    }

    fn handle_join_key(&mut self, key: KeyEvent) {
        match self.join_screen.handle_key_event(key) {
            Some(JoinAction::Join(context)) => {
                for (store_key, value) in [
                    (PLAYER_NAME_KEY, &context.player_name),
                    (ROOM_CODE_KEY, &context.room_code),
                ] {
                    if let Err(e) = self.store.set(store_key, value) {
                        tracing::warn!(key = store_key, error = %e, "failed to persist join details");
                    }
                }
                tracing::info!(player = %context.player_name, room = %context.room_code, "joined room");
                self.state_manager.go_to(Route::Lobby, context);
            }
            Some(JoinAction::OpenAdmin) => self.state_manager.transition_to(Route::Admin),
            Some(JoinAction::Quit) => self.state_manager.quit(),
            None => {}
        }
    }
}
