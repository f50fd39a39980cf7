//! Application state management
//!
//! Handles screen transitions, the context carried between screens, and
//! keyboard event processing for the TUI application.

use crate::navigation::{Navigator, Route, SessionContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move selection up (arrow up, k)
    Up,
    /// Move selection down (arrow down, j)
    Down,
    /// Move selection left (arrow left, h)
    Left,
    /// Move selection right (arrow right, l)
    Right,
    /// Confirm selection (Enter, Space)
    Select,
    /// Go back/cancel (Esc)
    Back,
    /// Next item (Tab)
    Next,
    /// Previous item (Shift+Tab)
    Previous,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_route: Route,
    previous_route: Option<Route>,
    context: SessionContext,
    entered: Option<Route>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the join screen
    pub fn new() -> Self {
        Self {
            current_route: Route::Join,
            previous_route: None,
            context: SessionContext::default(),
            entered: Some(Route::Join),
            should_quit: false,
        }
    }

    /// Get the current screen
    pub fn current_route(&self) -> Route {
        self.current_route
    }

    /// Get the previous screen if available
    pub fn previous_route(&self) -> Option<Route> {
        self.previous_route
    }

    /// Context handed over by the last navigation
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new screen, keeping the current context
    pub fn transition_to(&mut self, route: Route) {
        if route != self.current_route {
            tracing::debug!(from = self.current_route.path(), to = route.path(), "navigate");
            self.previous_route = Some(self.current_route);
            self.current_route = route;
        }
        self.entered = Some(route);
    }

    /// Screen entered since the last call, if any.
    ///
    /// Lets the controller run set-up for a screen exactly once per visit.
    pub fn take_entered(&mut self) -> Option<Route> {
        self.entered.take()
    }

    /// Go back to the previous screen if available, otherwise to Join
    pub fn go_back(&mut self) {
        let target = self.previous_route.take().unwrap_or(Route::Join);
        self.current_route = target;
        self.entered = Some(target);
    }

    /// Handle global navigation actions
    pub fn handle_navigation(&mut self, action: NavigationAction) {
        match action {
            NavigationAction::Quit => self.should_quit = true,
            NavigationAction::Back if self.current_route == Route::Join => {
                self.should_quit = true;
            }
            _ => {
                // Screen-specific actions are handled by the screen components
            }
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,

            // Navigation keys
            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Left | KeyCode::Char('h') => NavigationAction::Left,
            KeyCode::Right | KeyCode::Char('l') => NavigationAction::Right,

            // Selection and confirmation
            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            // Back/cancel
            KeyCode::Esc => NavigationAction::Back,

            // Tab navigation
            KeyCode::BackTab => NavigationAction::Previous,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    NavigationAction::Previous
                } else {
                    NavigationAction::Next
                }
            }

            _ => NavigationAction::None,
        }
    }

    /// Whether the key is the hard quit chord that works on every screen
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }
}

impl Navigator for StateManager {
    fn go_to(&mut self, route: Route, context: SessionContext) {
        self.context = context;
        self.transition_to(route);
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
