//! Lobby screen implementation
//!
//! Waiting room showing the room code and a mock roster. The quiz starts
//! automatically once the start delay elapses; leaving cancels it.

use crate::app::state::NavigationAction;
use crate::models::{mock_roster, Player, PlayerStatus};
use crate::navigation::SessionContext;
use crate::util::count_label;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use std::time::Duration;
use tokio::time::Instant;

/// What the lobby asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyAction {
    StartQuiz,
    Leave,
}

/// Lobby screen component
#[derive(Debug, Default)]
pub struct LobbyScreen {
    room_code: String,
    players: Vec<Player>,
    starts_at: Option<Instant>,
}

impl LobbyScreen {
    /// Create an empty lobby screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the roster for `context` and arm the auto-start
    pub fn enter(&mut self, context: &SessionContext, start_delay: Duration) {
        self.room_code = context.room_code.clone();
        self.players = mock_roster(&context.player_name);
        self.starts_at = Some(Instant::now() + start_delay);
        tracing::info!(room = %self.room_code, players = self.players.len(), "entered lobby");
    }

    /// Cancel the pending auto-start
    pub fn leave(&mut self) {
        self.starts_at = None;
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_waiting(&self) -> bool {
        self.starts_at.is_some()
    }

    /// Time left before the quiz starts
    pub fn time_until_start(&self) -> Option<Duration> {
        self.starts_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// Poll the auto-start; fires once, then disarms
    pub fn poll_start(&mut self) -> Option<LobbyAction> {
        match self.starts_at {
            Some(at) if Instant::now() >= at => {
                self.starts_at = None;
                Some(LobbyAction::StartQuiz)
            }
            _ => None,
        }
    }

    /// Handle navigation for the lobby
    pub fn handle_navigation(&mut self, action: NavigationAction) -> Option<LobbyAction> {
        match action {
            NavigationAction::Back => {
                self.leave();
                Some(LobbyAction::Leave)
            }
            _ => None,
        }
    }

    /// Render the lobby screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and room code
                Constraint::Min(6),    // Roster
                Constraint::Length(4), // Starting soon banner
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_roster(f, chunks[1]);
        self.render_banner(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(Span::styled(
                "Waiting Room",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw("Room Code: "),
                Span::styled(
                    self.room_code.clone(),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        let title = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        f.render_widget(title, area);
    }

    fn render_roster(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .players
            .iter()
            .map(|player| {
                let (status_style, marker) = match player.status {
                    PlayerStatus::Ready => (Style::default().fg(Color::Green), "✔"),
                    PlayerStatus::Connected => (Style::default().fg(Color::DarkGray), "…"),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {} ", player.initial()),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {:<24}", player.name)),
                    Span::styled(format!("{} {}", marker, player.status.label()), status_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "{} Connected",
                    count_label(self.players.len(), "Player")
                )),
        );
        f.render_widget(list, area);
    }

    fn render_banner(&self, f: &mut Frame, area: Rect) {
        let countdown = self
            .time_until_start()
            .map(|left| format!("Starting in {}s", left.as_secs() + 1))
            .unwrap_or_default();

        let text = vec![
            Line::from(Span::styled(
                "Game Starting Soon!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Waiting for all players to be ready... {}",
                countdown
            )),
        ];

        let banner = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(banner, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![Line::from(vec![
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Leave Room"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_start_after_delay() {
        let mut screen = LobbyScreen::new();
        screen.enter(&SessionContext::new("Zoe", "ABC123"), Duration::from_secs(5));
        assert_eq!(screen.room_code(), "ABC123");
        assert_eq!(screen.players().len(), 4);
        assert_eq!(screen.poll_start(), None);

        tokio::time::advance(Duration::from_millis(4999)).await;
        assert_eq!(screen.poll_start(), None);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(screen.poll_start(), Some(LobbyAction::StartQuiz));
        // Fires only once
        assert_eq!(screen.poll_start(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_cancels_start() {
        let mut screen = LobbyScreen::new();
        screen.enter(&SessionContext::default(), Duration::from_secs(5));
        assert_eq!(
            screen.handle_navigation(NavigationAction::Back),
            Some(LobbyAction::Leave)
        );
        assert!(!screen.is_waiting());

        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(screen.poll_start(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_does_not_leave() {
        let mut screen = LobbyScreen::new();
        screen.enter(&SessionContext::default(), Duration::from_secs(5));
        assert_eq!(screen.handle_navigation(NavigationAction::Select), None);
        assert!(screen.is_waiting());

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(screen.poll_start(), Some(LobbyAction::StartQuiz));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_context_room() {
        let mut screen = LobbyScreen::new();
        screen.enter(&SessionContext::default(), Duration::from_secs(5));
        assert_eq!(screen.room_code(), "DEMO01");
        assert_eq!(screen.players()[0].name, "Player");
    }
}
