//! Leaderboard screen implementation
//!
//! Ranks the local player's final score against the mock rivals and
//! offers to go home or play again.

use crate::app::state::NavigationAction;
use crate::models::{mock_leaderboard, PlayerScore};
use crate::navigation::SessionContext;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Available actions on the leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardAction {
    Home,
    PlayAgain,
}

impl LeaderboardAction {
    /// Get all available actions
    pub fn all() -> [Self; 2] {
        [Self::Home, Self::PlayAgain]
    }

    /// Get display text for the action
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Home => "Back to Home",
            Self::PlayAgain => "Play Again",
        }
    }
}

/// Leaderboard screen component
#[derive(Debug)]
pub struct LeaderboardScreen {
    standings: Vec<PlayerScore>,
    selected_action: LeaderboardAction,
}

impl LeaderboardScreen {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            standings: Vec::new(),
            selected_action: LeaderboardAction::Home,
        }
    }

    /// Build the standings from the context handed over by the quiz
    pub fn enter(&mut self, context: &SessionContext) {
        let score = context.final_score.unwrap_or(0);
        self.standings = mock_leaderboard(&context.player_name, score);
        self.selected_action = LeaderboardAction::Home;
    }

    pub fn standings(&self) -> &[PlayerScore] {
        &self.standings
    }

    /// Rank of the local player, if present
    pub fn player_rank(&self) -> Option<usize> {
        self.standings
            .iter()
            .find(|p| p.id == "1")
            .map(|p| p.rank)
    }

    pub fn selected_action(&self) -> LeaderboardAction {
        self.selected_action
    }

    /// Select next action
    pub fn select_next_action(&mut self) {
        let actions = LeaderboardAction::all();
        let current = actions
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        self.selected_action = actions[(current + 1) % actions.len()];
    }

    /// Select previous action
    pub fn select_previous_action(&mut self) {
        let actions = LeaderboardAction::all();
        let current = actions
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        self.selected_action = actions[(current + actions.len() - 1) % actions.len()];
    }

    /// Handle navigation for the leaderboard
    pub fn handle_navigation(&mut self, action: NavigationAction) -> Option<LeaderboardAction> {
        match action {
            NavigationAction::Left | NavigationAction::Previous => self.select_previous_action(),
            NavigationAction::Right | NavigationAction::Next => self.select_next_action(),
            NavigationAction::Select => return Some(self.selected_action),
            NavigationAction::Back => return Some(LeaderboardAction::Home),
            _ => {}
        }
        None
    }

    /// Render the leaderboard screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Rankings
                Constraint::Length(3), // Actions
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("🏆 Final Leaderboard")
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        f.render_widget(title, chunks[0]);

        self.render_rankings(f, chunks[1]);
        self.render_actions(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn rank_style(rank: usize) -> Style {
        match rank {
            1 => Style::default().fg(Color::Black).bg(Color::Yellow),
            2 => Style::default().fg(Color::Black).bg(Color::Gray),
            3 => Style::default().fg(Color::White).bg(Color::Rgb(150, 90, 30)),
            _ => Style::default(),
        }
    }

    fn rank_icon(rank: usize) -> &'static str {
        match rank {
            1 => "👑",
            2 | 3 => "🏅",
            _ => "  ",
        }
    }

    fn render_rankings(&self, f: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .standings
            .iter()
            .map(|entry| {
                let is_you = entry.id == "1";
                let name = if is_you {
                    format!("{} (You)", entry.name)
                } else {
                    entry.name.clone()
                };
                let mut style = Self::rank_style(entry.rank);
                if is_you {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                Row::new(vec![
                    format!("{} #{}", Self::rank_icon(entry.rank), entry.rank),
                    name,
                    format!("{} points", entry.score),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(8),
                Constraint::Min(20),
                Constraint::Length(14),
            ],
        )
        .header(
            Row::new(vec!["Rank", "Player", "Score"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().title("Rankings").borders(Borders::ALL))
        .column_spacing(2);

        f.render_widget(table, area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let spans: Vec<Span> = LeaderboardAction::all()
            .iter()
            .flat_map(|action| {
                let style = if *action == self.selected_action {
                    Style::default().bg(Color::Cyan).fg(Color::Black)
                } else {
                    Style::default().fg(Color::White)
                };
                [
                    Span::styled(format!(" {} ", action.display_text()), style),
                    Span::raw("   "),
                ]
            })
            .collect();

        let actions = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(actions, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let help_text = vec![Line::from(vec![
            key("←→"),
            Span::raw(" Choose  "),
            key("Enter"),
            Span::raw(" Confirm  "),
            key("Q"),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}

impl Default for LeaderboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_ranks_final_score() {
        let mut screen = LeaderboardScreen::new();
        screen.enter(&SessionContext::new("Zoe", "ABC123").with_final_score(220));
        assert_eq!(screen.standings().len(), 5);
        assert_eq!(screen.player_rank(), Some(2));
    }

    #[test]
    fn test_missing_score_counts_as_zero() {
        let mut screen = LeaderboardScreen::new();
        screen.enter(&SessionContext::new("Zoe", "ABC123"));
        assert_eq!(screen.player_rank(), Some(5));
    }

    #[test]
    fn test_action_navigation() {
        let mut screen = LeaderboardScreen::new();
        assert_eq!(screen.selected_action(), LeaderboardAction::Home);
        assert_eq!(screen.handle_navigation(NavigationAction::Right), None);
        assert_eq!(
            screen.handle_navigation(NavigationAction::Select),
            Some(LeaderboardAction::PlayAgain)
        );
        screen.select_next_action();
        assert_eq!(screen.selected_action(), LeaderboardAction::Home);
        screen.select_previous_action();
        assert_eq!(screen.selected_action(), LeaderboardAction::PlayAgain);
        assert_eq!(
            screen.handle_navigation(NavigationAction::Back),
            Some(LeaderboardAction::Home)
        );
    }
}
