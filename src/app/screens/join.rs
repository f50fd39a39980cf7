//! Join screen implementation
//!
//! Player name and room code form, plus the entry point to the admin
//! panel. Joining is only possible once both fields are filled in.

use crate::navigation::SessionContext;
use crate::util::normalize_room_code;
use crate::{QuizError, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Focusable elements, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinField {
    PlayerName,
    RoomCode,
    JoinButton,
    AdminButton,
}

impl JoinField {
    fn all() -> [Self; 4] {
        [
            Self::PlayerName,
            Self::RoomCode,
            Self::JoinButton,
            Self::AdminButton,
        ]
    }

    fn is_text(&self) -> bool {
        matches!(self, Self::PlayerName | Self::RoomCode)
    }
}

/// What the join screen asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinAction {
    Join(SessionContext),
    OpenAdmin,
    Quit,
}

/// Join screen component
#[derive(Debug)]
pub struct JoinScreen {
    player_name: String,
    room_code: String,
    max_room_code_len: usize,
    focus: JoinField,
    error_message: Option<String>,
}

impl JoinScreen {
    /// Create a new join screen
    pub fn new(max_room_code_len: usize) -> Self {
        Self {
            player_name: String::new(),
            room_code: String::new(),
            max_room_code_len,
            focus: JoinField::PlayerName,
            error_message: None,
        }
    }

    /// Pre-fill the form, e.g. with the last used details
    pub fn prefill(&mut self, player_name: Option<String>, room_code: Option<String>) {
        if let Some(name) = player_name {
            self.player_name = name;
        }
        if let Some(code) = room_code {
            self.room_code = normalize_room_code(&code, self.max_room_code_len);
        }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn focus(&self) -> JoinField {
        self.focus
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Show an error raised outside the form (e.g. empty question bank)
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Join is enabled once both trimmed fields are non-empty
    pub fn can_join(&self) -> bool {
        !self.player_name.trim().is_empty() && !self.room_code.trim().is_empty()
    }

    /// Build the context for the lobby from the form contents
    pub fn submit(&self) -> Result<SessionContext> {
        if !self.can_join() {
            return Err(QuizError::InvalidJoin(
                "Enter your name and a room code to join".to_string(),
            ));
        }
        Ok(SessionContext::new(
            self.player_name.trim(),
            self.room_code.trim(),
        ))
    }

    /// Type a character into the focused field
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            JoinField::PlayerName => self.player_name.push(c),
            JoinField::RoomCode => {
                let mut code = self.room_code.clone();
                code.push(c);
                self.room_code = normalize_room_code(&code, self.max_room_code_len);
            }
            _ => return,
        }
        self.error_message = None;
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        match self.focus {
            JoinField::PlayerName => {
                self.player_name.pop();
            }
            JoinField::RoomCode => {
                self.room_code.pop();
            }
            _ => {}
        }
    }

    /// Move focus forward, wrapping
    pub fn focus_next(&mut self) {
        let fields = JoinField::all();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    /// Move focus backward, wrapping
    pub fn focus_previous(&mut self) {
        let fields = JoinField::all();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    /// Handle key events for the join screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<JoinAction> {
        match key.code {
            KeyCode::Esc => return Some(JoinAction::Quit),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Enter => return self.activate(),
            KeyCode::Char(c)
                if self.focus.is_text() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.insert_char(c)
            }
            KeyCode::Char('a') | KeyCode::Char('A') if !self.focus.is_text() => {
                return Some(JoinAction::OpenAdmin)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if !self.focus.is_text() => {
                return Some(JoinAction::Quit)
            }
            _ => {}
        }
        None
    }

    // Enter in a text field joins, like pressing the button
    fn activate(&mut self) -> Option<JoinAction> {
        if self.focus == JoinField::AdminButton {
            return Some(JoinAction::OpenAdmin);
        }
        match self.submit() {
            Ok(context) => {
                self.error_message = None;
                Some(JoinAction::Join(context))
            }
            Err(e) => {
                self.error_message = Some(crate::error::user_friendly_message(&e));
                None
            }
        }
    }

    /// Render the join screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Title and subtitle
                Constraint::Length(3), // Player name
                Constraint::Length(3), // Room code
                Constraint::Length(3), // Buttons
                Constraint::Min(2),    // Status
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_input(
            f,
            chunks[1],
            "Your Name",
            &self.player_name,
            "Enter your name",
            JoinField::PlayerName,
        );
        self.render_input(
            f,
            chunks[2],
            "Room Code",
            &self.room_code,
            "Enter room code",
            JoinField::RoomCode,
        );
        self.render_buttons(f, chunks[3]);
        self.render_status(f, chunks[4]);
        self.render_help(f, chunks[5]);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(2)])
            .split(area);

        let title = Paragraph::new("QuizMaster")
            .style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Magenta)),
            );
        f.render_widget(title, title_chunks[0]);

        let subtitle = Paragraph::new("Join the ultimate multiplayer quiz experience")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(subtitle, title_chunks[1]);
    }

    fn render_input(
        &self,
        f: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        placeholder: &str,
        field: JoinField,
    ) {
        let focused = self.focus == field;
        let border = if focused { Color::Cyan } else { Color::DarkGray };

        let line = if value.is_empty() {
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
        } else if focused {
            Line::from(vec![Span::raw(value.to_string()), Span::raw("_")])
        } else {
            Line::from(value.to_string())
        };

        let input = Paragraph::new(line).block(
            Block::default()
                .title(label.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(input, area);
    }

    fn render_buttons(&self, f: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let join_style = if !self.can_join() {
            Style::default().fg(Color::DarkGray)
        } else if self.focus == JoinField::JoinButton {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let join = Paragraph::new("Join Game")
            .style(join_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(join, halves[0]);

        let admin_style = if self.focus == JoinField::AdminButton {
            Style::default().bg(Color::Cyan).fg(Color::Black)
        } else {
            Style::default().fg(Color::White)
        };
        let admin = Paragraph::new("Admin Panel")
            .style(admin_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(admin, halves[1]);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        if let Some(error) = &self.error_message {
            let status = Paragraph::new(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            f.render_widget(status, area);
        }
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
            key("Tab"),
            Span::raw(" Next field  "),
            key("Enter"),
            Span::raw(" Join  "),
            key("Esc"),
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
