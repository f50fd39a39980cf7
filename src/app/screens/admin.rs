//! Admin screen implementation
//!
//! Lists the question bank and provides a form to add questions and a
//! key to delete the selected one. Every change is saved immediately.

use crate::config::persistence::QuestionBankStorage;
use crate::models::{builtin_questions, Question};
use crate::util::{count_label, option_label};
use crate::{QuizError, Result, OPTION_COUNT};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Focusable parts of the admin screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminField {
    List,
    Prompt,
    Option(usize),
    Correct,
    AddButton,
}

impl AdminField {
    fn all() -> Vec<Self> {
        let mut fields = vec![Self::List, Self::Prompt];
        fields.extend((0..OPTION_COUNT).map(Self::Option));
        fields.extend([Self::Correct, Self::AddButton]);
        fields
    }

    fn is_text(&self) -> bool {
        matches!(self, Self::Prompt | Self::Option(_))
    }
}

/// Kind of status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Deleted,
    Error,
}

/// What the admin screen asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Back,
}

/// Admin screen component
#[derive(Debug)]
pub struct AdminScreen {
    storage: QuestionBankStorage,
    questions: Vec<Question>,
    list_state: ListState,
    focus: AdminField,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_option_index: usize,
    status: Option<(StatusKind, String)>,
}

impl AdminScreen {
    /// Create an admin screen persisting to `storage`
    pub fn new(storage: QuestionBankStorage) -> Self {
        Self {
            storage,
            questions: Vec::new(),
            list_state: ListState::default(),
            focus: AdminField::Prompt,
            prompt: String::new(),
            options: Default::default(),
            correct_option_index: 0,
            status: None,
        }
    }

    /// Reload the bank from storage
    pub fn enter(&mut self) {
        self.status = None;
        self.questions = match self.storage.load_questions() {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load question bank, showing built-in set");
                self.status = Some((StatusKind::Error, e.to_string()));
                builtin_questions()
            }
        };
        self.list_state
            .select(if self.questions.is_empty() { None } else { Some(0) });
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn focus(&self) -> AdminField {
        self.focus
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn status(&self) -> Option<(StatusKind, &str)> {
        self.status.as_ref().map(|(kind, text)| (*kind, text.as_str()))
    }

    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    /// Set the form contents in one go
    pub fn fill_form(&mut self, prompt: &str, options: [&str; OPTION_COUNT], correct: usize) {
        self.prompt = prompt.to_string();
        self.options = options.map(str::to_string);
        self.correct_option_index = correct.min(OPTION_COUNT - 1);
    }

    /// Id for the next question: one past the largest id in use
    pub fn next_id(&self) -> Result<u32> {
        let largest = self.questions.iter().map(|q| q.id).max().unwrap_or(0);
        largest.checked_add(1).ok_or_else(|| {
            QuizError::InvalidQuestion(format!("no question id left after {}", largest))
        })
    }

    /// Add the question described by the form and save the bank.
    ///
    /// The bank and the form only change once the save succeeded.
    pub fn add_question(&mut self) -> Result<u32> {
        let blank = self.prompt.trim().is_empty() || self.options.iter().any(|o| o.trim().is_empty());
        if blank {
            return Err(QuizError::InvalidQuestion(
                "Please fill in all fields".to_string(),
            ));
        }

        let question = Question {
            id: self.next_id()?,
            prompt: self.prompt.trim().to_string(),
            options: self.options.clone().map(|o| o.trim().to_string()),
            correct_option_index: self.correct_option_index,
        };
        question.validate()?;

        let id = question.id;
        let mut updated = self.questions.clone();
        updated.push(question);
        self.storage.save_questions(&updated)?;
        self.questions = updated;
        tracing::info!(id, "question added");

        self.clear_form();
        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
        Ok(id)
    }

    /// Remove the selected question and save the bank.
    ///
    /// On a failed save the question is put back.
    pub fn delete_selected(&mut self) -> Result<Option<Question>> {
        let Some(index) = self.list_state.selected() else {
            return Ok(None);
        };
        if index >= self.questions.len() {
            return Ok(None);
        }

        let removed = self.questions.remove(index);
        if let Err(e) = self.storage.save_questions(&self.questions) {
            self.questions.insert(index, removed);
            return Err(e);
        }
        tracing::info!(id = removed.id, "question removed");

        let selected = if self.questions.is_empty() {
            None
        } else {
            Some(index.min(self.questions.len() - 1))
        };
        self.list_state.select(selected);
        Ok(Some(removed))
    }

    /// Clear the add-question form
    pub fn clear_form(&mut self) {
        self.prompt.clear();
        self.options = Default::default();
        self.correct_option_index = 0;
    }

    fn select_previous_question(&mut self) {
        if let Some(i) = self.list_state.selected() {
            self.list_state.select(Some(i.saturating_sub(1)));
        }
    }

    fn select_next_question(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if i + 1 < self.questions.len() {
                self.list_state.select(Some(i + 1));
            }
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            AdminField::Prompt => Some(&mut self.prompt),
            AdminField::Option(i) => self.options.get_mut(i),
            _ => None,
        }
    }

    fn focus_next(&mut self) {
        let fields = AdminField::all();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    fn focus_previous(&mut self) {
        let fields = AdminField::all();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    fn run_add(&mut self) {
        self.status = Some(match self.add_question() {
            Ok(_) => (StatusKind::Success, "Question added successfully".to_string()),
            Err(e) => (StatusKind::Error, crate::error::user_friendly_message(&e)),
        });
    }

    fn run_delete(&mut self) {
        match self.delete_selected() {
            Ok(Some(_)) => self.status = Some((StatusKind::Deleted, "Question removed".to_string())),
            Ok(None) => {}
            Err(e) => {
                self.status = Some((StatusKind::Error, crate::error::user_friendly_message(&e)))
            }
        }
    }

    /// Handle key events for the admin screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<AdminAction> {
        match key.code {
            KeyCode::Esc => return Some(AdminAction::Back),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            KeyCode::Enter => match self.focus {
                AdminField::List => {}
                _ => self.run_add(),
            },
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(c)
                if self.focus.is_text() && !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                if let Some(text) = self.focused_text() {
                    text.push(c);
                }
            }
            _ => match self.focus {
                AdminField::List => match key.code {
                    KeyCode::Up | KeyCode::Char('k') => self.select_previous_question(),
                    KeyCode::Down | KeyCode::Char('j') => self.select_next_question(),
                    KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('x') => self.run_delete(),
                    _ => {}
                },
                AdminField::Correct => match key.code {
                    KeyCode::Left | KeyCode::Up => {
                        self.correct_option_index =
                            (self.correct_option_index + OPTION_COUNT - 1) % OPTION_COUNT;
                    }
                    KeyCode::Right | KeyCode::Down => {
                        self.correct_option_index = (self.correct_option_index + 1) % OPTION_COUNT;
                    }
                    KeyCode::Char(c) => {
                        if let Some(option) = crate::util::option_from_char(c, OPTION_COUNT) {
                            self.correct_option_index = option;
                        }
                    }
                    _ => {}
                },
                _ => {}
            },
        }
        None
    }

    /// Render the admin screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(10),   // List and form
                Constraint::Length(3), // Status
                Constraint::Length(3), // Help text
            ])
            .split(size);

        let title = Paragraph::new("Admin Panel")
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
        f.render_widget(title, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        self.render_list(f, body[0]);
        self.render_form(f, body[1]);
        self.render_status(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn border_for(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .questions
            .iter()
            .map(|question| {
                let mut lines = vec![Line::from(Span::styled(
                    format!("#{} {}", question.id, question.prompt),
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                for (index, option) in question.options.iter().enumerate() {
                    let style = if question.is_correct(index) {
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    lines.push(Line::from(Span::styled(
                        format!("   {}. {}", option_label(index), option),
                        style,
                    )));
                }
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_for(self.focus == AdminField::List))
                    .title(format!(
                        "Question Bank ({})",
                        count_label(self.questions.len(), "question")
                    )),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let field = |label: String, value: &str, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{:<10}", label), style),
                Span::raw(format!("{}{}", value, cursor)),
            ])
        };

        let mut lines = vec![field(
            "Question".to_string(),
            &self.prompt,
            self.focus == AdminField::Prompt,
        )];
        for (index, option) in self.options.iter().enumerate() {
            lines.push(field(
                format!("Option {}", option_label(index)),
                option,
                self.focus == AdminField::Option(index),
            ));
        }
        lines.push(field(
            "Correct".to_string(),
            &format!("◀ {} ▶", option_label(self.correct_option_index)),
            self.focus == AdminField::Correct,
        ));
        lines.push(Line::from(""));

        let button_style = if self.focus == AdminField::AddButton {
            Style::default().bg(Color::Green).fg(Color::Black)
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::from(Span::styled(" + Add Question ", button_style)));

        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.border_for(self.focus != AdminField::List))
                .title("Add New Question"),
        );
        f.render_widget(form, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let (text, color) = match &self.status {
            Some((StatusKind::Success, text)) => (format!("✔ {}", text), Color::Green),
            Some((StatusKind::Deleted, text)) => (format!("✖ {}", text), Color::Yellow),
            Some((StatusKind::Error, text)) => (format!("⚠ {}", text), Color::Red),
            None => (String::new(), Color::DarkGray),
        };

        let status = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
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
            Span::raw(" Add  "),
            key("D"),
            Span::raw(" Delete (list)  "),
            key("Esc"),
            Span::raw(" Back"),
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
    use tempfile::TempDir;

    fn screen_in(dir: &TempDir) -> AdminScreen {
        let storage = QuestionBankStorage::at(dir.path().join("questions.json"));
        let mut screen = AdminScreen::new(storage);
        screen.enter();
        screen
    }

    fn press(screen: &mut AdminScreen, code: KeyCode) -> Option<AdminAction> {
        screen.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_loads_builtin_bank() {
        let dir = TempDir::new().unwrap();
        let screen = screen_in(&dir);
        assert_eq!(screen.questions().len(), 3);
        assert_eq!(screen.selected_index(), Some(0));
        assert_eq!(screen.next_id().unwrap(), 4);
    }

    #[test]
    fn test_add_question_persists_and_clears_form() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        screen.fill_form("Largest ocean?", ["Atlantic", "Pacific", "Indian", "Arctic"], 1);

        let id = screen.add_question().unwrap();
        assert_eq!(id, 4);
        assert_eq!(screen.correct_option_index(), 0);

        let saved = QuestionBankStorage::at(dir.path().join("questions.json"))
            .load_questions()
            .unwrap();
        assert_eq!(saved.len(), 4);
        assert_eq!(saved[3].prompt, "Largest ocean?");
        assert_eq!(saved[3].correct_option(), "Pacific");
    }

    #[test]
    fn test_blank_field_rejected() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        screen.fill_form("Largest ocean?", ["Atlantic", " ", "Indian", "Arctic"], 1);

        press(&mut screen, KeyCode::Enter);
        assert_eq!(
            screen.status(),
            Some((StatusKind::Error, "Please fill in all fields"))
        );
        assert_eq!(screen.questions().len(), 3);
        // Form is kept for correction
        assert_eq!(screen.correct_option_index(), 1);
    }

    #[test]
    fn test_new_id_follows_largest() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        // Drop the first question; ids 2 and 3 remain
        screen.delete_selected().unwrap();
        assert_eq!(screen.next_id().unwrap(), 4);
        screen.fill_form("Q", ["a", "b", "c", "d"], 3);
        assert_eq!(screen.add_question().unwrap(), 4);
    }

    #[test]
    fn test_delete_via_list_keys() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);

        press(&mut screen, KeyCode::BackTab);
        assert_eq!(screen.focus(), AdminField::List);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.selected_index(), Some(2));

        press(&mut screen, KeyCode::Char('d'));
        assert_eq!(screen.status(), Some((StatusKind::Deleted, "Question removed")));
        assert_eq!(screen.questions().len(), 2);
        assert_eq!(screen.selected_index(), Some(1));
    }

    #[test]
    fn test_deleting_everything_saves_empty_bank() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        while screen.delete_selected().unwrap().is_some() {}
        assert!(screen.questions().is_empty());
        assert_eq!(screen.selected_index(), None);

        let saved = QuestionBankStorage::at(dir.path().join("questions.json"))
            .load_questions()
            .unwrap();
        assert!(saved.is_empty());
    }

    #[test]
    fn test_typing_into_form_fields() {
        let dir = TempDir::new().unwrap();
        let mut screen = screen_in(&dir);
        for c in "Hi?".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        press(&mut screen, KeyCode::Tab);
        assert_eq!(screen.focus(), AdminField::Option(0));
        press(&mut screen, KeyCode::Char('x'));
        press(&mut screen, KeyCode::Backspace);
        press(&mut screen, KeyCode::Char('y'));

        for _ in 0..OPTION_COUNT {
            press(&mut screen, KeyCode::Tab);
        }
        assert_eq!(screen.focus(), AdminField::Correct);
        press(&mut screen, KeyCode::Char('c'));
        assert_eq!(screen.correct_option_index(), 2);
        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.correct_option_index(), 3);

        assert_eq!(press(&mut screen, KeyCode::Esc), Some(AdminAction::Back));
    }
    fn blocked_screen(dir: &TempDir) -> AdminScreen {
        // A regular file where the storage expects a directory
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut screen = AdminScreen::new(QuestionBankStorage::at(blocker.join("questions.json")));
        screen.enter();
        screen
    }

    #[test]
    fn test_failed_save_keeps_bank_and_form() {
        let dir = TempDir::new().unwrap();
        let mut screen = blocked_screen(&dir);
        assert_eq!(screen.questions().len(), 3);
        screen.fill_form("Largest ocean?", ["Atlantic", "Pacific", "Indian", "Arctic"], 1);

        assert!(screen.add_question().is_err());
        assert_eq!(screen.questions().len(), 3);
        assert_eq!(screen.next_id().unwrap(), 4);
        assert_eq!(screen.correct_option_index(), 1);

        press(&mut screen, KeyCode::Enter);
        assert!(matches!(screen.status(), Some((StatusKind::Error, _))));
        assert_eq!(screen.questions().len(), 3);
    }

    #[test]
    fn test_failed_delete_restores_question() {
        let dir = TempDir::new().unwrap();
        let mut screen = blocked_screen(&dir);
        let before = screen.questions().to_vec();

        assert!(screen.delete_selected().is_err());
        assert_eq!(screen.questions(), before.as_slice());
        assert_eq!(screen.selected_index(), Some(0));
    }

    #[test]
    fn test_exhausted_ids_rejected() {
        let dir = TempDir::new().unwrap();
        let storage = QuestionBankStorage::at(dir.path().join("questions.json"));
        let last = Question::new(u32::MAX, "Q", ["a", "b", "c", "d"], 0).unwrap();
        storage.save_questions(&[last]).unwrap();

        let mut screen = AdminScreen::new(storage);
        screen.enter();
        assert!(matches!(screen.next_id(), Err(QuizError::InvalidQuestion(_))));

        screen.fill_form("Another", ["a", "b", "c", "d"], 0);
        assert!(matches!(screen.add_question(), Err(QuizError::InvalidQuestion(_))));
        assert_eq!(screen.questions().len(), 1);
    }
}
