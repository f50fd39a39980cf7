//! Quiz screen implementation
//!
//! Displays the active question with its countdown, the four options,
//! and answer feedback once the question is locked.

use crate::navigation::Navigator;
use crate::session::{ControllerUpdate, Feedback, Phase, QuizController};
use crate::store::KeyValueStore;
use crate::util::{option_from_char, option_label, progress_percent};
use crate::OPTION_COUNT;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Countdown turns red at or below this many seconds
const LOW_TIME_SECS: u32 = 5;

/// What the quiz screen asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    Abandon,
}

/// Quiz screen component
#[derive(Debug, Default)]
pub struct QuizScreen {
    controller: Option<QuizController>,
}

impl QuizScreen {
    /// Create a quiz screen with no session
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a freshly started session, abandoning any previous one
    pub fn start(&mut self, controller: QuizController) {
        self.abandon();
        self.controller = Some(controller);
    }

    pub fn controller(&self) -> Option<&QuizController> {
        self.controller.as_ref()
    }

    /// Tear down the current session without persisting anything
    pub fn abandon(&mut self) {
        if let Some(controller) = self.controller.take() {
            if !controller.is_finished() {
                controller.abandon();
            }
        }
    }

    /// Apply every timer event that is ready
    pub fn poll_timers(
        &mut self,
        store: &mut dyn KeyValueStore,
        navigator: &mut dyn Navigator,
    ) -> Vec<ControllerUpdate> {
        let mut updates = Vec::new();
        if let Some(controller) = self.controller.as_mut() {
            while let Some(event) = controller.try_next_event() {
                let update = controller.handle_event(event, store, navigator);
                if update != ControllerUpdate::Unchanged {
                    updates.push(update);
                }
                if controller.is_finished() {
                    break;
                }
            }
        }
        updates
    }

    /// Handle key events for the quiz screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<QuizAction> {
        if key.code == KeyCode::Esc {
            return Some(QuizAction::Abandon);
        }

        let controller = self.controller.as_mut()?;
        let current = controller.session().selected_option();

        match key.code {
            KeyCode::Up | KeyCode::Left => {
                let option = current.map_or(OPTION_COUNT - 1, |o| {
                    (o + OPTION_COUNT - 1) % OPTION_COUNT
                });
                controller.select(option);
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
                let option = current.map_or(0, |o| (o + 1) % OPTION_COUNT);
                controller.select(option);
            }
            KeyCode::Enter => {
                controller.submit();
            }
            KeyCode::Char(c) => {
                if let Some(option) = option_from_char(c, OPTION_COUNT) {
                    controller.select(option);
                }
            }
            _ => {}
        }
        None
    }

    /// Render the quiz screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();
        let Some(controller) = &self.controller else {
            let waiting = Paragraph::new("No quiz in progress")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Quiz"));
            f.render_widget(waiting, size);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Question counter and score
                Constraint::Length(3), // Progress
                Constraint::Length(3), // Countdown
                Constraint::Length(4), // Prompt
                Constraint::Min(6),    // Options
                Constraint::Length(3), // Feedback / submit hint
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_header(f, chunks[0], controller);
        self.render_progress(f, chunks[1], controller);
        self.render_countdown(f, chunks[2], controller);
        self.render_prompt(f, chunks[3], controller);
        self.render_options(f, chunks[4], controller);
        self.render_feedback(f, chunks[5], controller);
        self.render_help(f, chunks[6]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect, controller: &QuizController) {
        let session = controller.session();
        let text = Line::from(vec![
            Span::styled(
                format!(
                    "Question {} of {}",
                    session.current_index() + 1,
                    session.question_count()
                ),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled(
                format!("🏆 {} points", session.score()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let header = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_progress(&self, f: &mut Frame, area: Rect, controller: &QuizController) {
        let session = controller.session();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Magenta))
            .percent(progress_percent(
                session.current_index(),
                session.question_count(),
            ));
        f.render_widget(gauge, area);
    }

    fn render_countdown(&self, f: &mut Frame, area: Rect, controller: &QuizController) {
        let left = controller.session().time_remaining();
        let color = if !controller.is_counting() {
            Color::DarkGray
        } else if left <= LOW_TIME_SECS {
            Color::Red
        } else {
            Color::Cyan
        };

        let countdown = Paragraph::new(format!("⏱ {}", left))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(countdown, area);
    }

    fn render_prompt(&self, f: &mut Frame, area: Rect, controller: &QuizController) {
        let prompt = Paragraph::new(controller.session().current_question().prompt.clone())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(prompt, area);
    }

    fn render_options(&self, f: &mut Frame, area: Rect, controller: &QuizController) {
        let session = controller.session();
        let question = session.current_question();
        let selected = session.selected_option();
        let answered = session.is_answered();

        let items: Vec<ListItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let style = if answered && question.is_correct(index) {
                    Style::default().fg(Color::Black).bg(Color::Green)
                } else if answered && selected == Some(index) {
                    Style::default().fg(Color::White).bg(Color::Red)
                } else if selected == Some(index) {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" {}. ", option_label(index)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(option.clone()),
                ]))
                .style(style)
            })
            .collect();

        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Answers"));
        f.render_widget(list, area);
    }

    fn render_feedback(&self, f: &mut Frame, area: Rect, controller: &QuizController) {
        let session = controller.session();
        let (text, color) = match session.feedback() {
            Some(Feedback::Correct) => ("🎉 Correct! Great job!".to_string(), Color::Green),
            Some(Feedback::Incorrect { correct_option }) => (
                format!("❌ Incorrect. The correct answer was: {}", correct_option),
                Color::Red,
            ),
            None if session.can_submit() => {
                ("Press Enter to submit your answer".to_string(), Color::Yellow)
            }
            None if session.phase() == Phase::Active => {
                ("Choose an answer".to_string(), Color::DarkGray)
            }
            None => (String::new(), Color::DarkGray),
        };

        let text = if controller.is_advancing() {
            let next = if session.is_last_question() {
                "Final results coming up"
            } else {
                "Next question coming up"
            };
            format!("{}  ({})", text, next)
        } else {
            text
        };

        let feedback = Paragraph::new(text)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
        f.render_widget(feedback, area);
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
            key("↑↓ / A-D"),
            Span::raw(" Choose  "),
            key("Enter"),
            Span::raw(" Submit  "),
            key("Esc"),
            Span::raw(" Leave"),
        ])];

        let help = Paragraph::new(help_text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(help, area);
    }
}
