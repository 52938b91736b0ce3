use itertools::Itertools;
use multitables::{
    config::{DIFFICULTY_CHOICES, QUESTION_COUNT_CHOICES},
    Phase,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const ANSWER_BOX_MIN_WIDTH: u16 = 16;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.quiz.phase() {
            Phase::Configuring => render_configure(self, area, buf),
            Phase::Active => render_question(self, area, buf),
            Phase::Finished => render_results(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn hints(pairs: &[(&str, &str)]) -> Paragraph<'static> {
    let text = pairs
        .iter()
        .map(|(key, action)| format!("({}) {}", key, action))
        .join("  ");
    Paragraph::new(text)
        .style(dim().add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center)
}

fn status_line(app: &App) -> Paragraph<'static> {
    Paragraph::new(app.status.clone().unwrap_or_default())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
}

/// One picker row; the selected value is bracketed and highlighted
fn picker<I>(values: I, selected: i64) -> Line<'static>
where
    I: IntoIterator<Item = i64>,
{
    let selected_style = bold().fg(Color::Black).bg(Color::Cyan);
    values
        .into_iter()
        .map(|v| {
            if v == selected {
                Span::styled(format!("[{}]", v), selected_style)
            } else {
                Span::styled(format!(" {} ", v), dim())
            }
        })
        .collect::<Vec<Span>>()
        .into()
}

fn render_configure(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(1),
            Constraint::Length(1), // difficulty picker
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1), // question count picker
            Constraint::Length(1),
            Constraint::Length(1), // start button
            Constraint::Min(0),
            Constraint::Length(1), // status
            Constraint::Length(1), // hints
        ])
        .split(area);

    Paragraph::new("MultiTable")
        .block(Block::default().borders(Borders::ALL))
        .style(bold().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new("Difficulty level")
        .style(bold())
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    Paragraph::new(picker(DIFFICULTY_CHOICES, app.difficulty))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new("How many questions would you like to answer?")
        .style(bold())
        .alignment(Alignment::Center)
        .render(chunks[4], buf);
    Paragraph::new(picker(
        QUESTION_COUNT_CHOICES.iter().map(|&c| c as i64),
        app.question_count as i64,
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    Paragraph::new(Span::styled(
        "  Start  ",
        bold().fg(Color::White).bg(Color::Blue),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);

    status_line(app).render(chunks[9], buf);
    hints(&[
        ("↑/↓", "difficulty"),
        ("←/→", "questions"),
        ("enter", "start"),
        ("esc", "quit"),
    ])
    .render(chunks[10], buf);
}

fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // prompt
            Constraint::Length(1),
            Constraint::Length(3), // answer box
            Constraint::Min(0),
            Constraint::Length(1), // progress
            Constraint::Length(1), // status
            Constraint::Length(1), // hints
        ])
        .split(area);

    let Some(session) = app.quiz.session() else {
        return;
    };
    let question = match app.quiz.current_prompt() {
        Ok(q) => q,
        Err(e) => {
            Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
            return;
        }
    };

    Paragraph::new(Span::styled(question.prompt(), bold().fg(Color::Yellow)))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

    let answer = if app.answer.is_empty() {
        Line::from(vec![Span::styled("0", dim()), Span::styled("_", dim())])
    } else {
        Line::from(vec![
            Span::styled(app.answer.clone(), bold()),
            Span::styled("_", dim()),
        ])
    };
    let box_width = (app.answer.width() as u16 + 4).max(ANSWER_BOX_MIN_WIDTH);
    Paragraph::new(answer)
        .block(Block::default().borders(Borders::ALL).title("Answer"))
        .alignment(Alignment::Center)
        .render(centered_rect(box_width, 3, chunks[3]), buf);

    Paragraph::new(format!(
        "Question {} of {}  ·  Score {}",
        session.current_index() + 1,
        session.question_count(),
        session.score()
    ))
    .style(dim())
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    status_line(app).render(chunks[6], buf);
    hints(&[("enter", "next question"), ("esc", "quit")]).render(chunks[7], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let score = app.quiz.final_score().unwrap_or_default();
    let message = format!("Your score is: {}", score);
    let action = "(enter) Start over";

    let width = message.width().max(action.width()) as u16 + 6;
    let dialog = centered_rect(width, 6, area);

    let score_style = if score > 0 {
        bold().fg(Color::Green)
    } else {
        bold().fg(Color::Red)
    };

    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, score_style)),
        Line::from(""),
        Line::from(Span::styled(action, dim())),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("That's it!")
            .title_alignment(Alignment::Center),
    )
    .alignment(Alignment::Center)
    .render(dialog, buf);
}

/// Rect of at most `width` x `height` centered inside `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
