mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{debug, error};
use multitables::{
    config::{Config, ConfigStore, FileConfigStore, DIFFICULTY_CHOICES, QUESTION_COUNT_CHOICES},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner},
    Phase, Quiz, RandomOperands, SubmitResult,
};
use rand::rngs::StdRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// Longest answer the field accepts; keeps parsing inside i64
const MAX_ANSWER_DIGITS: usize = 18;

/// multiplication table quiz for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick a difficulty and a number of questions, answer the multiplication questions, and see your score. Operands range from 1 to difficulty + 2."
)]
pub struct Cli {
    /// preselected difficulty level (2-12); defaults to the config file, then 2
    #[clap(short = 'd', long, value_parser = clap::value_parser!(i64).range(2..=12))]
    difficulty: Option<i64>,

    /// preselected number of questions; defaults to the config file, then 5
    #[clap(short = 'q', long = "questions", value_enum)]
    question_count: Option<QuestionCount>,

    /// seed for a reproducible question set
    #[clap(long)]
    seed: Option<u64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum QuestionCount {
    #[value(name = "5")]
    #[strum(serialize = "5")]
    Five,
    #[value(name = "10")]
    #[strum(serialize = "10")]
    Ten,
    #[value(name = "20")]
    #[strum(serialize = "20")]
    Twenty,
}

impl QuestionCount {
    fn as_count(&self) -> usize {
        match self {
            QuestionCount::Five => 5,
            QuestionCount::Ten => 10,
            QuestionCount::Twenty => 20,
        }
    }
}

impl Cli {
    /// Layer CLI flags over the file config
    fn to_config(&self, file: Config) -> Config {
        Config {
            difficulty: self.difficulty.unwrap_or(file.difficulty),
            question_count: self
                .question_count
                .map_or(file.question_count, |q| q.as_count()),
        }
        .normalized()
    }

    fn operand_source(&self) -> RandomOperands<StdRng> {
        self.seed
            .map_or_else(RandomOperands::from_entropy, RandomOperands::seeded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    /// Picker values restored by "Start over"
    pub defaults: Config,
    pub difficulty: i64,
    pub question_count: usize,
    pub answer: String,
    pub quiz: Quiz<RandomOperands<StdRng>>,
    pub status: Option<String>,
}

impl App {
    pub fn new(cli: &Cli, file_config: Config) -> Self {
        let defaults = cli.to_config(file_config);
        Self {
            defaults,
            difficulty: defaults.difficulty,
            question_count: defaults.question_count,
            answer: String::new(),
            quiz: Quiz::new(cli.operand_source()),
            status: None,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        match self.quiz.phase() {
            Phase::Configuring => self.on_configure_key(key.code),
            Phase::Active => self.on_answer_key(key.code),
            Phase::Finished => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('r')) {
                    self.start_over();
                }
            }
        }
        Flow::Continue
    }

    fn on_configure_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.difficulty = (self.difficulty + 1).min(*DIFFICULTY_CHOICES.end());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.difficulty = (self.difficulty - 1).max(*DIFFICULTY_CHOICES.start());
            }
            KeyCode::Left | KeyCode::Char('h') => self.step_question_count(-1),
            KeyCode::Right | KeyCode::Char('l') => self.step_question_count(1),
            KeyCode::Char(c @ '1'..='3') => {
                let idx = c as usize - '1' as usize;
                self.question_count = QUESTION_COUNT_CHOICES[idx];
            }
            KeyCode::Enter | KeyCode::Char('s') => self.start(),
            _ => {}
        }
    }

    fn step_question_count(&mut self, delta: isize) {
        let pos = QUESTION_COUNT_CHOICES
            .iter()
            .position(|&c| c == self.question_count)
            .unwrap_or(0);
        let next = pos
            .saturating_add_signed(delta)
            .min(QUESTION_COUNT_CHOICES.len() - 1);
        self.question_count = QUESTION_COUNT_CHOICES[next];
    }

    fn on_answer_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digits = self.answer.trim_start_matches('-').len();
                if digits < MAX_ANSWER_DIGITS {
                    self.answer.push(c);
                }
            }
            KeyCode::Char('-') if self.answer.is_empty() => self.answer.push('-'),
            KeyCode::Backspace => {
                self.answer.pop();
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    pub fn start(&mut self) {
        match self.quiz.start(self.picked_config().into()) {
            Ok(_) => {
                self.answer.clear();
                self.status = None;
            }
            Err(e) => {
                error!("could not start quiz: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    /// Current picker values
    pub fn picked_config(&self) -> Config {
        Config {
            difficulty: self.difficulty,
            question_count: self.question_count,
        }
    }

    /// An empty field counts as 0, like the original answer field
    pub fn parsed_answer(&self) -> i64 {
        match self.answer.as_str() {
            "" | "-" => 0,
            s => s.parse().unwrap_or(0),
        }
    }

    pub fn submit(&mut self) {
        let value = self.parsed_answer();
        self.answer.clear();
        match self.quiz.submit_answer(value) {
            Ok(SubmitResult::Next { question, score }) => {
                debug!("showing {} at score {}", question, score);
                self.status = None;
            }
            Ok(SubmitResult::Complete { final_score }) => {
                debug!("showing results, final score {}", final_score);
                self.status = None;
            }
            Err(e) => {
                error!("could not submit answer: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    /// Back to the pickers with their defaults restored
    pub fn start_over(&mut self) {
        self.quiz.reset();
        self.difficulty = self.defaults.difficulty;
        self.question_count = self.defaults.question_count;
        self.answer.clear();
        self.status = None;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let file_config = FileConfigStore::new().load();
    let mut app = App::new(&cli, file_config);

    enable_raw_mode()?;
    restoring(|| run_in_alternate_screen(&mut app), disable_raw_mode)
}

/// Run `body`, then `restore` whether or not `body` failed; `body`'s error wins
fn restoring<T>(
    body: impl FnOnce() -> Result<T, Box<dyn Error>>,
    restore: impl FnOnce() -> io::Result<()>,
) -> Result<T, Box<dyn Error>> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn run_in_alternate_screen(app: &mut App) -> Result<(), Box<dyn Error>> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    restoring(
        || {
            let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
            let result = start_tui(&mut terminal, app);
            terminal.show_cursor()?;
            result
        },
        || execute!(io::stdout(), LeaveAlternateScreen),
    )
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    terminal.draw(|f| ui(app, f))?;
    loop {
        match runner.step() {
            QuizEvent::Tick => continue,
            QuizEvent::Resize => {}
            QuizEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
