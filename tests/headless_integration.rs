use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use multitables::{
    runtime::{FixedTicker, QuizEvent, Runner, TestEventSource},
    FixedOperands, Phase, Quiz, SessionConfig, SubmitResult,
};

fn send_answer(tx: &mpsc::Sender<QuizEvent>, answer: &str) {
    for c in answer.chars() {
        tx.send(QuizEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
    tx.send(QuizEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)))
        .unwrap();
}

// Headless run using the library runtime and a Quiz without a TTY:
// keystrokes are collected into an answer buffer and submitted on Enter.
#[test]
fn headless_quiz_flow_completes() {
    let mut quiz = Quiz::new(FixedOperands::new(vec![3, 4]));
    quiz.start(SessionConfig::new(2, 5)).unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for answer in ["12", "12", "5", "12", "5"] {
        send_answer(&tx, answer);
    }

    let mut buffer = String::new();
    let mut scores = Vec::new();
    let mut final_score = None;
    for _ in 0..200u32 {
        match runner.step() {
            QuizEvent::Tick | QuizEvent::Resize => {}
            QuizEvent::Key(key) => match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Enter => {
                    let value = buffer.parse().unwrap_or(0);
                    buffer.clear();
                    match quiz.submit_answer(value).unwrap() {
                        SubmitResult::Next { score, .. } => scores.push(score),
                        SubmitResult::Complete { final_score: score } => {
                            scores.push(score);
                            final_score = Some(score);
                            break;
                        }
                    }
                }
                _ => {}
            },
        }
    }

    assert_eq!(scores, vec![1, 2, 1, 2, 1]);
    assert_eq!(final_score, Some(1));
    assert_eq!(quiz.phase(), Phase::Finished);
}

#[test]
fn headless_idle_runner_only_ticks() {
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );

    for _ in 0..5u32 {
        assert!(matches!(runner.step(), QuizEvent::Tick));
    }
}
