use std::sync::Mutex;

use crate::pipeline::core::PredictionSnapshot;
use crate::prediction_sink::interface::PredictionSink;
use crate::quiz::{Quiz, QuizUpdate};

/// Prints the prediction overlay line whenever it changes, and relays quiz
/// prompts when quiz mode is on.
pub struct PredictionSinkConsole {
    last_line: Mutex<String>,
    quiz: Option<Mutex<Quiz>>,
}

impl PredictionSinkConsole {
    pub fn new() -> Self {
        Self {
            last_line: Mutex::new(String::new()),
            quiz: None,
        }
    }

    pub fn with_quiz(quiz: Quiz) -> Self {
        Self {
            last_line: Mutex::new(String::new()),
            quiz: Some(Mutex::new(quiz)),
        }
    }
}

impl PredictionSink for PredictionSinkConsole {
    fn publish(&self, snapshot: &PredictionSnapshot) {
        if let Some(quiz) = &self.quiz {
            match quiz.lock().unwrap().observe(snapshot) {
                Some(QuizUpdate::QuestionAsked(prompt)) => println!("? {}", prompt),
                Some(QuizUpdate::AnsweredCorrectly { answer }) => {
                    println!("Correct answer: {}", answer)
                }
                None => {}
            }
        }

        let line = if snapshot.label.is_empty() {
            "No hand in frame".to_string()
        } else {
            format!("{} {}", snapshot.label, snapshot.confidence)
        };

        let mut last_line = self.last_line.lock().unwrap();
        if *last_line != line {
            println!("{}", line);
            *last_line = line;
        }
    }
}
