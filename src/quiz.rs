use rand::seq::IndexedRandom;

use crate::labels::QUIZ_QUESTIONS;
use crate::pipeline::core::PredictionSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub prompt: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuizUpdate {
    QuestionAsked(String),
    AnsweredCorrectly { answer: String },
}

/// Practice quiz driven by published prediction state: a question is drawn
/// when a hand first enters the frame, and a confident prediction of the
/// expected letter answers it.
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    current: Option<QuizQuestion>,
    hand_was_in_frame: bool,
    confidence_threshold: f64,
}

impl Quiz {
    pub fn new(confidence_threshold: f64) -> Self {
        let questions = QUIZ_QUESTIONS
            .iter()
            .map(|(prompt, answer)| QuizQuestion {
                prompt: prompt.to_string(),
                answer: answer.to_string(),
            })
            .collect();
        Self {
            questions,
            current: None,
            hand_was_in_frame: false,
            confidence_threshold,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.current.as_ref()
    }

    pub fn observe(&mut self, snapshot: &PredictionSnapshot) -> Option<QuizUpdate> {
        let hand_entered = snapshot.hand_in_frame && !self.hand_was_in_frame;
        self.hand_was_in_frame = snapshot.hand_in_frame;

        if hand_entered && self.current.is_none() {
            let question = self.questions.choose(&mut rand::rng())?.clone();
            let prompt = question.prompt.clone();
            self.current = Some(question);
            return Some(QuizUpdate::QuestionAsked(prompt));
        }

        let question = self.current.as_ref()?;
        if !snapshot.hand_in_frame {
            return None;
        }

        let confidence = snapshot.metrics.max_value() * 100.0;
        let matches_answer = snapshot.label.eq_ignore_ascii_case(&question.answer);
        if matches_answer && confidence >= self.confidence_threshold {
            let answer = question.answer.clone();
            self.current = None;
            return Some(QuizUpdate::AnsweredCorrectly { answer });
        }

        None
    }
}
