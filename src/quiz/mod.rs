pub mod engine;
pub mod questions;

pub use engine::{QuizEngine, QuizOutcome, QuizPhase};
pub use questions::QUIZ_QUESTIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// One multiple-choice question. `correct_answer` must be one of `options`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct_answer: &'static str,
    pub difficulty: Difficulty,
}

impl QuizQuestion {
    /// Exact, case-sensitive comparison against the option text.
    pub fn is_correct(&self, option: &str) -> bool {
        option == self.correct_answer
    }
}
