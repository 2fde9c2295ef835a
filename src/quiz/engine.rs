use crate::error::ValidationError;

use super::{QuizQuestion, QUIZ_QUESTIONS};

/// What a finished quiz hands back to the view coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub participant_name: String,
}

/// One participant's attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    participant_name: String,
    current_index: usize,
    score: usize,
    selected_answer: Option<String>,
    is_answered: bool,
}

impl QuizSession {
    fn new(participant_name: String) -> Self {
        Self {
            participant_name,
            current_index: 0,
            score: 0,
            selected_answer: None,
            is_answered: false,
        }
    }

    pub fn participant_name(&self) -> &str {
        &self.participant_name
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.is_answered
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizPhase {
    #[default]
    NameInput,
    Playing(QuizSession),
    Finished(QuizOutcome),
}

/// Result of a recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub correct: bool,
    pub correct_answer: &'static str,
}

/// Linear walk over a fixed question set: `name_input -> playing -> finished`.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: &'static [QuizQuestion],
    phase: QuizPhase,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(QUIZ_QUESTIONS)
    }
}

impl QuizEngine {
    pub fn new(questions: &'static [QuizQuestion]) -> Self {
        Self {
            questions,
            phase: QuizPhase::NameInput,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.phase {
            QuizPhase::Playing(session) => Some(session),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        let questions = self.questions;
        self.session()
            .and_then(|session| questions.get(session.current_index))
    }

    pub fn is_last_question(&self) -> bool {
        self.session()
            .map(|session| session.current_index + 1 == self.questions.len())
            .unwrap_or(false)
    }

    pub fn start_session(&mut self, name: &str) -> Result<(), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !matches!(self.phase, QuizPhase::NameInput) {
            return Err(ValidationError::SessionActive);
        }
        if self.questions.is_empty() {
            return Err(ValidationError::NoQuestions);
        }

        log::debug!("Quiz session started for {:?}", name);
        self.phase = QuizPhase::Playing(QuizSession::new(name.to_string()));
        Ok(())
    }

    /// Records the first answer to the current question. Later answers to the
    /// same question, and answers outside a running session, return `None`.
    pub fn select_answer(&mut self, option: &str) -> Option<AnswerFeedback> {
        let questions = self.questions;
        let QuizPhase::Playing(session) = &mut self.phase else {
            return None;
        };
        if session.is_answered {
            return None;
        }
        let question = questions.get(session.current_index)?;

        let correct = question.is_correct(option);
        session.selected_answer = Some(option.to_string());
        session.is_answered = true;
        if correct {
            session.score += 1;
        }

        Some(AnswerFeedback {
            correct,
            correct_answer: question.correct_answer,
        })
    }

    /// Moves past an answered question. Returns the outcome once the last
    /// question is passed; does nothing while the current one is unanswered.
    pub fn advance(&mut self) -> Option<QuizOutcome> {
        let total = self.questions.len();
        let QuizPhase::Playing(session) = &mut self.phase else {
            return None;
        };
        if !session.is_answered {
            return None;
        }

        if session.current_index + 1 < total {
            session.current_index += 1;
            session.selected_answer = None;
            session.is_answered = false;
            return None;
        }

        let outcome = QuizOutcome {
            score: session.score,
            participant_name: std::mem::take(&mut session.participant_name),
        };
        log::info!(
            "Quiz finished by {:?} with {}/{}",
            outcome.participant_name,
            outcome.score,
            total
        );
        self.phase = QuizPhase::Finished(outcome.clone());
        Some(outcome)
    }

    /// Discards any session and returns to name input.
    pub fn reset(&mut self) {
        self.phase = QuizPhase::NameInput;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Difficulty;

    static FIVE: &[QuizQuestion] = &[
        QuizQuestion {
            question: "q1",
            options: &["a", "b"],
            correct_answer: "a",
            difficulty: Difficulty::Easy,
        },
        QuizQuestion {
            question: "q2",
            options: &["a", "b"],
            correct_answer: "b",
            difficulty: Difficulty::Easy,
        },
        QuizQuestion {
            question: "q3",
            options: &["x", "y", "z"],
            correct_answer: "z",
            difficulty: Difficulty::Medium,
        },
        QuizQuestion {
            question: "q4",
            options: &["Yes", "yes"],
            correct_answer: "Yes",
            difficulty: Difficulty::Medium,
        },
        QuizQuestion {
            question: "q5",
            options: &["1", "2", "3", "4"],
            correct_answer: "4",
            difficulty: Difficulty::Hard,
        },
    ];

    fn started(name: &str) -> QuizEngine {
        let mut engine = QuizEngine::new(FIVE);
        engine.start_session(name).unwrap();
        engine
    }

    #[test]
    fn start_session_begins_at_zero() {
        for name in ["Ada", "  Grace Hopper ", "李"] {
            let engine = started(name);
            let session = engine.session().unwrap();
            assert_eq!(session.current_index(), 0);
            assert_eq!(session.score(), 0);
            assert_eq!(session.participant_name(), name.trim());
            assert!(!session.is_answered());
            assert_eq!(session.selected_answer(), None);
            assert_eq!(engine.current_question().unwrap().question, "q1");
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        for name in ["", "   ", "\t\n"] {
            let mut engine = QuizEngine::new(FIVE);
            assert_eq!(engine.start_session(name), Err(ValidationError::EmptyName));
            assert_eq!(engine.phase(), &QuizPhase::NameInput);
        }
    }

    #[test]
    fn cannot_start_twice_or_without_questions() {
        let mut engine = started("Ada");
        assert_eq!(
            engine.start_session("Bob"),
            Err(ValidationError::SessionActive)
        );
        assert_eq!(engine.session().unwrap().participant_name(), "Ada");

        let mut empty = QuizEngine::new(&[]);
        assert_eq!(empty.start_session("Ada"), Err(ValidationError::NoQuestions));
    }

    #[test]
    fn correct_answer_scores_once() {
        let mut engine = started("Ada");
        let feedback = engine.select_answer("a").unwrap();
        assert!(feedback.correct);
        assert_eq!(engine.session().unwrap().score(), 1);

        // second selection before advancing is ignored
        assert_eq!(engine.select_answer("a"), None);
        assert_eq!(engine.select_answer("b"), None);
        let session = engine.session().unwrap();
        assert_eq!(session.score(), 1);
        assert_eq!(session.selected_answer(), Some("a"));
    }

    #[test]
    fn wrong_answer_leaves_score() {
        let mut engine = started("Ada");
        let feedback = engine.select_answer("b").unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_answer, "a");
        assert_eq!(engine.session().unwrap().score(), 0);
        assert!(engine.session().unwrap().is_answered());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut engine = started("Ada");
        for answer in ["a", "b", "z"] {
            engine.select_answer(answer);
            engine.advance();
        }
        assert!(!engine.select_answer("yes").unwrap().correct);
        assert_eq!(engine.session().unwrap().score(), 3);
    }

    #[test]
    fn built_in_questions_score_only_the_correct_option() {
        for index in 0..QUIZ_QUESTIONS.len() {
            let question = &QUIZ_QUESTIONS[index];
            for option in question.options {
                let mut engine = QuizEngine::default();
                engine.start_session("Ada").unwrap();
                for _ in 0..index {
                    engine.select_answer("");
                    engine.advance();
                }
                assert_eq!(engine.current_question(), Some(question));
                assert_eq!(engine.session().unwrap().score(), 0);

                let feedback = engine.select_answer(option).unwrap();
                let expected = usize::from(*option == question.correct_answer);
                assert_eq!(feedback.correct, expected == 1);
                assert_eq!(engine.session().unwrap().score(), expected);

                // repeating the same option changes nothing
                assert_eq!(engine.select_answer(option), None);
                assert_eq!(engine.session().unwrap().score(), expected);
            }
        }
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut engine = started("Ada");
        assert_eq!(engine.advance(), None);
        let session = engine.session().unwrap();
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_answered());

        engine.select_answer("a");
        assert_eq!(engine.advance(), None);
        let session = engine.session().unwrap();
        assert_eq!(session.current_index(), 1);
        assert!(!session.is_answered());
        assert_eq!(session.selected_answer(), None);
    }

    #[test]
    fn three_of_five_correct() {
        let mut engine = started("Ada");
        // 1, 3, 5 right; 2, 4 wrong
        let answers = ["a", "a", "z", "yes", "4"];
        let mut outcome = None;
        for (i, answer) in answers.iter().enumerate() {
            assert!(engine.session().unwrap().score() <= i);
            engine.select_answer(answer).unwrap();
            assert_eq!(engine.is_last_question(), i == answers.len() - 1);
            outcome = engine.advance();
        }

        let outcome = outcome.unwrap();
        assert_eq!(
            outcome,
            QuizOutcome {
                score: 3,
                participant_name: "Ada".to_string()
            }
        );
        assert_eq!(engine.phase(), &QuizPhase::Finished(outcome.clone()));
        assert_eq!(
            crate::certificate::percentage(outcome.score, engine.total_questions()),
            Some(60)
        );
    }

    #[test]
    fn finished_quiz_ignores_input_until_reset() {
        let mut engine = started("Ada");
        for answer in ["a", "b", "z", "Yes", "4"] {
            engine.select_answer(answer);
            engine.advance();
        }
        assert!(matches!(engine.phase(), QuizPhase::Finished(_)));
        assert_eq!(engine.select_answer("a"), None);
        assert_eq!(engine.advance(), None);
        assert_eq!(
            engine.start_session("Bob"),
            Err(ValidationError::SessionActive)
        );

        engine.reset();
        assert_eq!(engine.phase(), &QuizPhase::NameInput);
        engine.start_session("Bob").unwrap();
        assert_eq!(engine.session().unwrap().score(), 0);
    }

    #[test]
    fn answers_are_ignored_before_start() {
        let mut engine = QuizEngine::new(FIVE);
        assert_eq!(engine.select_answer("a"), None);
        assert_eq!(engine.advance(), None);
        assert_eq!(engine.current_question(), None);
    }
}
