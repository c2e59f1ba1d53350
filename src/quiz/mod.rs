pub mod problems;
pub mod session;

pub use problems::ProblemSet;
pub use session::{EndOfInput, Outcome, QuizSession, SessionState, Summary};

/// One question and the answer expected for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Problem {
    pub question: String,
    pub answer: String,
}

impl Problem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Whether `given` matches the expected answer once surrounding whitespace is dropped.
    pub fn is_correct(&self, given: &str) -> bool {
        check_answer(&self.answer, given)
    }
}

pub fn check_answer(expected: &str, given: &str) -> bool {
    expected.trim() == given.trim()
}
