use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("multiple choice question needs at least two options, got {0}")]
    NotEnoughOptions(usize),

    #[error("options are only valid for multiple choice questions")]
    UnexpectedOptions,

    #[error("code template is only valid for code implementation questions")]
    UnexpectedCodeTemplate,

    #[error("multiple choice question is missing its answer key")]
    MissingAnswerKey,

    #[error("solution explanation cannot be empty")]
    EmptyExplanation,
}

//
// ─── QUESTION TYPE ─────────────────────────────────────────────────────────────
//

/// The fixed set of question formats the generation gateway can produce.
///
/// The format decides which answer input and feedback path apply: multiple
/// choice is graded locally against the answer key, everything else goes to
/// the feedback gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Essay,
    StepByStepSolution,
    CodeImplementation,
}

impl QuestionType {
    /// Wire/prompt name of this question type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Essay => "essay",
            QuestionType::StepByStepSolution => "step_by_step_solution",
            QuestionType::CodeImplementation => "code_implementation",
        }
    }
}

//
// ─── SOLUTION ──────────────────────────────────────────────────────────────────
//

/// One step of a worked solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub explanation: String,
}

/// Reference solution attached to a generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    explanation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    steps: Vec<SolutionStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    final_answer: Option<String>,
}

impl Solution {
    /// Creates a solution from its explanation, optional steps, and optional
    /// final answer.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyExplanation` for a blank explanation.
    pub fn new(
        explanation: impl Into<String>,
        steps: Vec<SolutionStep>,
        final_answer: Option<String>,
    ) -> Result<Self, QuestionError> {
        let explanation = explanation.into();
        if explanation.trim().is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }
        Ok(Self {
            explanation,
            steps,
            final_answer,
        })
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn steps(&self) -> &[SolutionStep] {
        &self.steps
    }

    #[must_use]
    pub fn final_answer(&self) -> Option<&str> {
        self.final_answer.as_deref()
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A generated exam question, immutable once created.
///
/// The text (and option strings) may embed math markup as delivered by the
/// gateway; it is stored verbatim and left for the renderer to handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "type")]
    kind: QuestionType,
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code_template: Option<String>,
    solution: Solution,
}

impl Question {
    /// Creates a question, enforcing the per-type shape rules.
    ///
    /// # Errors
    ///
    /// Returns a `QuestionError` when the text is blank, options are present
    /// for a non-multiple-choice type (or too few for multiple choice), a
    /// code template accompanies a non-code type, or a multiple choice
    /// question has no answer key to grade against.
    pub fn new(
        kind: QuestionType,
        text: impl Into<String>,
        options: Vec<String>,
        code_template: Option<String>,
        solution: Solution,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        match kind {
            QuestionType::MultipleChoice => {
                if options.len() < 2 {
                    return Err(QuestionError::NotEnoughOptions(options.len()));
                }
                if solution
                    .final_answer()
                    .is_none_or(|answer| answer.trim().is_empty())
                {
                    return Err(QuestionError::MissingAnswerKey);
                }
            }
            _ if !options.is_empty() => return Err(QuestionError::UnexpectedOptions),
            _ => {}
        }

        if code_template.is_some() && kind != QuestionType::CodeImplementation {
            return Err(QuestionError::UnexpectedCodeTemplate);
        }

        Ok(Self {
            kind,
            text,
            options,
            code_template,
            solution,
        })
    }

    #[must_use]
    pub fn kind(&self) -> QuestionType {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn code_template(&self) -> Option<&str> {
        self.code_template.as_deref()
    }

    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Answer key for a multiple choice question, `None` for other types.
    #[must_use]
    pub fn answer_key(&self) -> Option<&str> {
        if self.kind == QuestionType::MultipleChoice {
            self.solution.final_answer()
        } else {
            None
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn solution(final_answer: Option<&str>) -> Solution {
        Solution::new("הסבר", Vec::new(), final_answer.map(str::to_string)).unwrap()
    }

    #[test]
    fn essay_question_has_no_options_or_template() {
        let question = Question::new(
            QuestionType::Essay,
            "שאלה פתוחה",
            Vec::new(),
            None,
            solution(None),
        )
        .unwrap();
        assert_eq!(question.kind(), QuestionType::Essay);
        assert!(question.options().is_empty());
        assert_eq!(question.answer_key(), None);
    }

    #[test]
    fn multiple_choice_requires_options_and_answer_key() {
        let err = Question::new(
            QuestionType::MultipleChoice,
            "בחר תשובה",
            vec!["א. 5".to_string()],
            None,
            solution(Some("א. 5")),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::NotEnoughOptions(1));

        let err = Question::new(
            QuestionType::MultipleChoice,
            "בחר תשובה",
            vec!["א. 5".to_string(), "ב. 7".to_string()],
            None,
            solution(None),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::MissingAnswerKey);

        let question = Question::new(
            QuestionType::MultipleChoice,
            "בחר תשובה",
            vec!["א. 5".to_string(), "ב. 7".to_string()],
            None,
            solution(Some("א. 5")),
        )
        .unwrap();
        assert_eq!(question.answer_key(), Some("א. 5"));
    }

    #[test]
    fn options_outside_multiple_choice_are_rejected() {
        let err = Question::new(
            QuestionType::Essay,
            "שאלה",
            vec!["א".to_string(), "ב".to_string()],
            None,
            solution(None),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::UnexpectedOptions);
    }

    #[test]
    fn code_template_is_code_only() {
        let err = Question::new(
            QuestionType::Essay,
            "שאלה",
            Vec::new(),
            Some("// קוד".to_string()),
            solution(None),
        )
        .unwrap_err();
        assert_eq!(err, QuestionError::UnexpectedCodeTemplate);

        let question = Question::new(
            QuestionType::CodeImplementation,
            "ממש פונקציה",
            Vec::new(),
            Some("// קוד התחלתי כאן".to_string()),
            solution(None),
        )
        .unwrap();
        assert_eq!(question.code_template(), Some("// קוד התחלתי כאן"));
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = Question::new(QuestionType::Essay, "  ", Vec::new(), None, solution(None))
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }
}
