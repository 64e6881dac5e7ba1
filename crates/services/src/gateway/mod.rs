//! Gateway boundary for AI question generation and answer grading.
//!
//! The rest of the crate only sees the two traits below; the concrete
//! chat-completion client lives in [`openai`].

pub mod openai;
mod parse;
mod prompt;

use async_trait::async_trait;

use exam_core::model::{Feedback, Question, QuestionType};

use crate::error::{FeedbackError, GenerationError};

pub(crate) use parse::{parse_feedback_payload, parse_question_payload};
pub(crate) use prompt::{feedback_prompt, feedback_system_prompt, question_prompt, question_system_prompt};

//
// ─── REQUESTS ──────────────────────────────────────────────────────────────────
//

/// Fully-resolved parameters for one question generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRequest {
    pub subject_name: String,
    pub exam_name: String,
    pub topic_name: String,
    pub question_type: QuestionType,
}

/// Everything the feedback gateway needs to grade a free-form answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub subject_name: String,
    pub exam_name: String,
    pub question_text: String,
    pub student_answer: String,
    pub solution_explanation: String,
    pub solution_steps: Vec<String>,
    pub final_answer: Option<String>,
}

impl FeedbackRequest {
    /// Builds a grading request from a question and the submitted answer.
    #[must_use]
    pub fn new(
        subject_name: impl Into<String>,
        exam_name: impl Into<String>,
        question: &Question,
        student_answer: impl Into<String>,
    ) -> Self {
        Self {
            subject_name: subject_name.into(),
            exam_name: exam_name.into(),
            question_text: question.text().to_string(),
            student_answer: student_answer.into(),
            solution_explanation: question.solution().explanation().to_string(),
            solution_steps: question
                .solution()
                .steps()
                .iter()
                .map(|step| step.explanation.clone())
                .collect(),
            final_answer: question.solution().final_answer().map(str::to_string),
        }
    }
}

//
// ─── TRAITS ────────────────────────────────────────────────────────────────────
//

/// Produces a validated [`Question`] for a generation request.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<Question, GenerationError>;
}

/// Grades a free-form answer into a [`Feedback`].
///
/// Multiple choice answers never reach this trait; they are graded locally.
#[async_trait]
pub trait AnswerGrader: Send + Sync {
    async fn grade_answer(&self, request: &FeedbackRequest) -> Result<Feedback, FeedbackError>;
}
