//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::QuestionError;

use crate::practice::Phase;

/// Transport-level failures of the chat completion gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("chat gateway request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("chat gateway returned an empty response")]
    EmptyResponse,
}

/// Failures while generating a question.
///
/// Malformed payloads (`Json`, `Schema`, `UnknownQuestionType`) are treated
/// exactly like transport failures: the caller retries the same request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error("question payload is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("question payload rejected: {0}")]
    Schema(#[from] QuestionError),
    #[error("unknown question type {0:?}")]
    UnknownQuestionType(String),
}

/// Failures while grading an answer through the feedback gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error("feedback payload is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("multiple choice question is missing its answer key")]
    MissingAnswerKey,
}

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no exam selected")]
    NoExamSelected,
    #[error("answer cannot be empty")]
    EmptyAnswer,
    #[error("{operation} is not valid while the session is {phase:?}")]
    InvalidPhase {
        operation: &'static str,
        phase: Phase,
    },
    #[error("question generation failed after {attempts} attempts")]
    GenerationExhausted {
        attempts: u32,
        #[source]
        source: GenerationError,
    },
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
}
