#![forbid(unsafe_code)]

pub mod assistance;
pub mod error;
pub mod gateway;
pub mod practice;

pub use exam_core::Clock;

pub use assistance::{Assistance, AssistanceKind, AssistanceService};
pub use error::{ChatError, FeedbackError, GenerationError, SessionError};
pub use gateway::openai::{OpenAiConfig, OpenAiGateway};
pub use gateway::{AnswerGrader, FeedbackRequest, QuestionGenerator, QuestionRequest};
pub use practice::{Phase, PracticeService, PracticeSession, RetryPolicy, RoundTicket};
