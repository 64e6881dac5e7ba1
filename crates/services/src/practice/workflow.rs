use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use exam_core::Clock;
use exam_core::model::{Exam, Feedback, QuestionType};

use super::picker;
use super::session::PracticeSession;
use crate::error::{FeedbackError, SessionError};
use crate::gateway::{AnswerGrader, FeedbackRequest, QuestionGenerator};

/// User-visible message when question generation keeps failing.
pub const GENERATION_FAILED_MESSAGE: &str = "אירעה שגיאה ביצירת השאלה. אנא נסה שוב.";
/// User-visible message when answer grading fails.
pub const FEEDBACK_FAILED_MESSAGE: &str = "אירעה שגיאה בעיבוד התשובה. אנא נסה שוב.";

//
// ─── RETRY POLICY ──────────────────────────────────────────────────────────────
//

/// Bounded retry with exponential backoff for generation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per further attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self, failed_attempts: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(failed_attempts.saturating_sub(1))
    }
}

//
// ─── PRACTICE SERVICE ──────────────────────────────────────────────────────────
//

/// Orchestrates rounds over the gateways: generation with retries, local
/// grading for multiple choice, and fail-open submission for everything else.
///
/// The service is stateless apart from its collaborators; per-student state
/// lives in the [`PracticeSession`] passed into each operation.
#[derive(Clone)]
pub struct PracticeService {
    generator: Arc<dyn QuestionGenerator>,
    grader: Arc<dyn AnswerGrader>,
    clock: Clock,
    retry: RetryPolicy,
}

impl PracticeService {
    #[must_use]
    pub fn new(generator: Arc<dyn QuestionGenerator>, grader: Arc<dyn AnswerGrader>) -> Self {
        Self {
            generator,
            grader,
            clock: Clock::default(),
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Starts a new round: discards any current question/answer/feedback and
    /// asks the generation gateway for a question matching the selection,
    /// with a randomly weighted question type and topic.
    ///
    /// Failed attempts are retried with backoff up to the policy's limit;
    /// exhaustion surfaces a localized error on the session and returns it
    /// to `Ready`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoExamSelected` before any gateway call, or
    /// `SessionError::GenerationExhausted` after the final failed attempt.
    pub async fn generate(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        let ticket = session.begin_round(self.clock.now())?;
        let request = picker::build_question_request(session.selection(), &mut rand::rng())?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.generator.generate_question(&request).await {
                Ok(question) => {
                    if !session.apply_question(ticket, question) {
                        debug!(topic = %request.topic_name, "discarded stale question response");
                    }
                    return Ok(());
                }
                Err(err) if attempt < self.retry.max_attempts => {
                    warn!(attempt, error = %err, "question generation failed, retrying");
                    let backoff = self.retry.backoff(attempt);
                    if !backoff.is_zero() {
                        tokio::time::sleep(backoff).await;
                    }
                }
                Err(err) => {
                    error!(attempts = attempt, error = %err, "question generation gave up");
                    session.fail_round(ticket, GENERATION_FAILED_MESSAGE);
                    return Err(SessionError::GenerationExhausted {
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }

    /// Alias for [`Self::generate`]: moves on after reviewing feedback.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    pub async fn next_question(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        self.generate(session).await
    }

    /// Alias for [`Self::generate`]: abandons the current question, answer
    /// included.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    pub async fn skip(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        self.generate(session).await
    }

    /// Submits the student's answer and resolves feedback for it.
    ///
    /// Multiple choice is graded locally against the answer key with no
    /// gateway call; other types go to the feedback gateway. A gateway
    /// failure is not auto-retried: the session fails open to `Answering`
    /// with the answer preserved and the student resubmits.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyAnswer` / `SessionError::InvalidPhase`
    /// without any gateway call, or `SessionError::Feedback` when grading
    /// fails.
    pub async fn submit(
        &self,
        session: &mut PracticeSession,
        answer: &str,
    ) -> Result<(), SessionError> {
        let question = session.begin_submit(answer)?;

        if question.kind() == QuestionType::MultipleChoice {
            let Some(answer_key) = question.answer_key() else {
                // Questions are validated at the gateway; a choice question
                // without a key cannot normally get this far.
                session.fail_submit(FEEDBACK_FAILED_MESSAGE)?;
                return Err(FeedbackError::MissingAnswerKey.into());
            };
            let feedback = Feedback::for_multiple_choice(answer, answer_key);
            session.complete_submit(feedback)?;
            return Ok(());
        }

        // An exam is always present here: a question exists only after a
        // round, and rounds require one.
        let request = FeedbackRequest::new(
            session.selection().subject_name(),
            session.selection().exam().map_or("bagrut", Exam::name),
            &question,
            answer,
        );
        match self.grader.grade_answer(&request).await {
            Ok(feedback) => {
                session.complete_submit(feedback)?;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "answer grading failed");
                session.fail_submit(FEEDBACK_FAILED_MESSAGE)?;
                Err(err.into())
            }
        }
    }
}
