use chrono::{DateTime, Duration, Utc};

use exam_core::model::{Feedback, Progress, Question, Selection};

use crate::error::SessionError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where the session currently stands in the question/answer/feedback round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No exam selected; nothing can happen yet.
    Idle,
    /// Exam selected, no question on screen.
    Ready,
    /// A generation request is in flight.
    Generating,
    /// Question present, waiting for the student's answer.
    Answering,
    /// Answer posted, feedback pending.
    Submitting,
    /// Feedback present; the round ends with retry, next, or skip.
    Reviewing,
}

/// Token for one generation round. A response is only applied when its ticket
/// still matches the session's latest round, so answers to superseded
/// requests are dropped instead of clobbering newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTicket {
    seq: u64,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One student's practice session for the currently selected exam.
///
/// Owns the current question, the typed answer, the feedback, and the running
/// progress. All mutation goes through the guarded transition methods; the
/// async orchestration (gateway calls, retries) lives in `PracticeService`.
#[derive(Debug)]
pub struct PracticeSession {
    selection: Selection,
    phase: Phase,
    question: Option<Question>,
    answer: Option<String>,
    feedback: Option<Feedback>,
    progress: Progress,
    round_seq: u64,
    round_started_at: Option<DateTime<Utc>>,
    error: Option<String>,
}

impl PracticeSession {
    /// Creates a session for the given selection. Starts in `Ready` when an
    /// exam is already chosen, otherwise in `Idle`.
    #[must_use]
    pub fn new(selection: Selection) -> Self {
        let phase = if selection.has_exam() {
            Phase::Ready
        } else {
            Phase::Idle
        };
        Self {
            selection,
            phase,
            question: None,
            answer: None,
            feedback: None,
            progress: Progress::new(),
            round_seq: 0,
            round_started_at: None,
            error: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Read model for the progress panel.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn round_started_at(&self) -> Option<DateTime<Utc>> {
        self.round_started_at
    }

    /// Time spent on the current round so far, for the session timer.
    /// `None` before the first round and after a selection change.
    #[must_use]
    pub fn round_elapsed(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.round_started_at.map(|started| now - started)
    }

    /// Last user-visible error message, cleared by the next round.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    //
    // ─── GENERATION ────────────────────────────────────────────────────────
    //

    /// Starts a new round: clears the question, answer, feedback, and error,
    /// and enters `Generating`. Also serves skip/next, which discard the
    /// current round the same way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoExamSelected` when the selection has no exam.
    pub fn begin_round(&mut self, now: DateTime<Utc>) -> Result<RoundTicket, SessionError> {
        if !self.selection.has_exam() {
            return Err(SessionError::NoExamSelected);
        }

        self.question = None;
        self.answer = None;
        self.feedback = None;
        self.error = None;
        self.phase = Phase::Generating;
        self.round_started_at = Some(now);
        self.round_seq += 1;
        Ok(RoundTicket {
            seq: self.round_seq,
        })
    }

    /// Applies a generated question, unless the ticket has been superseded by
    /// a newer round or a selection change. Returns whether it was applied.
    pub fn apply_question(&mut self, ticket: RoundTicket, question: Question) -> bool {
        if ticket.seq != self.round_seq || self.phase != Phase::Generating {
            return false;
        }
        self.question = Some(question);
        self.phase = Phase::Answering;
        true
    }

    /// Records a final generation failure for the round: back to `Ready` with
    /// a user-visible message. Stale tickets are ignored, like in
    /// [`Self::apply_question`]. Returns whether it was applied.
    pub fn fail_round(&mut self, ticket: RoundTicket, message: impl Into<String>) -> bool {
        if ticket.seq != self.round_seq || self.phase != Phase::Generating {
            return false;
        }
        self.error = Some(message.into());
        self.phase = Phase::Ready;
        true
    }

    //
    // ─── SUBMISSION ────────────────────────────────────────────────────────
    //

    /// Accepts the student's answer and enters `Submitting`. Returns a clone
    /// of the current question for grading.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyAnswer` for a blank answer and
    /// `SessionError::InvalidPhase` outside `Answering` (which also covers
    /// double submits).
    pub fn begin_submit(&mut self, answer: &str) -> Result<Question, SessionError> {
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        if self.phase != Phase::Answering {
            return Err(SessionError::InvalidPhase {
                operation: "submit",
                phase: self.phase,
            });
        }
        let Some(question) = self.question.clone() else {
            // Answering without a question cannot be reached through the
            // public API.
            return Err(SessionError::InvalidPhase {
                operation: "submit",
                phase: self.phase,
            });
        };

        self.answer = Some(answer.to_string());
        self.error = None;
        self.phase = Phase::Submitting;
        Ok(question)
    }

    /// Stores the feedback for the submitted answer, folds its percentage
    /// into the progress, and enters `Reviewing`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Submitting`.
    pub fn complete_submit(&mut self, feedback: Feedback) -> Result<(), SessionError> {
        if self.phase != Phase::Submitting {
            return Err(SessionError::InvalidPhase {
                operation: "complete submit",
                phase: self.phase,
            });
        }
        self.progress = self
            .progress
            .record(feedback.assessment.correctness_percentage());
        self.feedback = Some(feedback);
        self.phase = Phase::Reviewing;
        Ok(())
    }

    /// Records a feedback failure: fail open back to `Answering` with the
    /// typed answer preserved so the student can resubmit.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Submitting`.
    pub fn fail_submit(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        if self.phase != Phase::Submitting {
            return Err(SessionError::InvalidPhase {
                operation: "fail submit",
                phase: self.phase,
            });
        }
        self.error = Some(message.into());
        self.phase = Phase::Answering;
        Ok(())
    }

    //
    // ─── REVIEW ────────────────────────────────────────────────────────────
    //

    /// Clears the feedback only and returns to `Answering`; the answer stays
    /// so the student can rework it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside `Reviewing`.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Reviewing {
            return Err(SessionError::InvalidPhase {
                operation: "retry",
                phase: self.phase,
            });
        }
        self.feedback = None;
        self.error = None;
        self.phase = Phase::Answering;
        Ok(())
    }

    //
    // ─── SELECTION ─────────────────────────────────────────────────────────
    //

    /// Replaces the selection and unconditionally clears the round state:
    /// question, answer, feedback, and error. Progress is kept; the running
    /// statistics span the whole sitting, not one exam. Invalidates any
    /// in-flight round ticket. Does not auto-generate.
    pub fn reset_for_selection_change(&mut self, selection: Selection) {
        self.round_seq += 1;
        self.question = None;
        self.answer = None;
        self.feedback = None;
        self.error = None;
        self.round_started_at = None;
        self.phase = if selection.has_exam() {
            Phase::Ready
        } else {
            Phase::Idle
        };
        self.selection = selection;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
