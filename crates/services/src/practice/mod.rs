mod picker;
mod session;
mod workflow;

// Public API of the practice subsystem.
pub use crate::error::SessionError;
pub use picker::FALLBACK_TOPIC;
pub use session::{Phase, PracticeSession, RoundTicket};
pub use workflow::{
    FEEDBACK_FAILED_MESSAGE, GENERATION_FAILED_MESSAGE, PracticeService, RetryPolicy,
};
