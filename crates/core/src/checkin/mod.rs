//! Periodic check-in: pool sampling and the per-attempt session controller.

mod error;
mod sampler;
mod session;

pub use error::CheckinError;
pub use sampler::{IndexSource, POOL_SIZE, RngSource, ScriptedIndices, sample_pool};
pub use session::{Advance, CheckinProgress, CheckinSession, CompletionEvent, SessionState};
