// src/controllers/mod.rs
//! Per-screen state and orchestration. A controller owns everything its
//! screen shows and is the only thing that mutates it.

pub mod detail;
pub mod form;
pub mod guard;
pub mod list;

pub use detail::{AddCommentError, CommentDraft, DetailController};
pub use form::{DateOption, FormController, FormMode, SampleFields, SampleFormInput, SubmitOutcome};
pub use guard::{InFlight, InFlightGuard, Liveness, ScreenHandle, Ticket};
pub use list::{ListController, PageStep};

use crate::error::ApiError;
use crate::helpers::error_message;

/// Result of a confirm-then-act user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Completed,
    /// The request failed; the screen's `error` holds the message.
    Failed,
}

fn display_error(err: &ApiError) -> String {
    error_message(&anyhow::Error::new(err.clone()))
}
