// src/controllers/detail.rs
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::form::DateOption;
use super::{display_error, ActionOutcome, InFlight, Liveness, ScreenHandle};
use crate::api::BioSampleApi;
use crate::error::ApiError;
use crate::helpers::{confirm_delete_comment_message, confirm_delete_sample_message, parse_date, today, Confirm};
use crate::models::{BioSample, Comment, CommentCreate};
use crate::routes::{Navigation, Route};

// ==================== COMMENT DRAFT ====================

/// What the add-comment form holds before it is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date_option: DateOption,
    #[serde(default)]
    pub created_at: String,
    /// Identifies one rendered form. Posting the same form twice reuses it.
    #[serde(default)]
    pub token: String,
}

impl CommentDraft {
    /// Empty draft for a freshly rendered form.
    pub fn fresh() -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            ..Self::default()
        }
    }

    /// Key under which this form's submission is tracked while in flight.
    pub fn submission_key(&self, biosample_id: i64) -> String {
        format!("{}:{}", biosample_id, self.token.trim())
    }

    pub fn use_today(&self) -> bool {
        self.date_option == DateOption::Today
    }

    /// The date is only sent when the user picked one.
    pub fn to_payload(&self, biosample_id: i64) -> CommentCreate {
        let created_at = match self.date_option {
            DateOption::Specify if !self.created_at.trim().is_empty() => Some(self.created_at.trim().to_string()),
            _ => None,
        };
        CommentCreate {
            biosample_id,
            content: self.content.trim().to_string(),
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCommentError {
    NotLoaded,
    Blank,
    InvalidDate,
    FutureDate,
    AlreadySubmitting,
    Api(ApiError),
}

impl fmt::Display for AddCommentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddCommentError::NotLoaded => write!(f, "Sample is not loaded"),
            AddCommentError::Blank => write!(f, "Comment cannot be empty"),
            AddCommentError::InvalidDate => write!(f, "Comment date is not a valid date"),
            AddCommentError::FutureDate => write!(f, "Comment date cannot be in the future"),
            AddCommentError::AlreadySubmitting => write!(f, "A comment is already being submitted"),
            AddCommentError::Api(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AddCommentError {}

// ==================== CONTROLLER ====================

/// State behind one sample's detail screen: the sample, its comments and
/// the comment actions.
pub struct DetailController {
    api: Arc<dyn BioSampleApi>,
    sample_id: i64,
    sample: Option<BioSample>,
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
    submissions: InFlight,
    navigation: Option<Navigation>,
    liveness: Liveness,
}

impl DetailController {
    pub fn new(api: Arc<dyn BioSampleApi>, sample_id: i64, submissions: InFlight) -> Self {
        Self {
            api,
            sample_id,
            sample: None,
            comments: Vec::new(),
            loading: false,
            error: None,
            submissions,
            navigation: None,
            liveness: Liveness::new(),
        }
    }

    pub fn sample_id(&self) -> i64 {
        self.sample_id
    }

    pub fn sample(&self) -> Option<&BioSample> {
        self.sample.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while `draft`'s form is being submitted.
    pub fn submitting_comment(&self, draft: &CommentDraft) -> bool {
        self.submissions.contains(&draft.submission_key(self.sample_id))
    }

    pub fn navigation(&self) -> Option<Navigation> {
        self.navigation
    }

    pub fn handle(&self) -> ScreenHandle {
        self.liveness.handle()
    }

    /// Fetches the sample and its comments together. Either failure leaves
    /// the sample unset.
    pub async fn load(&mut self) {
        let ticket = self.liveness.begin();
        self.loading = true;
        self.error = None;

        let api = Arc::clone(&self.api);
        let id = self.sample_id;
        let result = futures::try_join!(api.get_sample(id), api.list_comments_for_sample(id));

        if !self.liveness.is_current(ticket) {
            log::debug!("Discarding stale detail load for biosample {}", id);
            return;
        }
        match result {
            Ok((sample, comments)) => {
                self.sample = Some(sample);
                self.comments = comments;
            }
            Err(err) => self.error = Some(display_error(&err)),
        }
        self.loading = false;
    }

    // ==================== SAMPLE ACTIONS ====================

    /// On success the screen asks to go back to the list.
    pub async fn delete_sample(&mut self, confirm: &dyn Confirm) -> ActionOutcome {
        let Some(sample) = self.sample.as_ref() else {
            return ActionOutcome::Cancelled;
        };
        let id = sample.id;
        if !confirm.confirm(&confirm_delete_sample_message(&sample.sampling_location, true)) {
            return ActionOutcome::Cancelled;
        }

        let ticket = self.liveness.observe();
        let result = self.api.delete_sample(id).await;
        if !self.liveness.is_current(ticket) {
            return if result.is_ok() { ActionOutcome::Completed } else { ActionOutcome::Failed };
        }
        match result {
            Ok(_) => {
                log::info!("Deleted biosample {} with its comments", id);
                self.navigation = Some(Navigation::to(Route::List));
                ActionOutcome::Completed
            }
            Err(err) => {
                self.error = Some(display_error(&err));
                ActionOutcome::Failed
            }
        }
    }

    // ==================== COMMENT ACTIONS ====================

    /// Appends the created comment without re-fetching. Errors are both
    /// stored and returned, so the caller can keep the draft on screen.
    /// A picked date must not be later than today. Only a repeat of the same
    /// form (same token) is refused while the first is in flight.
    pub async fn add_comment(&mut self, draft: &CommentDraft) -> Result<Comment, AddCommentError> {
        let Some(sample_id) = self.sample.as_ref().map(|s| s.id) else {
            return Err(AddCommentError::NotLoaded);
        };
        let payload = draft.to_payload(sample_id);
        if payload.validate().is_err() {
            return Err(AddCommentError::Blank);
        }
        if let Some(date) = payload.created_at.as_deref() {
            let err = match parse_date(date) {
                None => Some(AddCommentError::InvalidDate),
                Some(date) if date > today() => Some(AddCommentError::FutureDate),
                Some(_) => None,
            };
            if let Some(err) = err {
                self.error = Some(err.to_string());
                return Err(err);
            }
        }
        let Some(_submitting) = self.submissions.try_begin(draft.submission_key(sample_id)) else {
            log::warn!("Ignoring duplicate comment submission for biosample {}", sample_id);
            let err = AddCommentError::AlreadySubmitting;
            self.error = Some(err.to_string());
            return Err(err);
        };

        let ticket = self.liveness.observe();
        let result = self.api.create_comment(&payload).await;
        if !self.liveness.is_current(ticket) {
            return result.map_err(AddCommentError::Api);
        }
        match result {
            Ok(comment) => {
                self.comments.push(comment.clone());
                Ok(comment)
            }
            Err(err) => {
                self.error = Some(display_error(&err));
                Err(AddCommentError::Api(err))
            }
        }
    }

    pub async fn delete_comment(&mut self, comment_id: i64, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(confirm_delete_comment_message()) {
            return ActionOutcome::Cancelled;
        }

        let ticket = self.liveness.observe();
        let result = self.api.delete_comment(comment_id).await;
        if !self.liveness.is_current(ticket) {
            return if result.is_ok() { ActionOutcome::Completed } else { ActionOutcome::Failed };
        }
        match result {
            Ok(_) => {
                self.comments.retain(|c| c.id != comment_id);
                ActionOutcome::Completed
            }
            Err(err) => {
                self.error = Some(display_error(&err));
                ActionOutcome::Failed
            }
        }
    }
}
