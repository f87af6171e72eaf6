// src/api/memory.rs
//! In-memory `BioSampleApi` for controller and handler tests. Mirrors the
//! backend's pagination math and default-date rules, records every call,
//! and can fail or hold individual operations.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

use super::{ApiOperation, BioSampleApi};
use crate::error::{ApiError, ApiResult};
use crate::models::{BioSample, BioSampleCreate, Comment, CommentCreate, PaginatedBioSamples};

pub const TODAY: &str = "2026-10-16";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListSamples { page: i64, size: i64 },
    GetSample(i64),
    CreateSample(BioSampleCreate),
    UpdateSample(i64, BioSampleCreate),
    DeleteSample(i64),
    ListComments,
    CreateComment(CommentCreate),
    DeleteComment(i64),
}

#[derive(Default)]
struct State {
    samples: Vec<BioSample>,
    comments: Vec<Comment>,
    next_sample_id: i64,
    next_comment_id: i64,
    calls: Vec<Call>,
    failing: HashSet<ApiOperation>,
    holds: HashMap<ApiOperation, Arc<Notify>>,
}

#[derive(Default)]
pub struct InMemoryApi {
    state: Mutex<State>,
}

impl InMemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn seed_sample(&self, location: &str, sample_type: &str, date: &str, operator: &str) -> BioSample {
        let mut state = self.lock();
        state.next_sample_id += 1;
        let sample = BioSample {
            id: state.next_sample_id,
            sampling_location: location.to_string(),
            sample_type: sample_type.to_string(),
            sampling_date: date.to_string(),
            sampling_operator: operator.to_string(),
        };
        state.samples.push(sample.clone());
        sample
    }

    pub fn seed_comment(&self, biosample_id: i64, content: &str) -> Comment {
        let mut state = self.lock();
        state.next_comment_id += 1;
        let comment = Comment {
            id: state.next_comment_id,
            biosample_id,
            content: content.to_string(),
            created_at: TODAY.to_string(),
        };
        state.comments.push(comment.clone());
        comment
    }

    pub fn fail(&self, op: ApiOperation) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: ApiOperation) {
        self.lock().failing.remove(&op);
    }

    /// Calls to `op` park until the returned handle is notified.
    pub fn hold(&self, op: ApiOperation) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.lock().holds.insert(op, notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| matches(c)).count()
    }

    pub fn samples(&self) -> Vec<BioSample> {
        self.lock().samples.clone()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.lock().comments.clone()
    }

    /// Records the call, waits on a hold if one is set, then reports
    /// whether the operation is configured to fail.
    async fn enter(&self, op: ApiOperation, call: Call) -> ApiResult<()> {
        let hold = {
            let mut state = self.lock();
            state.calls.push(call);
            state.holds.get(&op).cloned()
        };
        if let Some(notify) = hold {
            notify.notified().await;
        }
        if self.lock().failing.contains(&op) {
            return Err(ApiError::from(op));
        }
        Ok(())
    }
}

#[async_trait]
impl BioSampleApi for InMemoryApi {
    async fn list_samples(&self, page: i64, size: i64) -> ApiResult<PaginatedBioSamples> {
        self.enter(ApiOperation::ListSamples, Call::ListSamples { page, size }).await?;
        let state = self.lock();
        let total = state.samples.len() as i64;
        let total_pages = (total + size - 1) / size;
        let offset = ((page - 1) * size) as usize;
        let items = state
            .samples
            .iter()
            .skip(offset)
            .take(size as usize)
            .cloned()
            .collect();
        Ok(PaginatedBioSamples {
            items,
            page,
            size,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        })
    }

    async fn get_sample(&self, id: i64) -> ApiResult<BioSample> {
        self.enter(ApiOperation::GetSample, Call::GetSample(id)).await?;
        self.lock()
            .samples
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiOperation::GetSample.into())
    }

    async fn create_sample(&self, data: &BioSampleCreate) -> ApiResult<BioSample> {
        self.enter(ApiOperation::CreateSample, Call::CreateSample(data.clone())).await?;
        let date = data.sampling_date.clone().unwrap_or_else(|| TODAY.to_string());
        Ok(self.seed_sample(&data.sampling_location, &data.sample_type, &date, &data.sampling_operator))
    }

    async fn update_sample(&self, id: i64, data: &BioSampleCreate) -> ApiResult<BioSample> {
        self.enter(ApiOperation::UpdateSample, Call::UpdateSample(id, data.clone())).await?;
        let mut state = self.lock();
        let sample = state
            .samples
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::from(ApiOperation::UpdateSample))?;
        sample.sampling_location = data.sampling_location.clone();
        sample.sample_type = data.sample_type.clone();
        if let Some(date) = &data.sampling_date {
            sample.sampling_date = date.clone();
        }
        sample.sampling_operator = data.sampling_operator.clone();
        Ok(sample.clone())
    }

    async fn delete_sample(&self, id: i64) -> ApiResult<BioSample> {
        self.enter(ApiOperation::DeleteSample, Call::DeleteSample(id)).await?;
        let mut state = self.lock();
        let index = state
            .samples
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ApiError::from(ApiOperation::DeleteSample))?;
        state.comments.retain(|c| c.biosample_id != id);
        Ok(state.samples.remove(index))
    }

    async fn list_comments(&self) -> ApiResult<Vec<Comment>> {
        self.enter(ApiOperation::ListComments, Call::ListComments).await?;
        Ok(self.comments())
    }

    async fn create_comment(&self, data: &CommentCreate) -> ApiResult<Comment> {
        self.enter(ApiOperation::CreateComment, Call::CreateComment(data.clone())).await?;
        let mut comment = self.seed_comment(data.biosample_id, &data.content);
        if let Some(date) = &data.created_at {
            let mut state = self.lock();
            if let Some(stored) = state.comments.iter_mut().find(|c| c.id == comment.id) {
                stored.created_at = date.clone();
            }
            comment.created_at = date.clone();
        }
        Ok(comment)
    }

    async fn delete_comment(&self, id: i64) -> ApiResult<Comment> {
        self.enter(ApiOperation::DeleteComment, Call::DeleteComment(id)).await?;
        let mut state = self.lock();
        let index = state
            .comments
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ApiError::from(ApiOperation::DeleteComment))?;
        Ok(state.comments.remove(index))
    }
}
