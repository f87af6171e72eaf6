// src/api/mod.rs
//! Typed access to the remote biosample API.

use async_trait::async_trait;

use crate::error::{ApiError, ApiResult};
use crate::models::{BioSample, BioSampleCreate, Comment, CommentCreate, PaginatedBioSamples};

pub mod client;
#[cfg(test)]
pub mod memory;

pub use client::HttpApiClient;

// ==================== OPERATIONS ====================

/// Every call the UI makes against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    ListSamples,
    GetSample,
    CreateSample,
    UpdateSample,
    DeleteSample,
    ListComments,
    CreateComment,
    DeleteComment,
}

impl ApiOperation {
    pub const fn name(&self) -> &'static str {
        match self {
            ApiOperation::ListSamples => "list_samples",
            ApiOperation::GetSample => "get_sample",
            ApiOperation::CreateSample => "create_sample",
            ApiOperation::UpdateSample => "update_sample",
            ApiOperation::DeleteSample => "delete_sample",
            ApiOperation::ListComments => "list_comments",
            ApiOperation::CreateComment => "create_comment",
            ApiOperation::DeleteComment => "delete_comment",
        }
    }

    /// The only detail a failed call exposes to the user.
    pub const fn failure_message(&self) -> &'static str {
        match self {
            ApiOperation::ListSamples => "Failed to fetch biosamples",
            ApiOperation::GetSample => "Failed to fetch biosample",
            ApiOperation::CreateSample => "Failed to create biosample",
            ApiOperation::UpdateSample => "Failed to update biosample",
            ApiOperation::DeleteSample => "Failed to delete biosample",
            ApiOperation::ListComments => "Failed to fetch comments",
            ApiOperation::CreateComment => "Failed to create comment",
            ApiOperation::DeleteComment => "Failed to delete comment",
        }
    }
}

impl From<ApiOperation> for ApiError {
    fn from(op: ApiOperation) -> Self {
        ApiError::new(op.failure_message())
    }
}

// ==================== CLIENT TRAIT ====================

/// CRUD over samples and comments. One method, one HTTP request, except
/// `list_comments_for_sample`.
#[async_trait]
pub trait BioSampleApi: Send + Sync {
    /// `page` is 1-based.
    async fn list_samples(&self, page: i64, size: i64) -> ApiResult<PaginatedBioSamples>;

    async fn get_sample(&self, id: i64) -> ApiResult<BioSample>;

    async fn create_sample(&self, data: &BioSampleCreate) -> ApiResult<BioSample>;

    async fn update_sample(&self, id: i64, data: &BioSampleCreate) -> ApiResult<BioSample>;

    async fn delete_sample(&self, id: i64) -> ApiResult<BioSample>;

    async fn list_comments(&self) -> ApiResult<Vec<Comment>>;

    async fn create_comment(&self, data: &CommentCreate) -> ApiResult<Comment>;

    async fn delete_comment(&self, id: i64) -> ApiResult<Comment>;

    /// The API has no filtered endpoint, so this downloads every comment
    /// and filters locally. Cost grows with the total comment count.
    async fn list_comments_for_sample(&self, biosample_id: i64) -> ApiResult<Vec<Comment>> {
        let comments = self.list_comments().await?;
        Ok(comments_for_sample(comments, biosample_id))
    }
}

/// Comments attached to `biosample_id`, in source order.
pub fn comments_for_sample(comments: Vec<Comment>, biosample_id: i64) -> Vec<Comment> {
    comments
        .into_iter()
        .filter(|c| c.biosample_id == biosample_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, biosample_id: i64) -> Comment {
        Comment {
            id,
            biosample_id,
            content: format!("note {}", id),
            created_at: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_comments_for_sample_keeps_order() {
        let all = vec![
            comment(1, 5),
            comment(2, 3),
            comment(3, 5),
            comment(4, 9),
            comment(5, 5),
        ];
        let ids: Vec<i64> = comments_for_sample(all, 5).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_comments_for_unknown_sample() {
        assert!(comments_for_sample(vec![comment(1, 5)], 42).is_empty());
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            ApiError::from(ApiOperation::ListSamples).message(),
            "Failed to fetch biosamples"
        );
        assert_eq!(ApiOperation::DeleteComment.name(), "delete_comment");
    }

    #[actix_rt::test]
    async fn test_provided_filter_method() {
        let api = memory::InMemoryApi::new();
        let first = api.seed_sample("Lab A", "water", "2024-01-01", "J. Doe");
        let second = api.seed_sample("Lab B", "soil", "2024-01-02", "A. Smith");
        api.seed_comment(first.id, "one");
        api.seed_comment(second.id, "two");
        api.seed_comment(first.id, "three");

        let comments = api.list_comments_for_sample(first.id).await.unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "three"]);
    }
}
