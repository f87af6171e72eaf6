// src/api/client.rs
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::Instrument;

use super::{ApiOperation, BioSampleApi};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{BioSample, BioSampleCreate, Comment, CommentCreate, PaginatedBioSamples};

/// reqwest-backed `BioSampleApi`.
///
/// Only the ok/not-ok boundary of a response is looked at. Status and
/// transport details go to the log, the caller gets the operation's
/// failure message. No retries.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, op: ApiOperation, request: RequestBuilder) -> ApiResult<T> {
        let span = tracing::debug_span!("api_request", operation = op.name());
        async move {
            let response = request.send().await.map_err(|e| {
                log::warn!("{} request failed: {}", op.name(), e);
                ApiError::from(op)
            })?;

            let status = response.status();
            if !status.is_success() {
                log::warn!("{} returned HTTP {}", op.name(), status);
                return Err(op.into());
            }

            response.json::<T>().await.map_err(|e| {
                log::warn!("{} returned an unreadable body: {}", op.name(), e);
                ApiError::from(op)
            })
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl BioSampleApi for HttpApiClient {
    async fn list_samples(&self, page: i64, size: i64) -> ApiResult<PaginatedBioSamples> {
        let request = self
            .client
            .get(self.url("/biosamples/"))
            .query(&[("page", page), ("size", size)]);
        self.send(ApiOperation::ListSamples, request).await
    }

    async fn get_sample(&self, id: i64) -> ApiResult<BioSample> {
        let request = self.client.get(self.url(&format!("/biosamples/{}", id)));
        self.send(ApiOperation::GetSample, request).await
    }

    async fn create_sample(&self, data: &BioSampleCreate) -> ApiResult<BioSample> {
        let request = self.client.post(self.url("/biosamples/")).json(data);
        self.send(ApiOperation::CreateSample, request).await
    }

    async fn update_sample(&self, id: i64, data: &BioSampleCreate) -> ApiResult<BioSample> {
        let request = self
            .client
            .put(self.url(&format!("/biosamples/{}", id)))
            .json(data);
        self.send(ApiOperation::UpdateSample, request).await
    }

    async fn delete_sample(&self, id: i64) -> ApiResult<BioSample> {
        let request = self.client.delete(self.url(&format!("/biosamples/{}", id)));
        self.send(ApiOperation::DeleteSample, request).await
    }

    async fn list_comments(&self) -> ApiResult<Vec<Comment>> {
        let request = self.client.get(self.url("/comments/"));
        self.send(ApiOperation::ListComments, request).await
    }

    async fn create_comment(&self, data: &CommentCreate) -> ApiResult<Comment> {
        let request = self.client.post(self.url("/comments/")).json(data);
        self.send(ApiOperation::CreateComment, request).await
    }

    async fn delete_comment(&self, id: i64) -> ApiResult<Comment> {
        let request = self.client.delete(self.url(&format!("/comments/{}", id)));
        self.send(ApiOperation::DeleteComment, request).await
    }
}
