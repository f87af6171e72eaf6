// src/controllers/list.rs
use serde::Deserialize;
use std::sync::Arc;

use super::{display_error, ActionOutcome, Liveness, ScreenHandle};
use crate::api::BioSampleApi;
use crate::helpers::{confirm_delete_sample_message, Confirm};
use crate::models::{BioSample, PaginatedBioSamples};

/// One page back or forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStep {
    Prev,
    Next,
}

/// State behind the paginated sample list.
pub struct ListController {
    api: Arc<dyn BioSampleApi>,
    page_size: i64,
    current_page: i64,
    data: Option<PaginatedBioSamples>,
    loading: bool,
    error: Option<String>,
    liveness: Liveness,
}

impl ListController {
    pub fn new(api: Arc<dyn BioSampleApi>, page_size: i64) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            current_page: 1,
            data: None,
            loading: false,
            error: None,
            liveness: Liveness::new(),
        }
    }

    /// Opens the list on `page` instead of the first page.
    pub fn starting_at(mut self, page: i64) -> Self {
        self.current_page = page.max(1);
        self
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn data(&self) -> Option<&PaginatedBioSamples> {
        self.data.as_ref()
    }

    pub fn items(&self) -> &[BioSample] {
        self.data.as_ref().map(|d| d.items.as_slice()).unwrap_or(&[])
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_prev(&self) -> bool {
        self.data.as_ref().map_or(false, |d| d.has_prev)
    }

    pub fn has_next(&self) -> bool {
        self.data.as_ref().map_or(false, |d| d.has_next)
    }

    pub fn handle(&self) -> ScreenHandle {
        self.liveness.handle()
    }

    // ==================== LOADING ====================

    /// Fetches `current_page`. A failure keeps whatever was shown before.
    pub async fn load(&mut self) {
        let ticket = self.liveness.begin();
        self.loading = true;
        self.error = None;

        let result = self.api.list_samples(self.current_page, self.page_size).await;

        if !self.liveness.is_current(ticket) {
            log::debug!("Discarding stale sample page {}", self.current_page);
            return;
        }
        match result {
            Ok(page) => self.data = Some(page),
            Err(err) => self.error = Some(display_error(&err)),
        }
        self.loading = false;
    }

    /// Moves the cursor if the last loaded page allows it. Does not fetch.
    pub fn step(&mut self, step: PageStep) -> bool {
        let allowed = match step {
            PageStep::Prev => self.has_prev(),
            PageStep::Next => self.has_next(),
        };
        if allowed {
            self.current_page += match step {
                PageStep::Prev => -1,
                PageStep::Next => 1,
            };
        }
        allowed
    }

    /// Goes back one page if the server says there is one.
    pub async fn previous_page(&mut self) -> bool {
        if !self.step(PageStep::Prev) {
            return false;
        }
        self.load().await;
        true
    }

    pub async fn next_page(&mut self) -> bool {
        if !self.step(PageStep::Next) {
            return false;
        }
        self.load().await;
        true
    }

    // ==================== DELETE ====================

    /// Deletes after confirmation and reloads the current page from the
    /// server. If that page comes back empty and is not the first, the list
    /// steps back to the last page that still has rows.
    pub async fn delete_sample(&mut self, id: i64, location: &str, confirm: &dyn Confirm) -> ActionOutcome {
        if !confirm.confirm(&confirm_delete_sample_message(location, false)) {
            return ActionOutcome::Cancelled;
        }

        let ticket = self.liveness.observe();
        if let Err(err) = self.api.delete_sample(id).await {
            if self.liveness.is_current(ticket) {
                self.error = Some(display_error(&err));
            }
            return ActionOutcome::Failed;
        }
        log::info!("Deleted biosample {} from list page {}", id, self.current_page);

        self.load().await;
        if self.error.is_none() && self.items().is_empty() && self.current_page > 1 {
            let last_page = self.data.as_ref().map_or(1, |d| d.total_pages.max(1));
            self.current_page = (self.current_page - 1).min(last_page);
            self.load().await;
        }
        ActionOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::{Call, InMemoryApi};
    use crate::api::ApiOperation;

    fn seeded(count: usize) -> Arc<InMemoryApi> {
        let api = Arc::new(InMemoryApi::new());
        for i in 0..count {
            api.seed_sample(&format!("Site {}", i + 1), "water", "2024-01-01", "J. Doe");
        }
        api
    }

    #[actix_rt::test]
    async fn test_load_first_page() {
        let api = seeded(25);
        let mut list = ListController::new(api.clone(), 10);
        list.load().await;

        assert!(!list.is_loading());
        assert_eq!(list.error(), None);
        assert_eq!(list.items().len(), 10);
        let data = list.data().unwrap();
        assert_eq!(data.total_pages, 3);
        assert!(!data.has_prev);
        assert!(data.has_next);
        assert_eq!(api.calls(), vec![Call::ListSamples { page: 1, size: 10 }]);
    }

    #[actix_rt::test]
    async fn test_pagination_flags_match_page() {
        let api = seeded(25);
        for page in 1..=4 {
            let mut list = ListController::new(api.clone(), 10).starting_at(page);
            list.load().await;
            let data = list.data().unwrap();
            assert_eq!(data.has_prev, page > 1);
            assert_eq!(data.has_next, page < data.total_pages);
        }
    }

    #[actix_rt::test]
    async fn test_prev_and_next_respect_flags() {
        let api = seeded(15);
        let mut list = ListController::new(api.clone(), 10);
        list.load().await;

        assert!(!list.previous_page().await);
        assert_eq!(list.current_page(), 1);

        assert!(list.next_page().await);
        assert_eq!(list.current_page(), 2);
        assert_eq!(list.items().len(), 5);

        assert!(!list.next_page().await);
        assert!(list.previous_page().await);
        assert_eq!(list.current_page(), 1);

        // back navigation re-fetches, nothing is cached
        assert_eq!(api.count(|c| matches!(c, Call::ListSamples { page: 1, .. })), 2);
    }

    #[actix_rt::test]
    async fn test_step_without_loaded_page_is_refused() {
        let api = seeded(30);
        let mut list = ListController::new(api.clone(), 10);
        assert!(!list.step(PageStep::Next));
        list.load().await;
        assert!(list.step(PageStep::Next));
        assert_eq!(list.current_page(), 2);
        assert_eq!(api.count(|c| matches!(c, Call::ListSamples { .. })), 1);
    }

    #[actix_rt::test]
    async fn test_failed_load_keeps_previous_data() {
        let api = seeded(3);
        let mut list = ListController::new(api.clone(), 10);
        list.load().await;

        api.fail(ApiOperation::ListSamples);
        list.load().await;
        assert_eq!(list.error(), Some("Failed to fetch biosamples"));
        assert_eq!(list.items().len(), 3);
        assert!(!list.is_loading());
    }

    #[actix_rt::test]
    async fn test_cancelled_delete_sends_nothing() {
        let api = seeded(3);
        let mut list = ListController::new(api.clone(), 10);
        list.load().await;

        let outcome = list.delete_sample(1, "Site 1", &false).await;
        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert_eq!(api.count(|c| matches!(c, Call::DeleteSample(_))), 0);
    }

    #[actix_rt::test]
    async fn test_delete_reloads_current_page() {
        let api = seeded(25);
        let mut list = ListController::new(api.clone(), 10).starting_at(2);
        list.load().await;

        let outcome = list.delete_sample(11, "Site 11", &true).await;
        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(list.current_page(), 2);
        assert_eq!(list.data().unwrap().total, 24);
        assert_eq!(list.items()[0].sampling_location, "Site 12");
        assert_eq!(api.count(|c| matches!(c, Call::ListSamples { page: 2, .. })), 2);
    }

    #[actix_rt::test]
    async fn test_delete_last_row_steps_back_a_page() {
        let api = seeded(11);
        let mut list = ListController::new(api.clone(), 10).starting_at(2);
        list.load().await;
        assert_eq!(list.items().len(), 1);

        list.delete_sample(11, "Site 11", &true).await;
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.items().len(), 10);
        assert!(!list.has_next());
    }

    #[actix_rt::test]
    async fn test_failed_delete_leaves_list() {
        let api = seeded(3);
        let mut list = ListController::new(api.clone(), 10);
        list.load().await;

        api.fail(ApiOperation::DeleteSample);
        let outcome = list.delete_sample(2, "Site 2", &true).await;
        assert_eq!(outcome, ActionOutcome::Failed);
        assert_eq!(list.error(), Some("Failed to delete biosample"));
        assert_eq!(list.items().len(), 3);
        assert_eq!(api.count(|c| matches!(c, Call::ListSamples { .. })), 1);
    }

    #[actix_rt::test]
    async fn test_unmounted_list_ignores_late_page() {
        let api = seeded(3);
        let release = api.hold(ApiOperation::ListSamples);
        let mut list = ListController::new(api.clone(), 10);
        let handle = list.handle();

        tokio::join!(list.load(), async {
            while api.calls().is_empty() {
                tokio::task::yield_now().await;
            }
            handle.unmount();
            release.notify_one();
        });

        assert!(list.data().is_none());
    }
}
