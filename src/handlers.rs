// src/handlers.rs
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use std::cell::RefCell;
use std::sync::Arc;

use crate::comment_handlers;
use crate::controllers::{ListController, PageStep};
use crate::error::{UiError, UiResult};
use crate::helpers::Confirm;
use crate::monitoring;
use crate::routes::Route;
use crate::sample_handlers;
use crate::views::pages;
use crate::AppState;

// ==================== COMMON STRUCTURES ====================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub go: Option<PageStep>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// Answer to a confirmation prompt, taken from a posted form.
///
/// The prompt itself was the page that rendered the form; posting
/// `confirm=yes` means the user agreed to it. The message the controller
/// asked about is kept so it can be logged.
#[derive(Debug, Default)]
pub struct PostedConfirmation {
    accepted: bool,
    asked: RefCell<Option<String>>,
}

impl PostedConfirmation {
    pub fn from_field(confirm: Option<&str>) -> Self {
        Self {
            accepted: confirm == Some("yes"),
            asked: RefCell::new(None),
        }
    }

    pub fn asked(&self) -> Option<String> {
        self.asked.borrow().clone()
    }
}

impl Confirm for PostedConfirmation {
    fn confirm(&self, message: &str) -> bool {
        *self.asked.borrow_mut() = Some(message.to_string());
        if self.accepted {
            log::info!("Confirmed: {}", message);
        }
        self.accepted
    }
}

/// Post/redirect/get target.
pub fn see_other(route: Route) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, route.path()))
        .finish()
}

/// Path ids arrive as text so that junk renders the not-found page
/// instead of a bare extractor error.
pub fn parse_id(raw: &str) -> UiResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| UiError::invalid_sample_id(raw))
}

// ==================== LIST ====================

/// `GET /`. With `go=prev|next` the list moves relative to `page` only if
/// the freshly loaded page allows it, then redirects to the new page.
pub async fn index(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<ListQuery>,
) -> HttpResponse {
    let mut list = ListController::new(app_state.api.clone(), app_state.config.ui.page_size)
        .starting_at(query.page());
    list.load().await;

    if let Some(step) = query.go {
        if list.step(step) {
            return see_other(Route::ListPage(list.current_page()));
        }
    }
    pages::list_page(&list).into_response(StatusCode::OK)
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    log::debug!("No route for {} {}", req.method(), req.path());
    pages::not_found_page().into_response(StatusCode::NOT_FOUND)
}

// ==================== ROUTES ====================

pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| UiError::BadRequest(err.to_string()).into());
    let form_config = web::FormConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| UiError::BadRequest(err.to_string()).into());

    cfg.app_data(query_config)
        .app_data(form_config)
        .route("/", web::get().to(index))
        .route("/health", web::get().to(monitoring::health_check))
        .route("/create", web::get().to(sample_handlers::new_sample_form))
        .route("/create", web::post().to(sample_handlers::create_sample))
        .route("/edit/{id}", web::get().to(sample_handlers::edit_sample_form))
        .route("/edit/{id}", web::post().to(sample_handlers::update_sample))
        .service(
            web::scope("/biosample/{id}")
                .route("", web::get().to(sample_handlers::sample_detail))
                .route("/delete", web::get().to(sample_handlers::confirm_delete_sample))
                .route("/delete", web::post().to(sample_handlers::delete_sample))
                .route("/comments", web::post().to(comment_handlers::add_comment))
                .route("/comments/{comment_id}/delete", web::get().to(comment_handlers::confirm_delete_comment))
                .route("/comments/{comment_id}/delete", web::post().to(comment_handlers::delete_comment))
        );
}
