// src/sample_handlers.rs
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::controllers::{
    ActionOutcome, CommentDraft, DetailController, FormController, FormMode, ListController, SampleFormInput,
};
use crate::error::UiResult;
use crate::handlers::{parse_id, see_other, PostedConfirmation};
use crate::helpers::{confirm_delete_sample_message, today_date_string};
use crate::routes::Route;
use crate::views::pages;
use crate::AppState;

// ==================== DETAIL ====================

pub(crate) fn detail_controller(app_state: &AppState, id: i64) -> DetailController {
    DetailController::new(app_state.api.clone(), id, app_state.comment_submissions.clone())
}

/// Renders the detail screen, or the not-found page when nothing loaded.
pub(crate) fn render_detail(detail: &DetailController, draft: &CommentDraft) -> HttpResponse {
    if detail.sample().is_none() {
        return pages::sample_not_found_page().into_response(StatusCode::NOT_FOUND);
    }
    pages::detail_page(detail, draft, &today_date_string()).into_response(StatusCode::OK)
}

pub async fn sample_detail(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> UiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let mut detail = detail_controller(&app_state, id);
    detail.load().await;
    Ok(render_detail(&detail, &CommentDraft::fresh()))
}

// ==================== CREATE / EDIT ====================

fn form_controller(app_state: &AppState, mode: FormMode) -> FormController {
    FormController::new(app_state.api.clone(), mode).with_redirect_delay(app_state.config.redirect_delay())
}

fn render_form(form: &FormController) -> HttpResponse {
    pages::form_page(form, &today_date_string()).into_response(StatusCode::OK)
}

pub async fn new_sample_form(app_state: web::Data<Arc<AppState>>) -> HttpResponse {
    render_form(&form_controller(&app_state, FormMode::Create))
}

pub async fn create_sample(
    app_state: web::Data<Arc<AppState>>,
    input: web::Form<SampleFormInput>,
) -> HttpResponse {
    let mut form = form_controller(&app_state, FormMode::Create);
    form.apply(input.into_inner());
    form.submit().await;
    render_form(&form)
}

pub async fn edit_sample_form(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> UiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let mut form = form_controller(&app_state, FormMode::Edit(id));
    form.load().await;
    Ok(render_form(&form))
}

/// Reloads the stored sample first so change detection compares against
/// what the server holds now.
pub async fn update_sample(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    input: web::Form<SampleFormInput>,
) -> UiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let mut form = form_controller(&app_state, FormMode::Edit(id));
    form.load().await;
    if form.is_loaded() {
        form.apply(input.into_inner());
        form.submit().await;
    }
    Ok(render_form(&form))
}

// ==================== DELETE ====================

#[derive(Debug, Default, Deserialize)]
pub struct DeleteSampleQuery {
    pub from: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteSampleForm {
    pub confirm: Option<String>,
    pub from: Option<String>,
    pub page: Option<i64>,
    pub location: Option<String>,
}

fn from_list(from: Option<&str>) -> bool {
    from == Some("list")
}

/// `GET /biosample/{id}/delete`: the confirmation prompt. From the list
/// the wording is the short one; from the detail screen it warns about
/// the comments.
pub async fn confirm_delete_sample(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    query: web::Query<DeleteSampleQuery>,
) -> UiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let sample = match app_state.api.get_sample(id).await {
        Ok(sample) => sample,
        Err(err) => {
            log::warn!("Cannot confirm delete of biosample {}: {}", id, err);
            return Ok(pages::sample_not_found_page().into_response(StatusCode::NOT_FOUND));
        }
    };

    let list = from_list(query.from.as_deref());
    let page = query.page.unwrap_or(1).max(1);
    let message = confirm_delete_sample_message(&sample.sampling_location, !list);
    let cancel = if list { Route::ListPage(page) } else { Route::Detail(id) };
    let mut hidden = vec![("location", sample.sampling_location.clone())];
    if list {
        hidden.push(("from", "list".to_string()));
        hidden.push(("page", page.to_string()));
    }

    let prompt = pages::confirm_page(
        "Delete Sample",
        &message,
        &format!("/biosample/{}/delete", id),
        &cancel.path(),
        &hidden,
    );
    Ok(prompt.into_response(StatusCode::OK))
}

pub async fn delete_sample(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    form: web::Form<DeleteSampleForm>,
) -> UiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let form = form.into_inner();
    let confirmation = PostedConfirmation::from_field(form.confirm.as_deref());

    if from_list(form.from.as_deref()) {
        let mut list = ListController::new(app_state.api.clone(), app_state.config.ui.page_size)
            .starting_at(form.page.unwrap_or(1));
        list.load().await;
        let location = form.location.unwrap_or_default();
        return Ok(match list.delete_sample(id, &location, &confirmation).await {
            ActionOutcome::Failed => pages::list_page(&list).into_response(StatusCode::OK),
            _ => see_other(Route::ListPage(list.current_page())),
        });
    }

    let mut detail = detail_controller(&app_state, id);
    detail.load().await;
    if detail.sample().is_none() {
        return Ok(render_detail(&detail, &CommentDraft::fresh()));
    }
    Ok(match detail.delete_sample(&confirmation).await {
        ActionOutcome::Completed => see_other(detail.navigation().map_or(Route::List, |nav| nav.route)),
        ActionOutcome::Cancelled => see_other(Route::Detail(id)),
        ActionOutcome::Failed => render_detail(&detail, &CommentDraft::fresh()),
    })
}
