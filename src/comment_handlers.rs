// src/comment_handlers.rs
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::controllers::{ActionOutcome, AddCommentError, CommentDraft};
use crate::error::{UiError, UiResult};
use crate::handlers::{parse_id, see_other, PostedConfirmation};
use crate::helpers::confirm_delete_comment_message;
use crate::routes::Route;
use crate::sample_handlers::{detail_controller, render_detail};
use crate::views::pages;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmForm {
    pub confirm: Option<String>,
}

/// `POST /biosample/{id}/comments`. Success redirects back to the detail
/// screen with a fresh form; a failure re-renders it with the draft kept.
pub async fn add_comment(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
    draft: web::Form<CommentDraft>,
) -> UiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let draft = draft.into_inner();
    let mut detail = detail_controller(&app_state, id);
    detail.load().await;
    if detail.sample().is_none() {
        return Ok(render_detail(&detail, &draft));
    }

    Ok(match detail.add_comment(&draft).await {
        Ok(comment) => {
            log::info!("Added comment {} to biosample {}", comment.id, id);
            see_other(Route::Detail(id))
        }
        Err(AddCommentError::Blank) => see_other(Route::Detail(id)),
        Err(AddCommentError::AlreadySubmitting) => {
            let mut resp = render_detail(&detail, &draft);
            *resp.status_mut() = StatusCode::CONFLICT;
            resp
        }
        Err(_) => render_detail(&detail, &draft),
    })
}

fn parse_comment_path(path: &(String, String)) -> UiResult<(i64, i64)> {
    let (sample, comment) = path;
    let comment_id = comment
        .trim()
        .parse::<i64>()
        .map_err(|_| UiError::NotFound(format!("No comment with ID '{}'", comment)))?;
    Ok((parse_id(sample)?, comment_id))
}

pub async fn confirm_delete_comment(path: web::Path<(String, String)>) -> UiResult<HttpResponse> {
    let (id, comment_id) = parse_comment_path(&path)?;
    let prompt = pages::confirm_page(
        "Delete Comment",
        confirm_delete_comment_message(),
        &format!("/biosample/{}/comments/{}/delete", id, comment_id),
        &Route::Detail(id).path(),
        &[],
    );
    Ok(prompt.into_response(StatusCode::OK))
}

pub async fn delete_comment(
    app_state: web::Data<Arc<AppState>>,
    path: web::Path<(String, String)>,
    form: web::Form<ConfirmForm>,
) -> UiResult<HttpResponse> {
    let (id, comment_id) = parse_comment_path(&path)?;
    let confirmation = PostedConfirmation::from_field(form.confirm.as_deref());
    let mut detail = detail_controller(&app_state, id);
    detail.load().await;
    if detail.sample().is_none() {
        return Ok(render_detail(&detail, &CommentDraft::fresh()));
    }

    Ok(match detail.delete_comment(comment_id, &confirmation).await {
        ActionOutcome::Failed => render_detail(&detail, &CommentDraft::fresh()),
        _ => see_other(Route::Detail(id)),
    })
}
