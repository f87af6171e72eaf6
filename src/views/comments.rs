// src/views/comments.rs
use super::{escape, link_button};
use crate::controllers::{CommentDraft, DateOption};
use crate::helpers::format_date;
use crate::models::Comment;

pub fn comment_card(comment: &Comment) -> String {
    format!(
        r#"<article class="comment" role="listitem">
<header class="comment-header">
<time class="comment-date" datetime="{date_attr}">{date}</time>
{delete}
</header>
<p class="comment-content">{content}</p>
</article>"#,
        date_attr = escape(&comment.created_at),
        date = escape(&format_date(&comment.created_at)),
        delete = link_button(
            &format!("/biosample/{}/comments/{}/delete", comment.biosample_id, comment.id),
            "Delete",
            "danger small",
            Some("Delete this comment")
        ),
        content = escape(&comment.content),
    )
}

pub fn comment_list(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "<p class=\"empty-state\">No comments yet. Add the first comment below.</p>".to_string();
    }
    let cards: Vec<String> = comments.iter().map(comment_card).collect();
    format!("<div class=\"comments-list\" role=\"list\">\n{}\n</div>", cards.join("\n"))
}

/// The add-comment form. A failed submission renders it again with the
/// draft still filled in.
pub fn add_comment_form(biosample_id: i64, draft: &CommentDraft, submitting: bool, today: &str) -> String {
    let checked = |option: DateOption| if draft.date_option == option { " checked" } else { "" };
    let (disabled, label, status) = if submitting {
        (
            " disabled",
            "Adding Comment...",
            "<span id=\"submitting-status\" aria-live=\"polite\">Please wait...</span>",
        )
    } else {
        ("", "Add Comment", "")
    };
    format!(
        r#"<form method="post" action="/biosample/{id}/comments" class="comment-form">
<h3>Add Comment</h3>
<input type="hidden" name="token" value="{token}">
<div class="form-group">
<label for="comment" class="required">Comment</label>
<textarea id="comment" name="content" placeholder="Enter your comment..." rows="4" required aria-describedby="comment-help">{content}</textarea>
<small id="comment-help">Describe observations, findings, or notes about this sample.</small>
</div>
<fieldset class="form-group">
<legend>Comment Date</legend>
<div class="date-group" role="radiogroup">
<div class="radio-option"><input type="radio" id="today" name="date_option" value="today"{today_checked}><label for="today">Use today's date ({today})</label></div>
<div class="radio-option"><input type="radio" id="custom-date" name="date_option" value="specify"{specify_checked}><label for="custom-date">Specify a date</label></div>
<input type="date" id="commentDate" name="created_at" value="{date}" max="{today}" aria-label="Comment date">
</div>
</fieldset>
<div class="form-actions">
<button type="submit"{disabled}>{label}</button>
{status}
</div>
</form>"#,
        id = biosample_id,
        content = escape(&draft.content),
        token = escape(&draft.token),
        today = escape(today),
        today_checked = checked(DateOption::Today),
        specify_checked = checked(DateOption::Specify),
        date = escape(&draft.created_at),
        disabled = disabled,
        label = label,
        status = status,
    )
}
