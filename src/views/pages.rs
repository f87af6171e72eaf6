// src/views/pages.rs
//! Full pages, one per screen.

use actix_web::http::StatusCode;

use super::comments::{add_comment_form, comment_list};
use super::samples::{empty_list, empty_page, pagination, sample_card, sample_form, sample_info};
use super::{alerts, back_link, escape, link_button, Page};
use crate::controllers::{CommentDraft, DetailController, FormController, ListController};
use crate::routes::Route;

pub fn list_page(list: &ListController) -> Page {
    let mut body = format!(
        "<div class=\"page-header\"><h1 class=\"page-title\">BioSamples</h1>{}</div>\n",
        link_button("/create", "+ New Sample", "primary", Some("Create new biosample"))
    );
    body.push_str(&alerts(list.error(), None));

    if list.items().is_empty() {
        match list.data() {
            Some(data) if data.total > 0 => body.push_str(&empty_page()),
            _ => body.push_str(&empty_list()),
        }
    } else {
        let page = list.current_page();
        let cards: Vec<String> = list.items().iter().map(|s| sample_card(s, page)).collect();
        body.push_str("<div class=\"biosample-grid\">\n");
        body.push_str(&cards.join("\n"));
        body.push_str("\n</div>\n");
    }
    if let Some(data) = list.data() {
        body.push_str(&pagination(data));
    }
    Page::new("BioSamples", body)
}

/// Detail screen for a loaded sample. Callers render
/// `sample_not_found_page` when the sample failed to load.
pub fn detail_page(detail: &DetailController, draft: &CommentDraft, today: &str) -> Page {
    let Some(sample) = detail.sample() else {
        return sample_not_found_page();
    };
    let mut body = back_link(Route::List, "Back to Samples");
    body.push_str(&format!(
        "\n<div class=\"page-header\"><h1 class=\"page-title\">{}</h1><div class=\"form-actions\">{}{}</div></div>\n",
        escape(&sample.sampling_location),
        link_button(
            &Route::Edit(sample.id).path(),
            "Edit Sample",
            "secondary",
            Some("Edit this sample")
        ),
        link_button(
            &format!("/biosample/{}/delete", sample.id),
            "Delete Sample",
            "danger",
            Some("Delete this sample")
        ),
    ));
    body.push_str(&alerts(detail.error(), None));
    body.push_str(&sample_info(sample));
    body.push_str(&format!(
        "\n<section class=\"comments-section\" aria-labelledby=\"comments-heading\">\n\
         <h2 id=\"comments-heading\">Comments ({})</h2>\n{}\n{}\n</section>",
        detail.comments().len(),
        comment_list(detail.comments()),
        add_comment_form(sample.id, draft, detail.submitting_comment(draft), today),
    ));
    Page::new(sample.sampling_location.clone(), body)
}

pub fn sample_not_found_page() -> Page {
    let body = format!(
        "<div class=\"error\" role=\"alert\">Sample not found</div>\n{}",
        back_link(Route::List, "Back to Samples")
    );
    Page::new("Sample not found", body)
}

pub fn form_page(form: &FormController, today: &str) -> Page {
    let mode = form.mode();
    let mut body = back_link(mode.back_route(), "Back");
    body.push_str(&format!(
        "\n<div class=\"page-header\"><h1 class=\"page-title\">{}</h1></div>\n",
        mode.title()
    ));
    body.push_str(&alerts(form.error(), form.success()));
    if form.is_loaded() {
        body.push_str(&sample_form(form, today));
    }
    Page::new(mode.title(), body).navigate(form.navigation())
}

/// The yes/no prompt in front of a destructive action. "Yes" posts
/// `confirm=yes` plus `hidden` to `action`; "No" follows `cancel`.
pub fn confirm_page(title: &str, message: &str, action: &str, cancel: &str, hidden: &[(&str, String)]) -> Page {
    let fields: String = hidden
        .iter()
        .map(|(name, value)| {
            format!(
                "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
                escape(name),
                escape(value)
            )
        })
        .collect();
    let body = format!(
        r#"<div class="card confirm">
<h1 class="page-title">{title}</h1>
<p>{message}</p>
<form method="post" action="{action}" class="form-actions">
{fields}
<button type="submit" name="confirm" value="yes" class="danger">Delete</button>
<a href="{cancel}" class="button secondary">Cancel</a>
</form>
</div>"#,
        title = escape(title),
        message = escape(message),
        action = escape(action),
        fields = fields,
        cancel = escape(cancel),
    );
    Page::new(title, body)
}

pub fn not_found_page() -> Page {
    let body = format!(
        "<div class=\"empty-state\"><h3>Page Not Found</h3>\
         <p>The page you're looking for doesn't exist.</p>{}</div>",
        link_button("/", "← Back to Samples", "primary", None)
    );
    Page::new("Page Not Found", body)
}

pub fn error_page(status: StatusCode, message: &str) -> Page {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<div class=\"page-header\"><h1 class=\"page-title\">{}</h1></div>\n{}\n{}",
        escape(title),
        super::error_alert(message),
        back_link(Route::List, "Back to Samples")
    );
    Page::new(title, body)
}
