// src/views/samples.rs
use std::fmt::Write;

use super::{escape, link_button};
use crate::controllers::{DateOption, FormController, FormMode};
use crate::helpers::format_date;
use crate::models::{BioSample, PaginatedBioSamples, SampleType};
use crate::routes::Route;

// ==================== LIST ====================

/// One grid card. `page` is carried into the delete link so the list comes
/// back where it was.
pub fn sample_card(sample: &BioSample, page: i64) -> String {
    let id = sample.id;
    let location = escape(&sample.sampling_location);
    format!(
        r#"<article class="biosample-card">
<h3><a href="/biosample/{id}" aria-label="View details for sample from {location}">{location}</a></h3>
<div class="biosample-meta">
<div class="biosample-meta-item"><span class="biosample-meta-label">Type</span><div class="biosample-type">{sample_type}</div></div>
<div class="biosample-meta-item"><span class="biosample-meta-label">Date</span><time class="biosample-meta-value" datetime="{date_attr}">{date}</time></div>
<div class="biosample-meta-item"><span class="biosample-meta-label">Operator</span><span class="biosample-meta-value">{operator}</span></div>
</div>
<div class="biosample-actions">
{view}
{edit}
{delete}
</div>
</article>"#,
        id = id,
        location = location,
        sample_type = escape(&sample.sample_type),
        date_attr = escape(&sample.sampling_date),
        date = escape(&format_date(&sample.sampling_date)),
        operator = escape(&sample.sampling_operator),
        view = link_button(
            &format!("/biosample/{}", id),
            "View Details",
            "secondary small",
            Some(&format!("View details for sample {}", id))
        ),
        edit = link_button(
            &format!("/edit/{}", id),
            "Edit",
            "secondary small",
            Some(&format!("Edit sample {}", id))
        ),
        delete = link_button(
            &format!("/biosample/{}/delete?from=list&page={}", id, page),
            "Delete",
            "danger small",
            Some(&format!("Delete sample {}", id))
        ),
    )
}

pub fn empty_list() -> String {
    format!(
        "<div class=\"empty-state\"><h3>No samples yet</h3>\
         <p>Get started by creating your first biosample.</p>{}</div>",
        link_button("/create", "+ Create Sample", "primary", None)
    )
}

/// A page number past the end while other pages still hold samples.
pub fn empty_page() -> String {
    format!(
        "<div class=\"empty-state\"><h3>No samples on this page</h3>\
         <p>This page is past the end of the list.</p>{}</div>",
        link_button(&Route::List.path(), "Go to first page", "secondary", None)
    )
}

/// Previous/next controls. Buttons are disabled when the server says
/// there is no page in that direction.
pub fn pagination(data: &PaginatedBioSamples) -> String {
    if data.total_pages <= 1 && !data.has_prev {
        return String::new();
    }
    let disabled = |enabled: bool| if enabled { "" } else { " disabled" };
    format!(
        r#"<form class="pagination" method="get" action="/">
<input type="hidden" name="page" value="{page}">
<button type="submit" name="go" value="prev" class="secondary"{prev}>← Previous</button>
<span class="pagination-status">Page {page} of {total_pages} ({total} samples)</span>
<button type="submit" name="go" value="next" class="secondary"{next}>Next →</button>
</form>"#,
        page = data.page,
        total_pages = data.total_pages.max(1),
        total = data.total,
        prev = disabled(data.has_prev),
        next = disabled(data.has_next),
    )
}

// ==================== DETAIL ====================

pub fn sample_info(sample: &BioSample) -> String {
    let items = [
        ("Sample ID", format!("#{}", sample.id)),
        ("Location", escape(&sample.sampling_location)),
        ("Type", escape(&sample.sample_type)),
    ];
    let mut out = String::from("<div class=\"card\">\n<h2>Sample Information</h2>\n<div class=\"sample-info\">\n");
    for (label, value) in items {
        let _ = writeln!(
            out,
            "<div class=\"sample-info-item\"><span class=\"sample-info-label\">{}</span><span class=\"sample-info-value\">{}</span></div>",
            label, value
        );
    }
    let _ = writeln!(
        out,
        "<div class=\"sample-info-item\"><span class=\"sample-info-label\">Sampling Date</span><time class=\"sample-info-value\" datetime=\"{}\">{}</time></div>",
        escape(&sample.sampling_date),
        escape(&format_date(&sample.sampling_date))
    );
    let _ = writeln!(
        out,
        "<div class=\"sample-info-item\"><span class=\"sample-info-label\">Operator</span><span class=\"sample-info-value\">{}</span></div>",
        escape(&sample.sampling_operator)
    );
    out.push_str("</div>\n</div>");
    out
}

// ==================== FORM ====================

fn type_options(selected: &str) -> String {
    let mut out = String::from("<option value=\"\">Select a type...</option>");
    for sample_type in SampleType::ALL {
        let value = sample_type.as_str();
        let mark = if value == selected { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{}\"{}>{}</option>", value, mark, sample_type.label());
    }
    // stored values outside the known set still show up as selected
    if !selected.is_empty() && !SampleType::is_valid(selected) {
        let _ = write!(
            out,
            "<option value=\"{0}\" selected>{0}</option>",
            escape(selected)
        );
    }
    out
}

/// Create/edit form. In edit mode the submit button starts disabled until
/// something is changed; the browser re-enables it on any input and the
/// server repeats the change check on post.
pub fn sample_form(form: &FormController, today: &str) -> String {
    let mode = form.mode();
    let fields = form.fields();
    let action = match mode {
        FormMode::Create => "/create".to_string(),
        FormMode::Edit(id) => format!("/edit/{}", id),
    };
    let checked = |option: DateOption| if form.date_option() == option { " checked" } else { "" };
    let submit_disabled = if form.can_submit() { "" } else { " disabled" };
    let cancel = mode.back_route().path();

    format!(
        r#"<div class="card">
<form method="post" action="{action}" novalidate oninput="this.querySelector('button[type=submit]').disabled = false">
<div class="form-group">
<label for="sampling_location" class="required">Sampling Location</label>
<input type="text" id="sampling_location" name="sampling_location" value="{location}" placeholder="e.g., Lab Room 101, Field Site A" required aria-describedby="location-help">
<small id="location-help">Specify where the sample was collected from</small>
</div>
<div class="form-group">
<label for="type" class="required">Sample Type</label>
<select id="type" name="type" required aria-describedby="type-help">{options}</select>
<small id="type-help">Choose the category that best describes your sample</small>
</div>
<fieldset class="form-group">
<legend>Sampling Date</legend>
<div class="date-group" role="radiogroup">
<div class="radio-option"><input type="radio" id="today-date" name="date_option" value="today"{today_checked}><label for="today-date">Use today's date ({today})</label></div>
<div class="radio-option"><input type="radio" id="custom-sampling-date" name="date_option" value="specify"{specify_checked}><label for="custom-sampling-date">Specify a date</label></div>
<input type="date" id="sampling_date" name="sampling_date" value="{date}" aria-label="Sampling date">
</div>
<small>With "use today's date" selected, today's date ({today}) is assigned automatically.</small>
</fieldset>
<div class="form-group">
<label for="sampling_operator" class="required">Sampling Operator</label>
<input type="text" id="sampling_operator" name="sampling_operator" value="{operator}" placeholder="e.g., John Doe, Lab Technician" required aria-describedby="operator-help">
<small id="operator-help">Name of the person who collected the sample</small>
</div>
<div class="form-actions">
<button type="submit"{submit_disabled}>{submit_label}</button>
<a href="{cancel}" class="button secondary">Cancel</a>
</div>
</form>
</div>"#,
        action = action,
        location = escape(&fields.sampling_location),
        options = type_options(&fields.sample_type),
        today = escape(today),
        today_checked = checked(DateOption::Today),
        specify_checked = checked(DateOption::Specify),
        date = escape(&fields.sampling_date),
        operator = escape(&fields.sampling_operator),
        submit_disabled = submit_disabled,
        submit_label = mode.submit_label(),
        cancel = escape(&cancel),
    )
}
