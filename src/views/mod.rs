// src/views/mod.rs
//! HTML rendering. Every value that came from a user or the API goes
//! through `escape` before it reaches markup.

pub mod comments;
pub mod pages;
pub mod samples;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use std::fmt::Write;

use crate::routes::{Navigation, Route};

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ==================== PAGE SHELL ====================

/// A complete HTML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub body: String,
    /// Seconds to wait and the path to load afterwards.
    pub refresh: Option<(f64, String)>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            refresh: None,
        }
    }

    /// Follows a delayed navigation with a meta refresh.
    pub fn navigate(mut self, navigation: Option<Navigation>) -> Self {
        if let Some(nav) = navigation {
            let seconds = nav.delay.map_or(0.0, |d| d.as_secs_f64());
            self.refresh = Some((seconds, nav.route.path()));
        }
        self
    }

    pub fn render(&self) -> String {
        let mut head = String::new();
        let _ = write!(head, "<title>{} · BioSamples</title>", escape(&self.title));
        if let Some((seconds, path)) = &self.refresh {
            let _ = write!(
                head,
                "<meta http-equiv=\"refresh\" content=\"{};url={}\">",
                seconds,
                escape(path)
            );
        }
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             {}\n<link rel=\"stylesheet\" href=\"/assets/app.css\">\n</head>\n\
             <body>\n<div class=\"app\">\n<main class=\"main-content\" role=\"main\">\n\
             <div class=\"container\">\n{}\n</div>\n</main>\n</div>\n</body>\n</html>\n",
            head, self.body
        )
    }

    pub fn into_response(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(self.render())
    }
}

// ==================== SHARED PIECES ====================

pub fn error_alert(message: &str) -> String {
    format!("<div class=\"error\" role=\"alert\">{}</div>", escape(message))
}

pub fn success_alert(message: &str) -> String {
    format!("<div class=\"success\" role=\"alert\">{}</div>", escape(message))
}

/// Error then success banner; empty when there is nothing to show.
pub fn alerts(error: Option<&str>, success: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(message) = error {
        out.push_str(&error_alert(message));
    }
    if let Some(message) = success {
        out.push_str(&success_alert(message));
    }
    out
}

pub fn back_link(route: Route, label: &str) -> String {
    format!(
        "<a href=\"{}\" class=\"back-button\">← {}</a>",
        escape(&route.path()),
        escape(label)
    )
}

/// A link styled as a button.
pub fn link_button(href: &str, label: &str, class: &str, aria_label: Option<&str>) -> String {
    let aria = aria_label
        .map(|a| format!(" aria-label=\"{}\"", escape(a)))
        .unwrap_or_default();
    format!(
        "<a href=\"{}\" class=\"button {}\"{}>{}</a>",
        escape(href),
        class,
        aria,
        escape(label)
    )
}
