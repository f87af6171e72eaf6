// src/helpers.rs
//! Small helpers shared by every screen: dates, confirmation wording and
//! turning failures into display strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::ApiError;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";
pub const INVALID_DATE: &str = "Invalid Date";

// ==================== DATES ====================

/// Reads a plain date, a naive date-time or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// "2024-03-05" -> "Mar 5, 2024".
pub fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Calendar-date part of an ISO date or date-time, as `YYYY-MM-DD`.
pub fn normalize_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.split('T').next().unwrap_or_default().to_string(),
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Today as `YYYY-MM-DD`, used as the default date and as the `max` of
/// date pickers.
pub fn today_date_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

// ==================== ERRORS ====================

/// Display string for any failure. API errors give their message, plain
/// string errors pass through, everything else gets a generic text.
pub fn error_message(err: &anyhow::Error) -> String {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        return api_err.message().to_string();
    }
    if let Some(msg) = err.downcast_ref::<String>() {
        return msg.clone();
    }
    if let Some(msg) = err.downcast_ref::<&'static str>() {
        return (*msg).to_string();
    }
    UNEXPECTED_ERROR.to_string()
}

// ==================== CONFIRMATION ====================

/// A blocking yes/no question put to the user before a destructive action.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

/// Fixed answer, for callers that already know the user's decision.
impl Confirm for bool {
    fn confirm(&self, _message: &str) -> bool {
        *self
    }
}

pub fn confirm_delete_sample_message(location: &str, include_comments: bool) -> String {
    let base = format!(
        "Are you sure you want to delete the sample from \"{}\"? This action cannot be undone",
        location
    );
    if include_comments {
        format!("{} and will also delete all associated comments.", base)
    } else {
        format!("{}.", base)
    }
}

pub fn confirm_delete_comment_message() -> &'static str {
    "Are you sure you want to delete this comment?"
}
