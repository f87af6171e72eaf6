// src/error.rs
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::views::pages;

// ==================== API ERRORS ====================

/// Failure of a single call against the biosample API.
///
/// Transport errors, non-2xx responses and undecodable bodies all collapse
/// into this one type; only a human-readable message survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

// ==================== UI ERRORS ====================

/// Errors raised by the web layer itself, before any screen is rendered.
#[derive(Debug)]
pub enum UiError {
    NotFound(String),
    BadRequest(String),
}

pub type UiResult<T> = Result<T, UiError>;

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            UiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
        }
    }
}

impl std::error::Error for UiError {}

impl ResponseError for UiError {
    fn status_code(&self) -> StatusCode {
        match self {
            UiError::NotFound(_) => StatusCode::NOT_FOUND,
            UiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        log::debug!("Rejected request: {}", self);
        pages::error_page(self.status_code(), &self.to_string()).into_response(self.status_code())
    }
}

impl UiError {
    pub fn invalid_sample_id(raw: &str) -> Self {
        UiError::NotFound(format!("No sample with ID '{}'", raw))
    }
}
