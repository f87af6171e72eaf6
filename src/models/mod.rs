// src/models/mod.rs

pub mod biosample;
pub mod comment;
pub mod sample_type;

pub use biosample::*;
pub use comment::*;
pub use sample_type::*;

use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

// ==================== SHARED VALIDATION ====================

/// Rejects empty and whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::from("must not be empty"));
        return Err(err);
    }
    Ok(())
}

/// Flattens validator output into one line, sorted so the text is stable.
pub fn validation_summary(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter()
                .map(|e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: invalid value", field),
                })
                .collect::<Vec<_>>()
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
