// src/models/biosample.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_not_blank, validate_sample_type};

// ==================== BIOSAMPLE ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioSample {
    pub id: i64,
    pub sampling_location: String,
    #[serde(rename = "type")]
    pub sample_type: String,
    /// ISO 8601 date as sent by the server.
    pub sampling_date: String,
    pub sampling_operator: String,
}

/// Body of `POST /biosamples/` and `PUT /biosamples/{id}`.
///
/// A missing `sampling_date` is left out of the JSON entirely so the server
/// picks the date: today on create, the stored date on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BioSampleCreate {
    #[validate(custom(function = "validate_not_blank"))]
    pub sampling_location: String,

    #[serde(rename = "type")]
    #[validate(custom(function = "validate_sample_type"))]
    pub sample_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_date: Option<String>,

    #[validate(custom(function = "validate_not_blank"))]
    pub sampling_operator: String,
}

// ==================== PAGINATION ====================

/// One page of samples as returned by `GET /biosamples/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedBioSamples {
    pub items: Vec<BioSample>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginatedBioSamples {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `has_prev`/`has_next` agree with `page` and `total_pages`.
    pub fn flags_consistent(&self) -> bool {
        self.has_prev == (self.page > 1) && self.has_next == (self.page < self.total_pages)
    }
}
