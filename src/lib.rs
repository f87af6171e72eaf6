// src/lib.rs
//! BioSample UI: server-rendered screens for laboratory biosamples and their
//! comments, backed by the remote biosample API.

use std::sync::Arc;

pub mod api;
pub mod comment_handlers;
pub mod config;
pub mod controllers;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod monitoring;
pub mod routes;
pub mod sample_handlers;
pub mod views;

use api::BioSampleApi;
use config::Config;
use controllers::InFlight;

/// Process-wide state shared by every worker. Screen state never lives here.
pub struct AppState {
    pub api: Arc<dyn BioSampleApi>,
    pub config: Config,
    /// Sample ids with a comment submission currently in flight.
    pub comment_submissions: InFlight,
}

impl AppState {
    pub fn new(api: Arc<dyn BioSampleApi>, config: Config) -> Self {
        Self {
            api,
            config,
            comment_submissions: InFlight::default(),
        }
    }
}
