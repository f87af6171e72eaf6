// src/controllers/form.rs
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;

use super::{display_error, Liveness, ScreenHandle};
use crate::api::BioSampleApi;
use crate::helpers::normalize_date;
use crate::models::{validation_summary, BioSample, BioSampleCreate};
use crate::routes::{Navigation, Route};

pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

// ==================== FORM TYPES ====================

/// The "use today's date" / "specify a date" radio pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOption {
    #[default]
    Today,
    Specify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Create New Sample",
            FormMode::Edit(_) => "Edit Sample",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Create Sample",
            FormMode::Edit(_) => "Update Sample",
        }
    }

    /// Where "Back" and "Cancel" lead.
    pub fn back_route(&self) -> Route {
        match self {
            FormMode::Create => Route::List,
            FormMode::Edit(id) => Route::Detail(*id),
        }
    }
}

/// Raw field values as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleFields {
    pub sampling_location: String,
    pub sample_type: String,
    pub sampling_date: String,
    pub sampling_operator: String,
}

impl From<&BioSample> for SampleFields {
    fn from(sample: &BioSample) -> Self {
        Self {
            sampling_location: sample.sampling_location.clone(),
            sample_type: sample.sample_type.clone(),
            sampling_date: normalize_date(&sample.sampling_date),
            sampling_operator: sample.sampling_operator.clone(),
        }
    }
}

/// A posted sample form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleFormInput {
    #[serde(default)]
    pub sampling_location: String,
    #[serde(default, rename = "type")]
    pub sample_type: String,
    #[serde(default)]
    pub sampling_date: String,
    #[serde(default)]
    pub sampling_operator: String,
    #[serde(default)]
    pub date_option: DateOption,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to send: edit mode without changes, or the form is busy.
    Unchanged,
    /// Rejected locally; `error` says why.
    Invalid,
    Saved(BioSample),
    Failed,
}

fn build_payload(fields: &SampleFields, date_option: DateOption) -> BioSampleCreate {
    let date = fields.sampling_date.trim();
    let sampling_date = match date_option {
        DateOption::Specify if !date.is_empty() => Some(date.to_string()),
        _ => None,
    };
    BioSampleCreate {
        sampling_location: fields.sampling_location.trim().to_string(),
        sample_type: fields.sample_type.trim().to_string(),
        sampling_date,
        sampling_operator: fields.sampling_operator.trim().to_string(),
    }
}

// ==================== CONTROLLER ====================

/// Create and edit share one controller; the mode decides which call
/// `submit` makes and whether change detection applies.
pub struct FormController {
    api: Arc<dyn BioSampleApi>,
    mode: FormMode,
    fields: SampleFields,
    date_option: DateOption,
    original: Option<(SampleFields, DateOption)>,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
    navigation: Option<Navigation>,
    redirect_delay: Duration,
    liveness: Liveness,
}

impl FormController {
    pub fn new(api: Arc<dyn BioSampleApi>, mode: FormMode) -> Self {
        Self {
            api,
            mode,
            fields: SampleFields::default(),
            date_option: DateOption::Today,
            original: None,
            loading: false,
            error: None,
            success: None,
            navigation: None,
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            liveness: Liveness::new(),
        }
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &SampleFields {
        &self.fields
    }

    pub fn date_option(&self) -> DateOption {
        self.date_option
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        !self.mode.is_edit() || self.original.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn navigation(&self) -> Option<Navigation> {
        self.navigation
    }

    pub fn handle(&self) -> ScreenHandle {
        self.liveness.handle()
    }

    /// Edit mode only: pins the form to the stored date and snapshots what
    /// was loaded. Create mode has nothing to fetch.
    pub async fn load(&mut self) {
        let FormMode::Edit(id) = self.mode else {
            return;
        };
        let ticket = self.liveness.begin();
        self.loading = true;
        self.error = None;

        let result = self.api.get_sample(id).await;
        if !self.liveness.is_current(ticket) {
            log::debug!("Discarding stale form load for biosample {}", id);
            return;
        }
        match result {
            Ok(sample) => {
                self.fields = SampleFields::from(&sample);
                self.date_option = DateOption::Specify;
                self.original = Some((self.fields.clone(), self.date_option));
            }
            Err(err) => self.error = Some(display_error(&err)),
        }
        self.loading = false;
    }

    // ==================== FIELD EDITS ====================

    pub fn apply(&mut self, input: SampleFormInput) {
        self.fields.sampling_location = input.sampling_location;
        self.fields.sample_type = input.sample_type;
        self.fields.sampling_operator = input.sampling_operator;
        self.set_date_option(input.date_option);
        if input.date_option == DateOption::Specify {
            self.fields.sampling_date = input.sampling_date;
        }
    }

    /// Switching to "use today" clears any typed date.
    pub fn set_date_option(&mut self, option: DateOption) {
        self.date_option = option;
        if option == DateOption::Today {
            self.fields.sampling_date.clear();
        }
    }

    /// What `submit` would send right now.
    pub fn payload(&self) -> BioSampleCreate {
        build_payload(&self.fields, self.date_option)
    }

    /// Always true in create mode. In edit mode, true when the effective
    /// payload or the date toggle differs from what was loaded.
    pub fn has_changes(&self) -> bool {
        match (&self.mode, &self.original) {
            (FormMode::Create, _) => true,
            (FormMode::Edit(_), None) => false,
            (FormMode::Edit(_), Some((fields, option))) => {
                build_payload(fields, *option) != self.payload() || *option != self.date_option
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.has_changes()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.date_option == DateOption::Specify && self.fields.sampling_date.trim().is_empty() {
            return Err("sampling_date: a date is required when specifying a date".to_string());
        }
        self.payload().validate().map_err(|errors| validation_summary(&errors))
    }

    // ==================== SUBMIT ====================

    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Unchanged;
        }
        self.error = None;
        self.success = None;
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return SubmitOutcome::Invalid;
        }

        let payload = self.payload();
        let ticket = self.liveness.observe();
        self.loading = true;
        let result = match self.mode {
            FormMode::Create => self.api.create_sample(&payload).await,
            FormMode::Edit(id) => self.api.update_sample(id, &payload).await,
        };
        if !self.liveness.is_current(ticket) {
            return match result {
                Ok(sample) => SubmitOutcome::Saved(sample),
                Err(_) => SubmitOutcome::Failed,
            };
        }
        self.loading = false;

        match result {
            Ok(sample) => {
                let (message, id) = match self.mode {
                    FormMode::Create => ("Sample created successfully!", sample.id),
                    FormMode::Edit(id) => ("Sample updated successfully!", id),
                };
                log::info!("{} (biosample {})", message, id);
                self.success = Some(message.to_string());
                self.navigation = Some(Navigation::after(Route::Detail(id), self.redirect_delay));
                SubmitOutcome::Saved(sample)
            }
            Err(err) => {
                self.error = Some(display_error(&err));
                SubmitOutcome::Failed
            }
        }
    }
}
