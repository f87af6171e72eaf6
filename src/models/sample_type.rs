// src/models/sample_type.rs
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use validator::ValidationError;

// ==================== SAMPLE TYPES ====================

/// Kind of material a sample was taken from.
///
/// The API stores the type as free text, so this set is advisory: the form
/// only offers these values and validation rejects anything else, but
/// samples carrying other values still load and render.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    Water,
    Chocolate,
    Flour,
    Soil,
    Air,
    Food,
    Pharmaceutical,
    Cosmetic,
    Other,
}

impl SampleType {
    /// Every type, in the order the form lists them.
    pub const ALL: [SampleType; 9] = [
        SampleType::Water,
        SampleType::Chocolate,
        SampleType::Flour,
        SampleType::Soil,
        SampleType::Air,
        SampleType::Food,
        SampleType::Pharmaceutical,
        SampleType::Cosmetic,
        SampleType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Option label: the wire value with its first letter capitalised.
    pub fn label(self) -> String {
        let value = self.as_str();
        let mut chars = value.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_some()
    }
}

pub fn validate_sample_type(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    if !SampleType::is_valid(value) {
        let mut err = ValidationError::new("unknown_sample_type");
        err.message = Some(format!("'{}' is not a known sample type", value).into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_type_strings() {
        assert_eq!(SampleType::Water.as_str(), "water");
        assert_eq!(SampleType::Pharmaceutical.to_string(), "pharmaceutical");
        assert_eq!(SampleType::parse("Soil"), Some(SampleType::Soil));
        assert_eq!(SampleType::parse(" COSMETIC "), Some(SampleType::Cosmetic));
        assert_eq!(SampleType::parse("plasma"), None);
    }

    #[test]
    fn test_all_values_in_form_order() {
        let values: Vec<&str> = SampleType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            values,
            vec!["water", "chocolate", "flour", "soil", "air", "food", "pharmaceutical", "cosmetic", "other"]
        );
    }

    #[test]
    fn test_labels_are_capitalised() {
        assert_eq!(SampleType::Water.label(), "Water");
        assert_eq!(SampleType::Pharmaceutical.label(), "Pharmaceutical");
    }

    #[test]
    fn test_validate_sample_type() {
        assert!(validate_sample_type("flour").is_ok());
        assert!(validate_sample_type("").is_err());
        let err = validate_sample_type("plasma").unwrap_err();
        assert_eq!(err.code, "unknown_sample_type");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SampleType::Air).unwrap();
        assert_eq!(json, "\"air\"");
        let parsed: SampleType = serde_json::from_str("\"food\"").unwrap();
        assert_eq!(parsed, SampleType::Food);
    }
}
