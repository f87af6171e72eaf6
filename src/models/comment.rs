// src/models/comment.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;

// ==================== COMMENT ====================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub biosample_id: i64,
    pub content: String,
    pub created_at: String,
}

/// Body of `POST /comments/`. Without `created_at` the server uses today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CommentCreate {
    pub biosample_id: i64,

    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comment_create_omits_missing_date() {
        let payload = CommentCreate {
            biosample_id: 5,
            content: "Turbid on arrival".to_string(),
            created_at: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "biosample_id": 5, "content": "Turbid on arrival" })
        );
    }

    #[test]
    fn test_blank_content_is_invalid() {
        let payload = CommentCreate {
            biosample_id: 5,
            content: "   ".to_string(),
            created_at: Some("2024-02-01".to_string()),
        };
        assert!(payload.validate().is_err());
    }
}
