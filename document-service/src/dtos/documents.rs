use crate::models::{Document, DocumentRecord};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Request body of `POST /api/documents`.
///
/// Clients may send client-side extras alongside the document; they are
/// accepted but dropped by the conversion into [`Document`]. Unknown fields
/// are ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedDocument {
    #[validate(
        length(min = 1, max = 255, message = "fileName must be 1-255 characters"),
        custom(function = "validate_file_name")
    )]
    pub file_name: String,
    pub content: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl From<ExtendedDocument> for Document {
    fn from(doc: ExtendedDocument) -> Self {
        Self {
            file_name: doc.file_name,
            content: doc.content,
        }
    }
}

/// A filename must be usable as a single `/api/document/:fileName` segment.
pub fn validate_file_name(file_name: &str) -> Result<(), ValidationError> {
    let invalid = file_name == "."
        || file_name == ".."
        || file_name
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());

    if invalid {
        let mut err = ValidationError::new("file_name");
        err.message = Some(Cow::from(
            "fileName must be a single path segment without separators or control characters",
        ));
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub file_name: String,
    pub content: String,
    pub size: usize,
    pub created_at: String,
}

impl From<DocumentRecord> for DocumentResponse {
    fn from(record: DocumentRecord) -> Self {
        Self {
            file_name: record.file_name,
            content: record.content,
            size: record.size,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extended(file_name: &str) -> ExtendedDocument {
        ExtendedDocument {
            file_name: file_name.to_string(),
            content: "body".to_string(),
            mime_type: None,
            tags: Vec::new(),
            size: None,
        }
    }

    #[test]
    fn conversion_drops_extra_fields() {
        let body = r#"{
            "fileName": "report.txt",
            "content": "quarterly numbers",
            "mimeType": "text/plain",
            "tags": ["finance"],
            "size": 999,
            "somethingElse": true
        }"#;
        let extended: ExtendedDocument = serde_json::from_str(body).unwrap();
        assert_eq!(extended.tags, vec!["finance".to_string()]);

        let document = Document::from(extended);
        assert_eq!(
            document,
            Document {
                file_name: "report.txt".to_string(),
                content: "quarterly numbers".to_string(),
            }
        );
    }

    #[test]
    fn missing_content_fails_to_deserialize() {
        let result = serde_json::from_str::<ExtendedDocument>(r#"{"fileName": "a.txt"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn plain_file_names_are_valid() {
        assert!(extended("notes.txt").validate().is_ok());
        assert!(extended("with spaces & ünïcode.md").validate().is_ok());
        assert!(extended(".hidden").validate().is_ok());
    }

    #[test]
    fn empty_file_name_is_rejected() {
        assert!(extended("").validate().is_err());
    }

    #[test]
    fn separators_and_dot_segments_are_rejected() {
        for name in ["a/b.txt", "a\\b.txt", ".", "..", "tab\tname"] {
            assert!(extended(name).validate().is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn overlong_file_name_is_rejected() {
        assert!(extended(&"x".repeat(256)).validate().is_err());
        assert!(extended(&"x".repeat(255)).validate().is_ok());
    }
}
