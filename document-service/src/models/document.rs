use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document as handed to the store: the identifying filename and its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub file_name: String,
    pub content: String,
}

/// The persisted form of a document. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub file_name: String,
    pub content: String,
    pub size: usize,
    pub created_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn new(document: Document) -> Self {
        Self {
            size: document.content.len(),
            file_name: document.file_name,
            content: document.content,
            created_at: Utc::now(),
        }
    }
}
