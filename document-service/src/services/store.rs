use crate::models::{Document, DocumentRecord};
use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents, oldest first.
    async fn list(&self) -> Result<Vec<DocumentRecord>, AppError>;
    async fn get(&self, file_name: &str) -> Result<DocumentRecord, AppError>;
    /// Inserts the document unless its filename is already taken, in which
    /// case `AppError::Conflict` is returned and the store is unchanged.
    async fn add(&self, document: Document) -> Result<DocumentRecord, AppError>;
    async fn count(&self) -> Result<usize, AppError>;
}

pub(crate) fn not_found(file_name: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Document '{}' not found", file_name))
}

pub(crate) fn conflict(file_name: &str) -> AppError {
    AppError::Conflict(anyhow::anyhow!("Document '{}' already exists", file_name))
}

/// Insertion-ordered records with a filename lookup table.
#[derive(Debug, Default)]
pub(crate) struct DocumentIndex {
    records: Vec<DocumentRecord>,
    positions: HashMap<String, usize>,
}

impl DocumentIndex {
    pub(crate) fn from_records(records: Vec<DocumentRecord>) -> Result<Self, AppError> {
        let mut index = Self::default();
        for record in records {
            index.insert(record).map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Corrupt document list: {}", e))
            })?;
        }
        Ok(index)
    }

    pub(crate) fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub(crate) fn get(&self, file_name: &str) -> Option<&DocumentRecord> {
        self.positions.get(file_name).map(|&i| &self.records[i])
    }

    pub(crate) fn contains(&self, file_name: &str) -> bool {
        self.positions.contains_key(file_name)
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn insert(&mut self, record: DocumentRecord) -> Result<(), AppError> {
        if self.contains(&record.file_name) {
            return Err(conflict(&record.file_name));
        }
        self.positions
            .insert(record.file_name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Undoes the most recent `insert`.
    pub(crate) fn remove_last(&mut self) -> Option<DocumentRecord> {
        let record = self.records.pop()?;
        self.positions.remove(&record.file_name);
        Some(record)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    index: RwLock<DocumentIndex>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<DocumentRecord>, AppError> {
        Ok(self.index.read().await.records().to_vec())
    }

    async fn get(&self, file_name: &str) -> Result<DocumentRecord, AppError> {
        self.index
            .read()
            .await
            .get(file_name)
            .cloned()
            .ok_or_else(|| not_found(file_name))
    }

    async fn add(&self, document: Document) -> Result<DocumentRecord, AppError> {
        let mut index = self.index.write().await;
        if index.contains(&document.file_name) {
            return Err(conflict(&document.file_name));
        }
        let record = DocumentRecord::new(document);
        index.insert(record.clone())?;
        Ok(record)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.index.read().await.len())
    }
}
