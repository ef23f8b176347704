use super::store::{conflict, not_found, DocumentIndex, DocumentStore};
use crate::models::{Document, DocumentRecord};
use async_trait::async_trait;
use service_core::error::AppError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;

pub const DOCUMENTS_FILE: &str = "documents.json";

/// Document store persisted as a single JSON array under `data_dir`.
///
/// The whole array is rewritten on every add via a temporary file and a
/// rename, so a crash mid-write leaves the previous list intact.
pub struct FileStore {
    path: PathBuf,
    index: RwLock<DocumentIndex>,
}

impl FileStore {
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).await?;

        let path = data_dir.join(DOCUMENTS_FILE);
        let records = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<DocumentRecord>>(&bytes).map_err(|e| {
                AppError::InternalError(anyhow::anyhow!(
                    "Failed to parse {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let index = DocumentIndex::from_records(records)?;
        tracing::info!(
            path = %path.display(),
            documents = index.len(),
            "Opened file-backed document store"
        );

        Ok(Self {
            path,
            index: RwLock::new(index),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, records: &[DocumentRecord]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
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

        if let Err(e) = self.persist(index.records()).await {
            index.remove_last();
            tracing::error!(
                file_name = %record.file_name,
                path = %self.path.display(),
                "Failed to persist document list: {}",
                e
            );
            return Err(e);
        }

        Ok(record)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.index.read().await.len())
    }
}
