#![allow(dead_code)]

use document_service::config::{DocumentConfig, StoreBackend};
use document_service::services::DocumentStore;
use document_service::startup::Application;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn DocumentStore>,
    pub storage_path: String,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    server: JoinHandle<std::io::Result<()>>,
}

pub fn test_config(backend: StoreBackend, storage_path: &str) -> DocumentConfig {
    let mut config =
        DocumentConfig::from_vars(HashMap::new()).expect("Failed to load configuration");
    config.common.host = "127.0.0.1".to_string();
    config.common.port = 0; // Random port for testing
    config.store.backend = backend;
    config.store.data_dir = storage_path.to_string();
    config
}

pub fn unique_storage_path() -> String {
    format!("target/test-storage-{}", Uuid::new_v4())
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(StoreBackend::Memory, &unique_storage_path())).await
    }

    pub async fn spawn_file_backed(storage_path: &str) -> Self {
        Self::spawn_with(test_config(StoreBackend::File, storage_path)).await
    }

    pub async fn spawn_with(config: DocumentConfig) -> Self {
        let storage_path = config.store.data_dir.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(app.run_with_shutdown(async move {
            rx.await.ok();
        }));

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            port,
            store,
            storage_path,
            client: reqwest::Client::new(),
            shutdown: Some(tx),
            server,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_document(&self, file_name: &str, content: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/documents"))
            .json(&json!({ "fileName": file_name, "content": content }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_raw(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(self.url("/api/documents"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_document(&self, file_name: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!("/api/document/{}", file_name)))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn list_documents(&self) -> Vec<serde_json::Value> {
        self.client
            .get(self.url("/api/documents"))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    /// Stops the server and waits for it to finish draining.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.server
            .await
            .expect("Server task panicked")
            .expect("Server returned an error");
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.storage_path).await;
    }
}
