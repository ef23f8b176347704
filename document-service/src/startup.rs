//! Application startup and lifecycle management.

use crate::config::{DocumentConfig, StoreBackend, StoreConfig};
use crate::handlers;
use crate::services::{init_metrics, DocumentStore, FileStore, InMemoryStore};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: DocumentConfig,
    pub store: Arc<dyn DocumentStore>,
}

/// Opens the backend selected by `config.backend`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, AppError> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Arc::new(InMemoryStore::new())
        }
        StoreBackend::File => Arc::new(FileStore::open(&config.data_dir).await.map_err(|e| {
            tracing::error!(
                "Failed to open document store at {}: {}",
                config.data_dir,
                e
            );
            e
        })?),
    };
    Ok(store)
}

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.store.max_body_bytes;

    Router::new()
        .route(
            "/api/documents",
            get(handlers::list_documents).post(handlers::add_document),
        )
        .route("/api/document/:file_name", get(handlers::get_document))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    addr: SocketAddr,
    listener: TcpListener,
    router: Router,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// The listener is bound here, so port 0 yields a random free port that
    /// can be read back with [`Application::port`].
    pub async fn build(config: DocumentConfig) -> Result<Self, AppError> {
        let store = open_store(&config.store).await?;
        Self::build_with_store(config, store).await
    }

    pub async fn build_with_store(
        config: DocumentConfig,
        store: Arc<dyn DocumentStore>,
    ) -> Result<Self, AppError> {
        init_metrics();

        let state = AppState {
            config: config.clone(),
            store,
        };
        let router = build_router(state.clone());

        let bind_addr = config.common.address();
        let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", bind_addr, e);
            AppError::from(e)
        })?;
        let addr = listener.local_addr()?;

        tracing::info!("Listening on {}", addr);

        Ok(Self {
            addr,
            listener,
            router,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.state.store.clone()
    }

    /// Serve until the process is killed or the listener fails.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
