pub mod file_store;
pub mod metrics;
pub mod store;

pub use file_store::FileStore;
pub use metrics::{get_metrics, init_metrics};
pub use store::{DocumentStore, InMemoryStore};
