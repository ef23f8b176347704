pub mod documents;
pub mod health;

pub use documents::{add_document, get_document, list_documents};
pub use health::{health_check, metrics_endpoint};
