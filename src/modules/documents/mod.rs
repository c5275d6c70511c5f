pub mod models;
pub mod repositories;

pub use models::Document;
pub use repositories::{DocumentRepository, MySqlDocumentRepository};
