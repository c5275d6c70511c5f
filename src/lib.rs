//! InvoicePlane calculation core
//!
//! Line item amounts, document amounts (invoices and quotes, in legacy or
//! proportional discount mode), document tax rates and document numbering.
//! Storage is reached only through the repository traits. MySQL adapters
//! over the InvoicePlane schema and an in-memory store are provided.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{AppError, CalculationMode, DocumentKind, Result, SettingsProvider};
pub use modules::amounts;
pub use modules::context::RepositorySet;
pub use modules::documents;
pub use modules::items;
pub use modules::numbering;
pub use modules::store::InMemoryStore;
pub use modules::taxes;
