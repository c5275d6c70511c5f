// Document numbering from group templates

pub mod models;
pub mod repositories;
pub mod services;

pub use models::IdentifierSequence;
pub use repositories::{MySqlSequenceRepository, SequenceRepository};
pub use services::IdentifierGenerator;
