pub mod document;
pub mod error;
pub mod money;
pub mod settings;

pub use document::DocumentKind;
pub use error::{AppError, Result};
pub use settings::{CalculationMode, SettingsProvider};
