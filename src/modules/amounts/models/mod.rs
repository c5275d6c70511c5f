pub mod document_amount;

pub use document_amount::DocumentAmount;
