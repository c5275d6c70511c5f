pub mod document_tax_rate;

pub use document_tax_rate::DocumentTaxRate;
