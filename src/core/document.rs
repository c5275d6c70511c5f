use serde::{Deserialize, Serialize};
use std::fmt;

/// The two mirror document families handled by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Invoices carry payments and a balance
    Invoice,
    /// Quotes are never paid; their balance always equals their total
    Quote,
}

impl DocumentKind {
    /// Column/table prefix used by the InvoicePlane schema
    /// (`ip_invoice_items`, `quote_total`, ...)
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Quote => "quote",
        }
    }

    /// Whether payments can be recorded against this kind of document
    pub fn accepts_payments(&self) -> bool {
        matches!(self, DocumentKind::Invoice)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "invoice" | "invoices" => Ok(DocumentKind::Invoice),
            "quote" | "quotes" => Ok(DocumentKind::Quote),
            _ => Err(format!("Invalid document kind: {}", s)),
        }
    }
}

impl TryFrom<&str> for DocumentKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
