use sqlx::MySqlPool;
use std::sync::Arc;

use crate::modules::amounts::repositories::{
    AmountRepository, MySqlAmountRepository, MySqlPaymentRepository, PaymentRepository,
};
use crate::modules::documents::repositories::{DocumentRepository, MySqlDocumentRepository};
use crate::modules::items::repositories::{ItemRepository, MySqlItemRepository};
use crate::modules::numbering::repositories::{MySqlSequenceRepository, SequenceRepository};
use crate::modules::taxes::repositories::{MySqlTaxRateRepository, TaxRateRepository};

/// Every collaborator the calculation services read from or write to
#[derive(Clone)]
pub struct RepositorySet {
    pub documents: Arc<dyn DocumentRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub amounts: Arc<dyn AmountRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub tax_rates: Arc<dyn TaxRateRepository>,
    pub sequences: Arc<dyn SequenceRepository>,
}

impl RepositorySet {
    /// Repositories over the InvoicePlane MySQL schema
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            documents: Arc::new(MySqlDocumentRepository::new(pool.clone())),
            items: Arc::new(MySqlItemRepository::new(pool.clone())),
            amounts: Arc::new(MySqlAmountRepository::new(pool.clone())),
            payments: Arc::new(MySqlPaymentRepository::new(pool.clone())),
            tax_rates: Arc::new(MySqlTaxRateRepository::new(pool.clone())),
            sequences: Arc::new(MySqlSequenceRepository::new(pool)),
        }
    }

    /// One store implementing every repository
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: DocumentRepository
            + ItemRepository
            + AmountRepository
            + PaymentRepository
            + TaxRateRepository
            + SequenceRepository
            + 'static,
    {
        Self {
            documents: store.clone(),
            items: store.clone(),
            amounts: store.clone(),
            payments: store.clone(),
            tax_rates: store.clone(),
            sequences: store,
        }
    }
}
