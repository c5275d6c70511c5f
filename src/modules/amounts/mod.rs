// Document amounts: aggregation of item amounts, document discount,
// document tax rates and payments

pub mod models;
pub mod repositories;
pub mod services;

pub use models::DocumentAmount;
pub use repositories::{
    AmountRepository, MySqlAmountRepository, MySqlPaymentRepository, PaymentRepository,
};
pub use services::{DocumentAmountService, DocumentDiscount, RecalculationService};
