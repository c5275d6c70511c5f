pub mod amount_repository;
pub mod payment_repository;

pub use amount_repository::{AmountRepository, MySqlAmountRepository};
pub use payment_repository::{MySqlPaymentRepository, PaymentRepository};
