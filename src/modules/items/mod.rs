// Line items and their per-item amounts

pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AmountField, GlobalDiscount, ItemAmountTotals, LineItem, LineItemAmount};
pub use repositories::{ItemRepository, MySqlItemRepository};
pub use services::{ItemAmountCalculator, ItemAmountService};
