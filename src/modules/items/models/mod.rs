pub mod global_discount;
pub mod line_item;
pub mod line_item_amount;

pub use global_discount::GlobalDiscount;
pub use line_item::LineItem;
pub use line_item_amount::{AmountField, ItemAmountTotals, LineItemAmount};
