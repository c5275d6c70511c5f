pub mod item_amount_calculator;
pub mod item_amount_service;

pub use item_amount_calculator::ItemAmountCalculator;
pub use item_amount_service::ItemAmountService;
