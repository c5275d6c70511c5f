pub mod discount;
pub mod document_amount_service;
pub mod recalculation_service;

pub use discount::DocumentDiscount;
pub use document_amount_service::DocumentAmountService;
pub use recalculation_service::RecalculationService;
