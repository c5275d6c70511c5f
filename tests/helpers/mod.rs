// Shared fixtures for the service tests.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//
//   let store = helpers::seeded_store(DocumentKind::Invoice, 1).await;
//   let service = helpers::recalculation_service(&store, CalculationMode::Legacy);

#![allow(dead_code)]

pub mod test_data;

pub use test_data::*;
