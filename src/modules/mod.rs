pub mod amounts;
pub mod context;
pub mod documents;
pub mod items;
pub mod numbering;
pub mod store;
pub mod taxes;
