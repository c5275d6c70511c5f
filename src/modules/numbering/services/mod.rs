pub mod identifier_generator;

pub use identifier_generator::IdentifierGenerator;
