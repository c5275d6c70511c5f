pub mod identifier_sequence;

pub use identifier_sequence::IdentifierSequence;
