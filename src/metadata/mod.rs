pub mod compare;
pub mod extract;

pub use compare::compare;
pub use extract::MetadataExtractor;
