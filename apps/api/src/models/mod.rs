pub mod artifact;
pub mod document;
