pub mod error;
pub mod exists;
pub mod json;
pub mod lines;
