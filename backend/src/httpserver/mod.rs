pub mod error;
pub mod helpers;
pub mod paginator;
pub mod templates;
