//! MySQL connection settings, connection pools and test database setup.

pub mod codes;
pub mod connect;
pub mod core;
pub mod error;
pub mod schema;
