//! Utilities for Linux and other Unix-like systems.

pub mod error;
pub mod users;
