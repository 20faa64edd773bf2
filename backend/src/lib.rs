//! Small building blocks for a web application backend: offset/line lookup
//! for parser diagnostics, pagination, JSON files, logging, secrets and
//! database settings.

pub mod config;
pub mod db;
pub mod environment;
pub mod file;
pub mod httpserver;
pub mod log;
pub mod nix;
pub mod secrets;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use httpserver::paginator::{Paginator, paginate};
pub use utils::loc::{Position, locate, locate_byte};
