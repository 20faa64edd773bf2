//! Long-lived web server secrets persisted between runs, so restarting the
//! server does not invalidate sessions, cookies, CSRF tokens or password
//! reset links.

pub mod core;
pub mod error;
