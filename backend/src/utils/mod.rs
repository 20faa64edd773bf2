pub mod core;
pub mod loc;
