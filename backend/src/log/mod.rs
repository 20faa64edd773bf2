//! Leveled logging on top of `tracing`.
//!
//! Every line starts with a one-letter level tag, which keeps messages short
//! but easy to skim:
//!
//! ```text
//! 2019/12/30 16:14:10 I: Hello      (dev and test)
//! I: Hello                          (prod)
//! ```

pub mod core;
pub mod error;
