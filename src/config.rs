//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to size the island,
//! steer player selection and lay out the terminal view, plus helpers to
//! load it from disk.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

#[cfg(test)]
mod tests;
