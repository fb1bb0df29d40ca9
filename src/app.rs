//! Application module: the presentation-side model driven by the runtime.
//!
//! `App` owns the island controller and the latest track record, and turns
//! controller transitions into size requests for the host.

mod model;

pub use model::*;
