//! Track module: the canonical `TrackRecord` and helpers that turn it into
//! display strings.

mod display;
mod model;

pub use display::*;
pub use model::*;
