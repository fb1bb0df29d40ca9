//! Island view state: the compact/expanded controller and the geometry that
//! maps each state to a window size.

mod controller;
mod geometry;

pub use controller::*;
pub use geometry::*;
