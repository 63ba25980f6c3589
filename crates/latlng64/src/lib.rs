mod band;
mod coord;
mod error;

pub use crate::coord::*;
pub use crate::error::*;
