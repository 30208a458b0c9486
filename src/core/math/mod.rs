//=========================================================================
// Math
//=========================================================================

mod vector;

pub use vector::{Dimension, Vec2};
