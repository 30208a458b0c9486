//=========================================================================
// Graphics
//=========================================================================
//
// The CPU-side frame the window renders into and presents each frame.
//
//=========================================================================

mod color;
mod surface;

pub use color::Rgb;
pub use surface::Surface;
