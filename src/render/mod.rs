//! Drawing: the host surface contract and a software raster fallback.

pub mod raster;
pub mod surface;

pub use raster::RasterSurface;
pub use surface::{FillStyle, Gradient, Surface, TextAlign, TextBaseline};
