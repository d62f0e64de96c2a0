//! Plexus Render - drawing surfaces and the frame renderer
//!
//! - `DrawSurface` - the 2D target trait any host context implements
//! - `PixelSurface` - software raster backed by an `image::RgbaImage`, with PNG export
//! - `DisplayList` - records draw calls for replay on a foreign context
//! - `render` - paints particles and proximity edges for one frame

pub mod display_list;
pub mod raster;
pub mod renderer;
pub mod surface;

pub use display_list::{DisplayList, DrawCommand};
pub use raster::PixelSurface;
pub use renderer::{render, render_blank, FrameStats, RenderStyle};
pub use surface::DrawSurface;
