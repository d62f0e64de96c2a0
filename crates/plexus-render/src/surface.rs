//! The drawing target abstraction

use plexus_core::{Color, SurfaceSize, Vec2};

/// A 2D drawing target with a fixed pixel size.
///
/// Implemented by anything the host can paint into: a software raster, a
/// window buffer, or a display list forwarded to a browser canvas.
pub trait DrawSurface {
    fn size(&self) -> SurfaceSize;

    /// Change the pixel size. Contents after a resize are unspecified.
    fn resize(&mut self, size: SurfaceSize);

    /// Replace every pixel with `color`
    fn clear(&mut self, color: Color);

    /// Blend `color` at `alpha` over the whole surface, leaving fading trails
    fn fade(&mut self, color: Color, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn resize(&mut self, size: SurfaceSize) {
        (**self).resize(size)
    }

    fn clear(&mut self, color: Color) {
        (**self).clear(color)
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        (**self).fade(color, alpha)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        (**self).fill_circle(center, radius, color)
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        (**self).stroke_line(from, to, width, color)
    }
}
