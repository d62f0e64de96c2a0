//! Software RGBA raster surface with PNG export

use crate::surface::DrawSurface;
use image::{Rgba, RgbaImage};
use plexus_core::{Color, PlexusError, Result, SurfaceSize, Vec2};
use std::path::Path;

/// CPU-side pixel buffer. Shapes are drawn with one pixel of edge coverage
/// falloff and blended source-over.
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            image: RgbaImage::new(size.width, size.height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA at pixel `(x, y)`, or `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.image.width() && y < self.image.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Write the current frame as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if self.image.width() == 0 || self.image.height() == 0 {
            return Err(PlexusError::Surface(format!(
                "cannot save empty {}x{} frame to {}",
                self.image.width(),
                self.image.height(),
                path.display()
            )));
        }
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| PlexusError::ImageError(format!("{}: {e}", path.display())))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        *dst = blend_over(*dst, color, alpha);
    }

    /// Visit every pixel of the clipped box `[min, max]`, passing its center
    fn for_each_in_box(
        &mut self,
        min: Vec2,
        max: Vec2,
        mut f: impl FnMut(&mut Self, u32, u32, Vec2),
    ) {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w);
        let y1 = max.y.ceil().min(h);
        if !(x0 < x1 && y0 < y1) {
            return;
        }
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                f(self, x, y, center);
            }
        }
    }
}

impl DrawSurface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.image.width(), self.image.height())
    }

    fn resize(&mut self, size: SurfaceSize) {
        if size != self.size() {
            self.image = RgbaImage::new(size.width, size.height);
        }
    }

    fn clear(&mut self, color: Color) {
        let px = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        let alpha = (color.a * alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        for p in self.image.pixels_mut() {
            *p = blend_over(*p, color, alpha);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0) || !center.x.is_finite() || !center.y.is_finite() {
            return;
        }
        let reach = radius + 0.5;
        let extent = Vec2::new(reach, reach);
        self.for_each_in_box(center - extent, center + extent, |s, x, y, p| {
            let coverage = (reach - p.distance(center)).clamp(0.0, 1.0);
            s.blend(x, y, color, coverage);
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if !(width > 0.0) {
            return;
        }
        let reach = width * 0.5 + 0.5;
        let min = Vec2::new(from.x.min(to.x) - reach, from.y.min(to.y) - reach);
        let max = Vec2::new(from.x.max(to.x) + reach, from.y.max(to.y) + reach);
        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return;
        }
        self.for_each_in_box(min, max, |s, x, y, p| {
            let coverage = (reach - distance_to_segment(p, from, to)).clamp(0.0, 1.0);
            s.blend(x, y, color, coverage);
        });
    }
}

/// Source-over compositing of `color` at `alpha` onto an 8-bit pixel
fn blend_over(dst: Rgba<u8>, color: Color, alpha: f32) -> Rgba<u8> {
    let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);
    let out_a = alpha + da * (1.0 - alpha);
    let mix = |src: f32, dst: f32| src * alpha + dst * (1.0 - alpha);
    Rgba(
        Color::new(mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_a).to_rgba8(),
    )
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut surface = PixelSurface::new(SurfaceSize::new(4, 3));
        surface.clear(Color::from_hex(0x0f172a));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(surface.pixel(x, y), Some([0x0f, 0x17, 0x2a, 0xff]));
            }
        }
        assert_eq!(surface.pixel(4, 0), None);
    }

    #[test]
    fn circle_covers_center_not_corners() {
        let mut surface = PixelSurface::new(SurfaceSize::new(21, 21));
        surface.clear(Color::BLACK);
        surface.fill_circle(Vec2::new(10.5, 10.5), 4.0, Color::WHITE);
        assert_eq!(surface.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(20, 20), Some([0, 0, 0, 255]));
    }

    #[test]
    fn shapes_outside_are_clipped() {
        let mut surface = PixelSurface::new(SurfaceSize::new(8, 8));
        surface.clear(Color::BLACK);
        surface.fill_circle(Vec2::new(-50.0, -50.0), 3.0, Color::WHITE);
        surface.stroke_line(Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0), 2.0, Color::WHITE);
        assert!(surface.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn line_alpha_blends_over_background() {
        let mut surface = PixelSurface::new(SurfaceSize::new(10, 5));
        surface.clear(Color::BLACK);
        surface.stroke_line(
            Vec2::new(0.0, 2.5),
            Vec2::new(10.0, 2.5),
            1.0,
            Color::WHITE.with_alpha(0.5),
        );
        let [r, g, b, a] = surface.pixel(5, 2).unwrap();
        assert_eq!((r, g, b, a), (128, 128, 128, 255));
        assert_eq!(surface.pixel(5, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn fade_moves_toward_color() {
        let mut surface = PixelSurface::new(SurfaceSize::new(2, 2));
        surface.clear(Color::WHITE);
        surface.fade(Color::BLACK, 0.5);
        assert_eq!(surface.pixel(0, 0), Some([128, 128, 128, 255]));
    }

    #[test]
    fn resize_and_zero_size() {
        let mut surface = PixelSurface::new(SurfaceSize::new(0, 0));
        surface.clear(Color::WHITE);
        surface.fill_circle(Vec2::new(1.0, 1.0), 2.0, Color::WHITE);
        assert!(surface.save_png("unused.png").is_err());

        surface.resize(SurfaceSize::new(16, 9));
        assert_eq!(surface.size(), SurfaceSize::new(16, 9));
    }

    #[test]
    fn saves_png() {
        let mut surface = PixelSurface::new(SurfaceSize::new(8, 8));
        surface.clear(Color::from_hex(0x38bdf8));
        let path = std::env::temp_dir().join(format!("plexus-raster-{}.png", std::process::id()));
        surface.save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.get_pixel(3, 3).0, [0x38, 0xbd, 0xf8, 0xff]);
        let _ = std::fs::remove_file(path);
    }
}
