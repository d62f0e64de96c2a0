//! A surface that records draw calls instead of rasterizing them

use crate::surface::DrawSurface;
use plexus_core::{Color, SurfaceSize, Vec2};

/// One recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Fade { color: Color, alpha: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
}

/// Records draw calls for the current frame so a host can replay them onto
/// its own context (e.g. a canvas across an FFI boundary).
///
/// `clear` starts a new frame and drops the previous commands.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl DisplayList {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            commands: Vec::new(),
            frames: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of frames started (clear or fade calls)
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl DrawSurface for DisplayList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.clear();
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Fade { color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}
