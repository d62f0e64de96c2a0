//! Paints one frame of a particle field onto a surface

use crate::surface::DrawSurface;
use plexus_core::Color;
use plexus_field::{Edge, FieldConfig, Layering, ParticleSet};

/// The visual subset of a [`FieldConfig`]
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    pub trail_fade: f32,
    pub particle_color: Color,
    pub line_color: Color,
    pub line_width: f32,
    pub line_opacity: f32,
    pub layering: Layering,
}

impl RenderStyle {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            background: config.background,
            trail_fade: config.trail_fade,
            particle_color: config.particle_color,
            line_color: config.line_color,
            line_width: config.line_width,
            line_opacity: config.line_opacity,
            layering: config.layering,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

/// What was drawn in one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub edges: usize,
}

/// Draw one frame: clear (or fade), then edges and particles in the style's
/// layering order. Neither the particles nor the edges are modified.
pub fn render<S, I>(
    surface: &mut S,
    particles: &ParticleSet,
    edges: I,
    style: &RenderStyle,
) -> FrameStats
where
    S: DrawSurface + ?Sized,
    I: IntoIterator<Item = Edge>,
{
    if style.trail_fade > 0.0 {
        surface.fade(style.background, style.trail_fade);
    } else {
        surface.clear(style.background);
    }

    let mut stats = FrameStats::default();
    match style.layering {
        Layering::EdgesBelow => {
            stats.edges = draw_edges(surface, particles, edges, style);
            stats.particles = draw_particles(surface, particles, style);
        }
        Layering::EdgesAbove => {
            stats.particles = draw_particles(surface, particles, style);
            stats.edges = draw_edges(surface, particles, edges, style);
        }
    }
    stats
}

/// Clear the surface without drawing anything (the degraded frame)
pub fn render_blank<S: DrawSurface + ?Sized>(surface: &mut S, style: &RenderStyle) {
    surface.clear(style.background);
}

fn draw_particles<S: DrawSurface + ?Sized>(
    surface: &mut S,
    particles: &ParticleSet,
    style: &RenderStyle,
) -> usize {
    for p in particles {
        let color = style
            .particle_color
            .with_alpha(style.particle_color.a * p.opacity);
        surface.fill_circle(p.position, p.radius, color);
    }
    particles.len()
}

fn draw_edges<S, I>(
    surface: &mut S,
    particles: &ParticleSet,
    edges: I,
    style: &RenderStyle,
) -> usize
where
    S: DrawSurface + ?Sized,
    I: IntoIterator<Item = Edge>,
{
    let mut drawn = 0;
    for edge in edges {
        let (Some(a), Some(b)) = (particles.get(edge.a), particles.get(edge.b)) else {
            continue;
        };
        let alpha = style.line_color.a * style.line_opacity * edge.intensity.clamp(0.0, 1.0);
        if style.line_width > 0.0 && alpha > 0.0 {
            surface.stroke_line(
                a.position,
                b.position,
                style.line_width,
                style.line_color.with_alpha(alpha),
            );
        }
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::{DisplayList, DrawCommand};
    use plexus_core::{SurfaceSize, Vec2};
    use plexus_field::{build_edges, Particle};

    fn pair() -> ParticleSet {
        ParticleSet::from_particles(
            SurfaceSize::new(100, 100),
            vec![
                Particle::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 2.0, 0.5),
                Particle::new(Vec2::new(5.0, 0.0), Vec2::ZERO, 3.0, 1.0),
            ],
        )
    }

    #[test]
    fn edges_below_draws_lines_first() {
        let set = pair();
        let mut list = DisplayList::new(set.bounds());
        let style = RenderStyle::default();
        let stats = render(&mut list, &set, build_edges(&set, 10.0), &style);

        assert_eq!(stats, FrameStats { particles: 2, edges: 1 });
        let cmds = list.commands();
        assert!(matches!(cmds[0], DrawCommand::Clear(_)));
        assert!(matches!(cmds[1], DrawCommand::Line { .. }));
        assert!(matches!(cmds[2], DrawCommand::Circle { .. }));
        assert!(matches!(cmds[3], DrawCommand::Circle { .. }));
    }

    #[test]
    fn edges_above_draws_particles_first() {
        let set = pair();
        let mut list = DisplayList::new(set.bounds());
        let style = RenderStyle {
            layering: Layering::EdgesAbove,
            ..RenderStyle::default()
        };
        render(&mut list, &set, build_edges(&set, 10.0), &style);
        assert!(matches!(list.commands().last(), Some(DrawCommand::Line { .. })));
    }

    #[test]
    fn alpha_follows_intensity_and_opacity() {
        let set = pair();
        let mut list = DisplayList::new(set.bounds());
        let style = RenderStyle {
            particle_color: Color::WHITE,
            line_color: Color::WHITE,
            line_opacity: 1.0,
            ..RenderStyle::default()
        };
        render(&mut list, &set, build_edges(&set, 10.0), &style);

        for cmd in list.commands() {
            match cmd {
                DrawCommand::Line { color, .. } => assert!((color.a - 0.5).abs() < 1e-6),
                DrawCommand::Circle { radius, color, .. } if *radius == 2.0 => {
                    assert!((color.a - 0.5).abs() < 1e-6)
                }
                DrawCommand::Circle { color, .. } => assert!((color.a - 1.0).abs() < 1e-6),
                _ => {}
            }
        }
    }

    #[test]
    fn trail_fade_replaces_clear() {
        let set = pair();
        let mut list = DisplayList::new(set.bounds());
        let style = RenderStyle {
            trail_fade: 0.2,
            ..RenderStyle::default()
        };
        render(&mut list, &set, std::iter::empty(), &style);
        assert!(matches!(list.commands()[0], DrawCommand::Fade { alpha, .. } if alpha == 0.2));
        assert_eq!(list.line_count(), 0);
    }

    #[test]
    fn render_leaves_inputs_untouched() {
        let set = pair();
        let before = set.clone();
        let edges: Vec<Edge> = build_edges(&set, 10.0).collect();
        let mut list = DisplayList::new(set.bounds());
        render(&mut list, &set, edges.iter().copied(), &RenderStyle::default());
        assert_eq!(set, before);
        assert_eq!(edges, build_edges(&set, 10.0).collect::<Vec<_>>());
    }

    #[test]
    fn stale_edge_indices_are_skipped() {
        let set = pair();
        let mut list = DisplayList::new(set.bounds());
        let bogus = Edge {
            a: 0,
            b: 9,
            distance: 1.0,
            intensity: 0.9,
        };
        let stats = render(&mut list, &set, [bogus], &RenderStyle::default());
        assert_eq!(stats.edges, 0);
        assert_eq!(list.line_count(), 0);
    }
}
