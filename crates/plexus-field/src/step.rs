//! Per-tick integration with boundary handling. O(n), no pairwise work.

use crate::config::BoundaryMode;
use crate::particle::ParticleSet;

/// Advance every particle one tick: `position += velocity`, then apply the
/// boundary policy against the set's bounds.
///
/// With [`BoundaryMode::Reflect`] the check happens after the move, so a
/// particle can be drawn up to one velocity step outside the surface before
/// the flipped velocity brings it back.
pub fn advance(set: &mut ParticleSet, mode: BoundaryMode) {
    let bounds = set.bounds();
    let (width, height) = (bounds.width as f32, bounds.height as f32);

    for p in set.as_mut_slice() {
        p.position += p.velocity;

        match mode {
            BoundaryMode::Reflect => {
                reflect_axis(p.position.x, &mut p.velocity.x, width);
                reflect_axis(p.position.y, &mut p.velocity.y, height);
            }
            BoundaryMode::Clamp => {
                clamp_axis(&mut p.position.x, &mut p.velocity.x, width);
                clamp_axis(&mut p.position.y, &mut p.velocity.y, height);
            }
        }
    }
}

/// Point the velocity back inside once the coordinate has crossed a bound.
/// Sign-based, so a particle still outside on the next tick keeps heading in.
fn reflect_axis(position: f32, velocity: &mut f32, max: f32) {
    if position < 0.0 {
        *velocity = velocity.abs();
    } else if position > max {
        *velocity = -velocity.abs();
    }
}

fn clamp_axis(position: &mut f32, velocity: &mut f32, max: f32) {
    if *position < 0.0 {
        *position = 0.0;
        *velocity = velocity.abs();
    } else if *position > max {
        *position = max;
        *velocity = -velocity.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::particle::Particle;
    use crate::rand::ParticleRng;
    use plexus_core::{SurfaceSize, Vec2};

    fn single(position: Vec2, velocity: Vec2) -> ParticleSet {
        ParticleSet::from_particles(
            SurfaceSize::new(800, 600),
            vec![Particle::new(position, velocity, 2.0, 1.0)],
        )
    }

    #[test]
    fn moves_by_velocity() {
        let mut set = single(Vec2::new(10.0, 20.0), Vec2::new(1.5, -0.5));
        advance(&mut set, BoundaryMode::Reflect);
        assert_eq!(set.as_slice()[0].position, Vec2::new(11.5, 19.5));
        assert_eq!(set.as_slice()[0].velocity, Vec2::new(1.5, -0.5));
    }

    #[test]
    fn reactive_reflection_at_right_edge() {
        let mut set = single(Vec2::new(799.5, 300.0), Vec2::new(2.0, 0.0));

        advance(&mut set, BoundaryMode::Reflect);
        let p = &set.as_slice()[0];
        assert!((p.position.x - 801.5).abs() < 1e-4);
        assert_eq!(p.velocity.x, -2.0);

        advance(&mut set, BoundaryMode::Reflect);
        let p = &set.as_slice()[0];
        assert!((p.position.x - 799.5).abs() < 1e-4);
        assert_eq!(p.velocity.x, -2.0);
    }

    #[test]
    fn reactive_reflection_at_top_edge() {
        let mut set = single(Vec2::new(100.0, 0.2), Vec2::new(0.0, -0.5));
        advance(&mut set, BoundaryMode::Reflect);
        assert_eq!(set.as_slice()[0].velocity.y, 0.5);
    }

    #[test]
    fn clamp_keeps_particle_inside_before_draw() {
        let mut set = single(Vec2::new(799.5, 300.0), Vec2::new(2.0, 0.0));
        advance(&mut set, BoundaryMode::Clamp);
        let p = &set.as_slice()[0];
        assert_eq!(p.position.x, 800.0);
        assert_eq!(p.velocity.x, -2.0);
    }

    #[test]
    fn positions_stay_within_one_step_over_many_ticks() {
        let config = FieldConfig {
            speed_min: 3.0,
            speed_max: 7.0,
            area_per_particle: 400.0,
            ..FieldConfig::default()
        };
        let bounds = SurfaceSize::new(320, 200);
        let eps = config.speed_max + 1e-3;

        for mode in [BoundaryMode::Reflect, BoundaryMode::Clamp] {
            let mut rng = ParticleRng::new(2024);
            let mut set = ParticleSet::initialize(bounds, &config, &mut rng);
            assert_eq!(set.len(), 160);
            for _ in 0..5_000 {
                advance(&mut set, mode);
                for p in &set {
                    assert!(p.position.x >= -eps && p.position.x <= 320.0 + eps);
                    assert!(p.position.y >= -eps && p.position.y <= 200.0 + eps);
                }
            }
        }
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let mut set = ParticleSet::empty();
        advance(&mut set, BoundaryMode::Reflect);
        assert!(set.is_empty());
    }
}
