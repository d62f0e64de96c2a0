//! Particle state and the per-background particle store

use crate::config::{FieldConfig, MIN_AREA_PER_PARTICLE};
use crate::rand::ParticleRng;
use plexus_core::{SurfaceSize, Vec2};

/// One simulated point
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Visual size in pixels, fixed at creation
    pub radius: f32,
    /// Opacity in [0, 1], rendering only
    pub opacity: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, opacity: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            opacity,
        }
    }

    /// Spawn a particle uniformly inside `bounds` with a random heading
    pub fn random(bounds: SurfaceSize, config: &FieldConfig, rng: &mut ParticleRng) -> Self {
        let position = Vec2::new(
            rng.range(0.0, bounds.width as f32),
            rng.range(0.0, bounds.height as f32),
        );
        let speed = rng.range(config.speed_min, config.speed_max);
        let velocity = rng.random_direction() * speed;
        Self {
            position,
            velocity,
            radius: rng.range(config.radius_min, config.radius_max),
            opacity: rng.range(config.opacity_min, config.opacity_max),
        }
    }
}

/// The batch of particles living on one surface.
///
/// Always regenerated as a whole on resize; never partially reused.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    bounds: SurfaceSize,
}

impl ParticleSet {
    /// An empty set with no bounds (the blank-surface state)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from explicit particles, mainly for hosts that restore or
    /// script a layout
    pub fn from_particles(bounds: SurfaceSize, particles: Vec<Particle>) -> Self {
        Self { particles, bounds }
    }

    /// Number of particles a surface of `bounds` receives: `floor(area / K)`,
    /// capped by `max_particles` when non-zero. K is held to the same floor
    /// as [`FieldConfig::sanitized`], and a non-finite K counts as the default.
    pub fn particle_count_for(bounds: SurfaceSize, config: &FieldConfig) -> usize {
        let k = if config.area_per_particle.is_finite() {
            config.area_per_particle
        } else {
            FieldConfig::default().area_per_particle
        };
        let area_per_particle = k.max(MIN_AREA_PER_PARTICLE) as f64;
        let count = (bounds.area() as f64 / area_per_particle).floor() as usize;
        if config.max_particles > 0 {
            count.min(config.max_particles)
        } else {
            count
        }
    }

    /// Fresh randomized set sized by area and density. Zero-area surfaces
    /// produce an empty set.
    pub fn initialize(bounds: SurfaceSize, config: &FieldConfig, rng: &mut ParticleRng) -> Self {
        let count = Self::particle_count_for(bounds, config);
        let particles = (0..count)
            .map(|_| Particle::random(bounds, config, rng))
            .collect();
        tracing::debug!("seeded {count} particle(s) on {bounds}");
        Self { particles, bounds }
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}
