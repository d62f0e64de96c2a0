//! Plexus Field - the particle field simulation
//!
//! Provides the CPU-side pieces of an animated particle background:
//! - `FieldConfig` / `FieldPreset` - recognized options with defaults, TOML parsing
//! - `ParticleSet` - the particle store, sized from surface area and density
//! - `advance` - one O(n) simulation tick with boundary reflection
//! - `build_edges` - the per-frame proximity graph as a lazy iterator

pub mod config;
pub mod edges;
pub mod particle;
pub mod rand;
pub mod step;

pub use config::{BoundaryMode, FieldConfig, FieldPreset, Layering, MIN_AREA_PER_PARTICLE};
pub use edges::{build_edges, Edge, Edges};
pub use particle::{Particle, ParticleSet};
pub use rand::ParticleRng;
pub use step::advance;
