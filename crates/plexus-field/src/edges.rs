//! Proximity graph: links between particle pairs closer than a threshold
//!
//! Every unordered pair is tested once per call, so the cost is O(n²) in the
//! particle count. The density setting keeps n in the tens to low hundreds.
//! Nothing is cached between calls; the iterator can be cloned and replayed
//! as long as the particle set is not mutated.

use crate::particle::{Particle, ParticleSet};

/// An ephemeral link between particles `a < b`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    /// `1 - distance / threshold`, in (0, 1]
    pub intensity: f32,
}

/// Lazy iterator over the edges of one particle set
#[derive(Clone, Debug)]
pub struct Edges<'a> {
    particles: &'a [Particle],
    threshold: f32,
    threshold_sq: f32,
    i: usize,
    j: usize,
}

/// Build the proximity graph for `set`. A non-positive or non-finite
/// threshold yields no edges.
pub fn build_edges(set: &ParticleSet, threshold: f32) -> Edges<'_> {
    let threshold = if threshold.is_finite() { threshold.max(0.0) } else { 0.0 };
    Edges {
        particles: set.as_slice(),
        threshold,
        threshold_sq: threshold * threshold,
        i: 0,
        j: 1,
    }
}

impl<'a> Iterator for Edges<'a> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.threshold <= 0.0 {
            return None;
        }
        let n = self.particles.len();
        while self.i + 1 < n {
            if self.j >= n {
                self.i += 1;
                self.j = self.i + 1;
                continue;
            }
            let (i, j) = (self.i, self.j);
            self.j += 1;

            let d2 = self.particles[i]
                .position
                .distance_squared(self.particles[j].position);
            if d2 < self.threshold_sq {
                let distance = d2.sqrt();
                // sqrt can round up to the threshold for pairs right at the edge
                if distance >= self.threshold {
                    continue;
                }
                return Some(Edge {
                    a: i,
                    b: j,
                    distance,
                    intensity: 1.0 - distance / self.threshold,
                });
            }
        }
        None
    }
}
