//! Start-vertex selection for Prim's algorithm.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses the vertex a spanning tree grows from.
pub trait StartVertex: std::fmt::Debug {
    /// Pick a vertex in `0..vertex_count`. Only called with `vertex_count > 0`.
    fn choose(&mut self, vertex_count: usize) -> usize;
}

impl<S: StartVertex + ?Sized> StartVertex for Box<S> {
    fn choose(&mut self, vertex_count: usize) -> usize {
        (**self).choose(vertex_count)
    }
}

/// Always start from vertex 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstVertex;

impl StartVertex for FirstVertex {
    fn choose(&mut self, _vertex_count: usize) -> usize {
        0
    }
}

/// Start from a uniformly random vertex drawn from the thread RNG.
#[cfg(feature = "thread-rng")]
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomVertex;

#[cfg(feature = "thread-rng")]
impl StartVertex for RandomVertex {
    fn choose(&mut self, vertex_count: usize) -> usize {
        rand::rng().random_range(0..vertex_count)
    }
}

/// Start from a random vertex drawn from a seeded generator, so a run can be
/// reproduced.
#[derive(Debug, Clone)]
pub struct SeededVertex {
    rng: StdRng,
}

impl SeededVertex {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl StartVertex for SeededVertex {
    fn choose(&mut self, vertex_count: usize) -> usize {
        self.rng.random_range(0..vertex_count)
    }
}
