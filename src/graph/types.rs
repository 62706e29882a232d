//! Core types for graph representation.

use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;

/// An undirected edge between two vertices.
///
/// Edges listed by [`Graph::edges`](super::Graph::edges) always have `u < v`.
/// The MST stepper records edges as `(tree vertex, new vertex)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(u: usize, v: usize, weight: i64) -> Self {
        Self { u, v, weight }
    }

    /// Check if this edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: usize, b: usize) -> bool {
        (self.u == a && self.v == b) || (self.u == b && self.v == a)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.u, self.v, self.weight)
    }
}

/// Memoized query results. Each slot is written at most once until the
/// owning graph is mutated.
#[derive(Debug, Clone, Default)]
pub(crate) struct QueryCache {
    pub connected: OnceCell<bool>,
    pub cyclic: OnceCell<bool>,
    pub bipartite: OnceCell<bool>,
    /// `None` records that no path exists.
    pub paths: RefCell<HashMap<(usize, usize), Option<Vec<usize>>>>,
}

impl QueryCache {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
