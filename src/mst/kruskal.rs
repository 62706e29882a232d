//! Minimum spanning tree via Kruskal's algorithm.
//!
//! Uses union-find with path compression and union by rank.

use crate::graph::{Edge, Graph};

/// Union-Find data structure with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]); // Path compression
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) -> bool {
        let px = self.find(x);
        let py = self.find(y);

        if px == py {
            return false;
        }

        if self.rank[px] < self.rank[py] {
            self.parent[px] = py;
        } else if self.rank[px] > self.rank[py] {
            self.parent[py] = px;
        } else {
            self.parent[py] = px;
            self.rank[px] += 1;
        }

        true
    }
}

/// Edges of a minimum spanning tree, in the order Kruskal accepts them.
///
/// Returns `None` if the graph is not connected. An empty or single-vertex
/// graph has an empty tree.
pub fn minimum_spanning_edges(graph: &Graph) -> Option<Vec<Edge>> {
    let n = graph.vertex_count();
    let mut edges = graph.edges();
    edges.sort_by_key(|e| (e.weight, e.u, e.v));

    let mut uf = UnionFind::new(n);
    let mut tree = Vec::with_capacity(n.saturating_sub(1));

    for edge in edges {
        if tree.len() == n.saturating_sub(1) {
            break;
        }
        if uf.union(edge.u, edge.v) {
            tree.push(edge);
        }
    }

    (tree.len() == n.saturating_sub(1)).then_some(tree)
}

/// Total weight of a minimum spanning tree, or `None` if the graph is not
/// connected or the total overflows `i64`.
pub fn minimum_spanning_weight(graph: &Graph) -> Option<i64> {
    minimum_spanning_edges(graph)?
        .iter()
        .try_fold(0i64, |total, e| total.checked_add(e.weight))
}
