//! Graph structure and memoized analysis queries.

use tracing::debug;

use super::text::{format_matrix, parse_matrix};
use super::types::{Edge, QueryCache};
use crate::config::AnalysisConfig;
use crate::error::{GraphError, Result};
use crate::matrix::SquareMatrix;

/// An undirected graph backed by an adjacency matrix.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Symmetric adjacency matrix; 0 means "no edge"
    adjacency: SquareMatrix,

    /// Query settings
    config: AnalysisConfig,

    /// Results of queries already answered
    cache: QueryCache,
}

impl Graph {
    /// Wrap an adjacency matrix with the default analysis settings.
    pub fn from_matrix(adjacency: SquareMatrix) -> Self {
        Self::with_config(adjacency, AnalysisConfig::default())
    }

    /// Wrap an adjacency matrix with custom analysis settings.
    pub fn with_config(adjacency: SquareMatrix, config: AnalysisConfig) -> Self {
        Self {
            adjacency,
            config,
            cache: QueryCache::default(),
        }
    }

    /// Build a graph from its text representation, e.g. `"2,0,1,1,0"`.
    pub fn from_text(representation: &str) -> Result<Self> {
        Ok(Self::from_matrix(parse_matrix(representation)?))
    }

    /// Build a graph from its text representation with custom settings.
    pub fn from_text_with_config(representation: &str, config: AnalysisConfig) -> Result<Self> {
        Ok(Self::with_config(parse_matrix(representation)?, config))
    }

    /// Serialize back to the text representation.
    pub fn to_text(&self) -> String {
        format_matrix(&self.adjacency)
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.size()
    }

    /// The adjacency matrix.
    pub fn adjacency(&self) -> &SquareMatrix {
        &self.adjacency
    }

    /// The analysis settings.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Weight (or presence) of the edge between `u` and `v`; 0 if absent.
    pub fn weight(&self, u: usize, v: usize) -> Result<i64> {
        self.adjacency.get(u, v)
    }

    /// Check if any entry is something other than 0 or 1.
    pub fn is_weighted(&self) -> bool {
        self.adjacency.as_slice().iter().any(|&w| w != 0 && w != 1)
    }

    /// All vertices adjacent to `vertex`, in ascending order.
    pub fn adjacent_vertices(&self, vertex: usize) -> Result<Vec<usize>> {
        self.check_vertex(vertex)?;
        Ok(self.neighbors(vertex).collect())
    }

    /// Number of vertices adjacent to `vertex`.
    pub fn degree(&self, vertex: usize) -> Result<usize> {
        self.check_vertex(vertex)?;
        Ok(self.neighbors(vertex).count())
    }

    /// Every edge once, as `u < v` in ascending order.
    pub fn edges(&self) -> Vec<Edge> {
        let n = self.vertex_count();
        let cells = self.adjacency.as_slice();
        (0..n)
            .flat_map(|u| ((u + 1)..n).map(move |v| (u, v)))
            .filter_map(|(u, v)| {
                let w = cells[u * n + v];
                (w != 0).then(|| Edge::new(u, v, w))
            })
            .collect()
    }

    /// Check if every vertex is reachable from vertex 0.
    ///
    /// A graph without vertices is connected.
    pub fn is_connected(&self) -> bool {
        *self.cache.connected.get_or_init(|| {
            let result = self.compute_connected();
            debug!(query = "is_connected", result, "computed graph query");
            result
        })
    }

    /// Check if the graph contains a cycle.
    ///
    /// Works on a private copy of the adjacency matrix: vertices of degree 0
    /// or 1 can't lie on a cycle, so they are pruned pass after pass. If a
    /// pass prunes nothing while vertices remain, those vertices form a cycle.
    pub fn has_cycle(&self) -> bool {
        *self.cache.cyclic.get_or_init(|| {
            let result = self.compute_cycle();
            debug!(query = "has_cycle", result, "computed graph query");
            result
        })
    }

    /// Check if the graph is bipartite.
    ///
    /// A graph is bipartite iff it has no closed walk of odd length. For
    /// each odd `e` in `3, 5, ...` up to the vertex count, a positive
    /// diagonal entry of `A^e` proves such a walk exists.
    pub fn is_bipartite(&self) -> bool {
        *self.cache.bipartite.get_or_init(|| {
            let result = !self.has_odd_closed_walk();
            debug!(query = "is_bipartite", result, "computed graph query");
            result
        })
    }

    /// A shortest path from `start` to `end`, both endpoints included.
    ///
    /// Fails with [`GraphError::NoPath`] when `end` is unreachable.
    pub fn shortest_path(&self, start: usize, end: usize) -> Result<Vec<usize>> {
        self.check_vertex(start)?;
        self.check_vertex(end)?;

        let key = (start, end);
        let cached = self.cache.paths.borrow().get(&key).cloned();
        let path = match cached {
            Some(path) => path,
            None => {
                let path = self.search_path(start, end);
                debug!(
                    query = "shortest_path",
                    start,
                    end,
                    length = path.as_ref().map(Vec::len),
                    "computed graph query"
                );
                self.cache.paths.borrow_mut().insert(key, path.clone());
                path
            }
        };

        path.ok_or(GraphError::NoPath { start, end })
    }

    /// Remove every edge incident to `vertex`, in both directions.
    ///
    /// Returns the number of edges removed. This mutates the graph and drops
    /// all memoized query results.
    pub fn disconnect_vertex(&mut self, vertex: usize) -> Result<usize> {
        self.check_vertex(vertex)?;
        let removed = self.disconnect(vertex);
        if removed > 0 {
            self.cache.clear();
        }
        Ok(removed)
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex >= self.vertex_count() {
            return Err(GraphError::index_out_of_range(vertex, self.vertex_count()));
        }
        Ok(())
    }

    /// Neighbors of an in-range vertex.
    fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        let n = self.vertex_count();
        self.adjacency.as_slice()[vertex * n..(vertex + 1) * n]
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w != 0)
            .map(|(col, _)| col)
    }

    fn disconnect(&mut self, vertex: usize) -> usize {
        self.adjacency.clear_row_and_column(vertex)
    }

    fn compute_connected(&self) -> bool {
        let n = self.vertex_count();
        if n == 0 {
            return true;
        }

        let mut seen = vec![false; n];
        let mut stack = vec![0usize];
        seen[0] = true;
        let mut reached = 1;

        while let Some(vertex) = stack.pop() {
            for next in self.neighbors(vertex) {
                if !seen[next] {
                    seen[next] = true;
                    reached += 1;
                    stack.push(next);
                }
            }
        }

        reached == n
    }

    fn compute_cycle(&self) -> bool {
        let mut working = Graph::from_matrix(self.adjacency.clone());
        let mut remaining: Vec<usize> = (0..self.vertex_count()).collect();

        while !remaining.is_empty() {
            let before = remaining.len();
            remaining.retain(|&vertex| {
                let degree = working.neighbors(vertex).count();
                match degree {
                    0 => false,
                    1 => {
                        working.disconnect(vertex);
                        false
                    }
                    _ => true,
                }
            });
            if remaining.len() == before {
                return true;
            }
        }

        false
    }

    fn has_odd_closed_walk(&self) -> bool {
        let presence = self.adjacency.presence();

        if self.vertex_count() <= self.config.exact_walk_limit {
            match odd_power_search(&presence, SquareMatrix::multiply) {
                Ok(found) => return found,
                Err(err) => debug!(%err, "exact walk counting failed, tracking existence only"),
            }
        }

        // Existence products of equal-size matrices cannot fail
        odd_power_search(&presence, SquareMatrix::multiply_existence).unwrap_or(false)
    }

    fn search_path(&self, start: usize, end: usize) -> Option<Vec<usize>> {
        if start == end {
            return Some(vec![start]);
        }

        let n = self.vertex_count();
        let mut discovered = vec![false; n];
        let mut previous: Vec<Option<usize>> = vec![None; n];
        let mut layer = vec![start];
        discovered[start] = true;

        // A shortest path has at most n - 1 edges
        for _ in 0..n {
            let mut next_layer = Vec::new();
            for &vertex in &layer {
                for next in self.neighbors(vertex) {
                    if !discovered[next] {
                        discovered[next] = true;
                        previous[next] = Some(vertex);
                        next_layer.push(next);
                    }
                }
            }

            if discovered[end] {
                let mut path = vec![end];
                let mut current = end;
                while let Some(prev) = previous[current] {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }

            if next_layer.is_empty() {
                break;
            }
            layer = next_layer;
        }

        None
    }
}

/// Look for a positive diagonal entry in `A^3, A^5, ...` up to `A^n`.
fn odd_power_search<F>(a: &SquareMatrix, multiply: F) -> Result<bool>
where
    F: Fn(&SquareMatrix, &SquareMatrix) -> Result<SquareMatrix>,
{
    let n = a.size();
    if n < 3 {
        return Ok(false);
    }

    let squared = multiply(a, a)?;
    let mut power = multiply(&squared, a)?;
    let mut exponent = 3;

    loop {
        if power.diagonal().iter().any(|&d| d > 0) {
            return Ok(true);
        }
        exponent += 2;
        if exponent > n {
            return Ok(false);
        }
        power = multiply(&power, &squared)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "3,0,1,1,1,0,1,1,1,0";
    const SQUARE: &str = "4,0,1,0,1,1,0,1,0,0,1,0,1,1,0,1,0";
    // 0-1, 1-2, 1-3
    const STAR: &str = "4,0,1,0,0,1,0,1,1,0,1,0,0,0,1,0,0";

    fn cycle_graph(n: usize) -> Graph {
        let mut m = SquareMatrix::zeros(n);
        for i in 0..n {
            let j = (i + 1) % n;
            m.set(i, j, 1).unwrap();
            m.set(j, i, 1).unwrap();
        }
        Graph::from_matrix(m)
    }

    #[test]
    fn test_triangle_queries() {
        let g = Graph::from_text(TRIANGLE).unwrap();
        assert!(g.is_connected());
        assert!(g.has_cycle());
        assert!(!g.is_bipartite());
    }

    #[test]
    fn test_square_queries() {
        let g = Graph::from_text(SQUARE).unwrap();
        assert!(g.is_connected());
        assert!(g.has_cycle());
        assert!(g.is_bipartite());
    }

    #[test]
    fn test_tree_queries() {
        let g = Graph::from_text(STAR).unwrap();
        assert!(g.is_connected());
        assert!(!g.has_cycle());
        assert!(g.is_bipartite());
    }

    #[test]
    fn test_connectivity_small_graphs() {
        assert!(Graph::from_text("1,0").unwrap().is_connected());
        assert!(!Graph::from_text("2,0,0,0,0").unwrap().is_connected());
        assert!(Graph::from_text("0").unwrap().is_connected());
    }

    #[test]
    fn test_empty_graph_conventions() {
        let g = Graph::from_text("0").unwrap();
        assert!(!g.has_cycle());
        assert!(g.is_bipartite());
        assert!(g.edges().is_empty());
    }

    #[test]
    fn test_odd_cycles_are_not_bipartite() {
        // Catches a power sequence that drifts off A^3, A^5, A^7
        for n in [5, 7, 9] {
            assert!(!cycle_graph(n).is_bipartite(), "C{} should not be bipartite", n);
        }
        for n in [4, 6, 8] {
            assert!(cycle_graph(n).is_bipartite(), "C{} should be bipartite", n);
        }
    }

    #[test]
    fn test_bipartite_existence_mode_agrees() {
        let config = AnalysisConfig::new().with_exact_walk_limit(1);
        for n in [5, 6, 7] {
            let exact = cycle_graph(n);
            let existence = Graph::with_config(exact.adjacency().clone(), config);
            assert_eq!(exact.is_bipartite(), existence.is_bipartite());
        }
    }

    #[test]
    fn test_weighted_graph_bipartite_uses_presence() {
        // Weighted triangle: weights do not change the walk structure
        let g = Graph::from_text("3,0,9,4,9,0,7,4,7,0").unwrap();
        assert!(!g.is_bipartite());
        assert!(g.is_weighted());
    }

    #[test]
    fn test_cycle_with_pendant_vertices() {
        // Triangle 0-1-2 with a tail 2-3-4
        let mut m = SquareMatrix::zeros(5);
        for (u, v) in [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)] {
            m.set(u, v, 1).unwrap();
            m.set(v, u, 1).unwrap();
        }
        let g = Graph::from_matrix(m);
        assert!(g.has_cycle());
        // The private working copy must leave the graph intact
        assert_eq!(g.edges().len(), 5);
    }

    #[test]
    fn test_forest_has_no_cycle() {
        // Two disjoint edges and an isolated vertex
        let g = Graph::from_text("5,0,1,0,0,0,1,0,0,0,0,0,0,0,1,0,0,0,1,0,0,0,0,0,0,0").unwrap();
        assert!(!g.has_cycle());
        assert!(!g.is_connected());
    }

    #[test]
    fn test_shortest_path() {
        let g = Graph::from_text(SQUARE).unwrap();
        assert_eq!(g.shortest_path(0, 2).unwrap(), vec![0, 1, 2]);
        assert_eq!(g.shortest_path(0, 3).unwrap(), vec![0, 3]);
        assert_eq!(g.shortest_path(2, 2).unwrap(), vec![2]);
    }

    #[test]
    fn test_shortest_path_unreachable() {
        let g = Graph::from_text("3,0,1,0,1,0,0,0,0,0").unwrap();
        assert!(matches!(
            g.shortest_path(0, 2),
            Err(GraphError::NoPath { start: 0, end: 2 })
        ));
        // Cached failure stays a failure
        assert!(g.shortest_path(0, 2).is_err());
    }

    #[test]
    fn test_shortest_path_out_of_range() {
        let g = Graph::from_text(TRIANGLE).unwrap();
        assert!(matches!(
            g.shortest_path(0, 3),
            Err(GraphError::IndexOutOfRange { index: 3, size: 3 })
        ));
    }

    #[test]
    fn test_queries_are_memoized() {
        let g = Graph::from_text(TRIANGLE).unwrap();
        assert!(g.cache.connected.get().is_none());
        assert!(g.cache.cyclic.get().is_none());
        assert!(g.cache.bipartite.get().is_none());
        assert!(g.cache.paths.borrow().is_empty());

        g.is_connected();
        g.has_cycle();
        g.is_bipartite();
        g.shortest_path(0, 1).unwrap();
        assert_eq!(g.cache.connected.get(), Some(&true));
        assert_eq!(g.cache.cyclic.get(), Some(&true));
        assert_eq!(g.cache.bipartite.get(), Some(&false));
        assert_eq!(g.cache.paths.borrow().get(&(0, 1)), Some(&Some(vec![0, 1])));
    }

    #[test]
    fn test_queries_answer_from_cache() {
        // A path 0-1 plus isolated vertex 2: acyclic, bipartite, disconnected.
        // Seeding the cells with the opposite answers shows nothing recomputes.
        let g = Graph::from_text("3,0,1,0,1,0,0,0,0,0").unwrap();
        g.cache.connected.set(true).unwrap();
        g.cache.cyclic.set(true).unwrap();
        g.cache.bipartite.set(false).unwrap();
        assert!(g.is_connected());
        assert!(g.has_cycle());
        assert!(!g.is_bipartite());

        assert!(matches!(
            g.shortest_path(0, 2),
            Err(GraphError::NoPath { start: 0, end: 2 })
        ));
        assert_eq!(g.cache.paths.borrow().get(&(0, 2)), Some(&None));
        g.cache.paths.borrow_mut().insert((0, 2), Some(vec![0, 2]));
        assert_eq!(g.shortest_path(0, 2).unwrap(), vec![0, 2]);

        // A cached failure wins over the real edge 0-1
        g.cache.paths.borrow_mut().insert((0, 1), None);
        assert!(matches!(
            g.shortest_path(0, 1),
            Err(GraphError::NoPath { start: 0, end: 1 })
        ));
    }

    #[test]
    fn test_adjacent_vertices() {
        let g = Graph::from_text(STAR).unwrap();
        assert_eq!(g.adjacent_vertices(1).unwrap(), vec![0, 2, 3]);
        assert_eq!(g.degree(3).unwrap(), 1);
        assert!(g.adjacent_vertices(4).is_err());
    }

    #[test]
    fn test_disconnect_vertex() {
        let mut g = Graph::from_text(TRIANGLE).unwrap();
        assert!(g.is_connected());
        assert_eq!(g.disconnect_vertex(0).unwrap(), 2);
        assert!(g.adjacency().is_symmetric());
        assert!(g.adjacent_vertices(1).unwrap() == vec![2]);
        // Cached answer must not survive the mutation
        assert!(!g.is_connected());
        assert!(!g.has_cycle());
    }

    #[test]
    fn test_edges_and_weights() {
        let g = Graph::from_text("3,0,5,0,5,0,2,0,2,0").unwrap();
        assert_eq!(g.edges(), vec![Edge::new(0, 1, 5), Edge::new(1, 2, 2)]);
        assert_eq!(g.weight(1, 2).unwrap(), 2);
    }
}
