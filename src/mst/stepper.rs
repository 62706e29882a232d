//! Step-by-step Prim's algorithm with undo.

use tracing::{info, warn};

use super::start::{FirstVertex, StartVertex};
use crate::error::Result;
use crate::graph::{Edge, Graph};

/// Where the stepper is in building its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperState {
    /// No vertex chosen yet
    NotStarted,
    /// Some but not all vertices are in the tree
    InProgress,
    /// Every vertex is in the tree
    Complete,
}

/// What a single forward step changed, consumed by `step_backward`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepRecord {
    /// Vertex added to the tree
    pub vertex: usize,
    /// Edge added with it; `None` for the start vertex
    pub edge: Option<Edge>,
}

/// Incremental Prim's algorithm over a weighted graph.
///
/// Invariants between calls:
/// - `visited_edges().len() == max(0, visited_vertices().len() - 1)`
/// - `total_weight()` is the sum of the weights of `visited_edges()`
#[derive(Debug)]
pub struct MstStepper {
    /// The weighted graph; never mutated
    graph: Graph,
    /// Picks the first vertex
    start: Box<dyn StartVertex>,
    /// Tree vertices in visitation order
    visited_vertices: Vec<usize>,
    /// Tree edges as (tree vertex, new vertex), in the same order
    visited_edges: Vec<Edge>,
    /// Membership flags indexed by vertex
    in_tree: Vec<bool>,
    total_weight: i64,
    /// Undo stack
    history: Vec<StepRecord>,
}

impl MstStepper {
    /// Create a stepper that always starts from vertex 0.
    pub fn new(graph: Graph) -> Self {
        Self::with_strategy(graph, FirstVertex)
    }

    /// Create a stepper with a custom start-vertex strategy.
    pub fn with_strategy(graph: Graph, start: impl StartVertex + 'static) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            start: Box::new(start),
            visited_vertices: Vec::with_capacity(n),
            visited_edges: Vec::with_capacity(n.saturating_sub(1)),
            in_tree: vec![false; n],
            total_weight: 0,
            history: Vec::with_capacity(n),
        }
    }

    /// Build a stepper from a weighted graph's text representation.
    pub fn from_text(representation: &str) -> Result<Self> {
        Ok(Self::new(Graph::from_text(representation)?))
    }

    /// Take one step of Prim's algorithm.
    ///
    /// The first step picks the start vertex; every later step adds the
    /// cheapest edge leaving the tree. Returns false, changing nothing, when
    /// the tree is complete, no edge leaves it (disconnected graph) or the
    /// edge's weight would overflow the tree's total.
    pub fn step_forward(&mut self) -> bool {
        let n = self.graph.vertex_count();

        if self.visited_vertices.len() == n {
            info!(
                total_weight = self.total_weight,
                "Total weight of minimal spanning tree: {}", self.total_weight
            );
            return false;
        }

        let record = if self.visited_vertices.is_empty() {
            let vertex = self.start.choose(n);
            if vertex >= n {
                warn!(vertex, vertex_count = n, "start strategy chose a vertex out of range");
                return false;
            }
            info!(vertex, "Added start vertex {}", vertex);
            StepRecord { vertex, edge: None }
        } else {
            match self.cheapest_boundary_edge() {
                Some(edge) if self.total_weight.checked_add(edge.weight).is_none() => {
                    warn!(
                        u = edge.u,
                        v = edge.v,
                        weight = edge.weight,
                        total_weight = self.total_weight,
                        "edge weight overflows the tree total"
                    );
                    return false;
                }
                Some(edge) => {
                    info!(
                        u = edge.u,
                        v = edge.v,
                        weight = edge.weight,
                        "Using edge {}-{}, with weight {}", edge.u, edge.v, edge.weight
                    );
                    StepRecord {
                        vertex: edge.v,
                        edge: Some(edge),
                    }
                }
                None => {
                    warn!(
                        visited = self.visited_vertices.len(),
                        vertex_count = n,
                        "no edge leaves the tree; the graph is disconnected"
                    );
                    return false;
                }
            }
        };

        self.apply(record);
        true
    }

    /// Undo the most recent forward step. Returns false if there is none.
    pub fn step_backward(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            info!("Cannot step back more");
            return false;
        };

        self.visited_vertices.pop();
        self.in_tree[record.vertex] = false;
        match record.edge {
            Some(edge) => {
                self.visited_edges.pop();
                self.total_weight -= edge.weight;
                info!(
                    vertex = record.vertex,
                    "Removed vertex {} and edge {}-{}", record.vertex, edge.u, edge.v
                );
            }
            None => info!(vertex = record.vertex, "Removed vertex {}", record.vertex),
        }

        true
    }

    /// Step forward until the tree is complete or stalls. Returns the number
    /// of steps taken.
    pub fn run_to_completion(&mut self) -> usize {
        let mut steps = 0;
        while self.step_forward() {
            steps += 1;
        }
        steps
    }

    /// Return to the empty, not-started state.
    pub fn reset(&mut self) {
        self.visited_vertices.clear();
        self.visited_edges.clear();
        self.in_tree.fill(false);
        self.total_weight = 0;
        self.history.clear();
    }

    /// Check if the edge `(u, v)` is in the tree, in either direction.
    pub fn seen_edge(&self, u: usize, v: usize) -> bool {
        self.visited_edges.iter().any(|e| e.connects(u, v))
    }

    /// Check if `vertex` is in the tree.
    pub fn in_tree(&self, vertex: usize) -> bool {
        self.in_tree.get(vertex).copied().unwrap_or(false)
    }

    /// Tree vertices in the order they were added.
    pub fn visited_vertices(&self) -> &[usize] {
        &self.visited_vertices
    }

    /// Tree edges in the order they were added.
    pub fn visited_edges(&self) -> &[Edge] {
        &self.visited_edges
    }

    /// Sum of the tree's edge weights.
    pub fn total_weight(&self) -> i64 {
        self.total_weight
    }

    /// Number of forward steps currently applied.
    pub fn steps_taken(&self) -> usize {
        self.history.len()
    }

    pub fn state(&self) -> StepperState {
        let visited = self.visited_vertices.len();
        if visited == self.graph.vertex_count() {
            StepperState::Complete
        } else if visited == 0 {
            StepperState::NotStarted
        } else {
            StepperState::InProgress
        }
    }

    /// The underlying graph, read-only.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn apply(&mut self, record: StepRecord) {
        self.visited_vertices.push(record.vertex);
        self.in_tree[record.vertex] = true;
        if let Some(edge) = record.edge {
            self.visited_edges.push(edge);
            self.total_weight += edge.weight;
        }
        self.history.push(record);
    }

    /// Cheapest edge with one endpoint in the tree, as (tree vertex, new
    /// vertex). Ties go to the lowest tree vertex, then the lowest new vertex.
    fn cheapest_boundary_edge(&self) -> Option<Edge> {
        let n = self.graph.vertex_count();
        let cells = self.graph.adjacency().as_slice();
        let mut best: Option<Edge> = None;

        for u in (0..n).filter(|&u| self.in_tree[u]) {
            for v in (0..n).filter(|&v| !self.in_tree[v]) {
                let weight = cells[u * n + v];
                if weight == 0 {
                    continue;
                }
                if best.map_or(true, |b| weight < b.weight) {
                    best = Some(Edge::new(u, v, weight));
                }
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mst::{minimum_spanning_weight, SeededVertex};

    // Square 0-1-2-3 with weights 1, 2, 3, 4 and a diagonal 0-2 of 5
    const WEIGHTED_SQUARE: &str = "4,0,1,5,4,1,0,2,0,5,2,0,3,4,0,3,0";

    #[derive(Debug)]
    struct Fixed(usize);

    impl StartVertex for Fixed {
        fn choose(&mut self, _vertex_count: usize) -> usize {
            self.0
        }
    }

    fn stepper() -> MstStepper {
        MstStepper::from_text(WEIGHTED_SQUARE).unwrap()
    }

    #[test]
    fn test_first_step_adds_start_vertex_only() {
        let mut s = stepper();
        assert_eq!(s.state(), StepperState::NotStarted);
        assert!(s.step_forward());
        assert_eq!(s.visited_vertices(), &[0]);
        assert!(s.visited_edges().is_empty());
        assert_eq!(s.total_weight(), 0);
        assert_eq!(s.state(), StepperState::InProgress);
    }

    #[test]
    fn test_full_run() {
        let mut s = stepper();
        assert_eq!(s.run_to_completion(), 4);
        assert_eq!(s.state(), StepperState::Complete);
        assert_eq!(s.visited_vertices(), &[0, 1, 2, 3]);
        assert_eq!(
            s.visited_edges(),
            &[Edge::new(0, 1, 1), Edge::new(1, 2, 2), Edge::new(2, 3, 3)]
        );
        assert_eq!(s.total_weight(), 6);
        assert_eq!(Some(s.total_weight()), minimum_spanning_weight(s.graph()));

        // Complete: further steps change nothing
        assert!(!s.step_forward());
        assert_eq!(s.steps_taken(), 4);
    }

    #[test]
    fn test_start_strategy_is_used() {
        let g = Graph::from_text(WEIGHTED_SQUARE).unwrap();
        let mut s = MstStepper::with_strategy(g, Fixed(3));
        s.run_to_completion();
        assert_eq!(s.visited_vertices(), &[3, 2, 1, 0]);
        assert_eq!(s.total_weight(), 6);
    }

    #[test]
    fn test_bad_start_vertex_is_ignored() {
        let g = Graph::from_text(WEIGHTED_SQUARE).unwrap();
        let mut s = MstStepper::with_strategy(g, Fixed(9));
        assert!(!s.step_forward());
        assert_eq!(s.state(), StepperState::NotStarted);
    }

    #[test]
    fn test_tie_break_prefers_lowest_indices() {
        // All four edges of a square weigh 1; from vertex 0 both 0-1 and 0-3
        // tie, then 1-2 and 0-3 tie
        let g = Graph::from_text("4,0,1,0,1,1,0,1,0,0,1,0,1,1,0,1,0").unwrap();
        let mut s = MstStepper::new(g);
        s.run_to_completion();
        assert_eq!(
            s.visited_edges(),
            &[Edge::new(0, 1, 1), Edge::new(0, 3, 1), Edge::new(1, 2, 1)]
        );
    }

    #[test]
    fn test_step_backward_is_inverse() {
        let mut s = stepper();
        s.step_forward();
        s.step_forward();
        let vertices = s.visited_vertices().to_vec();
        let edges = s.visited_edges().to_vec();
        let weight = s.total_weight();

        assert!(s.step_forward());
        assert!(s.step_forward());
        assert!(s.step_backward());
        assert!(s.step_backward());

        assert_eq!(s.visited_vertices(), vertices.as_slice());
        assert_eq!(s.visited_edges(), edges.as_slice());
        assert_eq!(s.total_weight(), weight);
    }

    #[test]
    fn test_step_backward_at_start() {
        let mut s = stepper();
        assert!(!s.step_backward());
        s.step_forward();
        assert!(s.step_backward());
        assert_eq!(s.state(), StepperState::NotStarted);
        assert!(!s.step_backward());
    }

    #[test]
    fn test_reset() {
        let mut s = stepper();
        s.run_to_completion();
        s.reset();
        assert_eq!(s.state(), StepperState::NotStarted);
        assert!(s.visited_vertices().is_empty());
        assert!(s.visited_edges().is_empty());
        assert_eq!(s.total_weight(), 0);
        assert_eq!(s.steps_taken(), 0);
        assert!(!s.in_tree(0));
        assert!(!s.step_backward());
    }

    #[test]
    fn test_seen_edge() {
        let mut s = stepper();
        s.run_to_completion();
        assert!(s.seen_edge(0, 1));
        assert!(s.seen_edge(1, 0));
        assert!(!s.seen_edge(0, 2));
    }

    #[test]
    fn test_disconnected_graph_stalls() {
        let mut s = MstStepper::from_text("3,0,4,0,4,0,0,0,0,0").unwrap();
        assert_eq!(s.run_to_completion(), 2);
        assert_eq!(s.state(), StepperState::InProgress);
        assert_eq!(s.total_weight(), 4);
        assert!(!s.in_tree(2));
    }

    #[test]
    fn test_weight_overflow_refuses_step() {
        let max = i64::MAX;
        let text = format!("3,0,{max},0,{max},0,{max},0,{max},0");
        let mut s = MstStepper::from_text(&text).unwrap();
        assert_eq!(s.run_to_completion(), 2);
        assert_eq!(s.state(), StepperState::InProgress);
        assert_eq!(s.visited_edges(), &[Edge::new(0, 1, max)]);
        assert_eq!(s.total_weight(), max);
        assert!(!s.in_tree(2));

        // Refused step left the undo stack intact
        assert!(s.step_backward());
        assert_eq!(s.total_weight(), 0);
        assert_eq!(minimum_spanning_weight(s.graph()), None);
    }

    #[test]
    fn test_empty_graph_is_complete() {
        let mut s = MstStepper::from_text("0").unwrap();
        assert_eq!(s.state(), StepperState::Complete);
        assert!(!s.step_forward());
    }

    #[test]
    fn test_seeded_start_matches_kruskal() {
        let g = Graph::from_text(WEIGHTED_SQUARE).unwrap();
        let mut s = MstStepper::with_strategy(g, SeededVertex::new(7));
        s.run_to_completion();
        assert_eq!(s.total_weight(), 6);
    }
}
