//! Adjacency-matrix graphs and their analysis queries.
//!
//! A [`Graph`] wraps a symmetric [`SquareMatrix`](crate::matrix::SquareMatrix)
//! whose off-diagonal entries are edge presence (0/1) or edge weights, with 0
//! meaning "no edge". Vertices are indexed `0..vertex_count`.
//!
//! ## Queries
//!
//! | Query | Method |
//! |-------|--------|
//! | [`Graph::is_connected`] | depth-first reachability from vertex 0 |
//! | [`Graph::has_cycle`] | leaf pruning on a private copy of the matrix |
//! | [`Graph::is_bipartite`] | positive diagonal in an odd power `A^3, A^5, ...` |
//! | [`Graph::shortest_path`] | layered breadth-first search with back-references |
//!
//! Every query is memoized: the first call computes and stores the result,
//! later calls with the same arguments return the stored value.
//!
//! ## Text Format
//!
//! ```text
//! <N>,<a_00>,<a_01>,...,<a_(N-1)(N-1)>
//! ```
//!
//! The first token is the vertex count, followed by exactly `N*N` row-major
//! integers. For example the triangle graph:
//!
//! ```text
//! 3,0,1,1,1,0,1,1,1,0
//! ```

mod analysis;
mod text;
mod types;

pub use analysis::Graph;
pub use text::parse_matrix;
pub(crate) use text::{cell_count, parse_vertex_count, split_tokens};
pub use types::Edge;
