//! # Graphstep Core
//!
//! Adjacency-matrix graph analysis and a step-by-step minimum spanning tree
//! engine.
//!
//! This library provides:
//! - Dense square integer matrices with multiplication and exponentiation
//! - Memoized graph queries: connectivity, cycles, bipartiteness and shortest paths
//! - An incremental Prim's algorithm that builds a minimum spanning tree one
//!   edge at a time, with undo
//! - Line-oriented loading of graphs from text files
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`matrix`] - Square matrix storage and arithmetic
//! - [`graph`] - Adjacency-matrix graphs, the text format and all queries
//! - [`mst`] - Prim's stepper, start-vertex strategies and a Kruskal reference
//! - [`batch`] - Best-effort and fail-fast loading of graph files
//! - [`config`] - Builder-style settings for queries and batches
//! - [`report`] - Text output for the command-line frontend (CLI only)
//!
//! Vertex indices are 0-based throughout the library. The 1-based `V1, V2, ...`
//! display convention belongs to presentation code such as [`report`].
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! graphstep analyze graphs.txt
//! graphstep prim weighted.txt --seed 42 --verify
//! ```
//!
//! ### Library
//!
//! ```
//! use graphstep_core::{Graph, MstStepper};
//!
//! let triangle = Graph::from_text("3,0,1,1,1,0,1,1,1,0").unwrap();
//! assert!(triangle.is_connected());
//! assert!(triangle.has_cycle());
//! assert!(!triangle.is_bipartite());
//!
//! let mut prim = MstStepper::from_text("3,0,2,5,2,0,1,5,1,0").unwrap();
//! while prim.step_forward() {}
//! assert_eq!(prim.total_weight(), 3);
//! ```
//!
//! ## Threading
//!
//! Graphs memoize through interior mutability and are not `Sync`. Confine each
//! [`Graph`] and [`MstStepper`] to one thread or serialize access externally.

pub mod batch;
pub mod config;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod mst;

#[cfg(feature = "cli")]
pub mod report;

// Re-export main types for convenience
pub use config::{AnalysisConfig, BatchConfig, BatchMode};
pub use error::{GraphError, Result};
pub use graph::{Edge, Graph};
pub use matrix::SquareMatrix;
pub use mst::{MstStepper, StepperState};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{WasmGraph, WasmMstStepper};
