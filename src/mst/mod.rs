//! Minimum spanning trees.
//!
//! [`MstStepper`] runs Prim's algorithm one edge at a time so a caller can
//! display every intermediate tree, and undo steps in strict LIFO order.
//! [`minimum_spanning_weight`] is an independent Kruskal implementation used
//! to check the stepper's result.
//!
//! ## Stepping
//!
//! ```text
//! NotStarted --step_forward--> InProgress --step_forward--> ... --> Complete
//!      ^                            |                                  |
//!      +-------step_backward--------+<----------step_backward---------+
//! ```
//!
//! The first forward step picks a start vertex through a [`StartVertex`]
//! strategy. Every later step adds the cheapest edge with exactly one
//! endpoint in the tree; ties go to the lowest tree endpoint, then the
//! lowest new endpoint.
//!
//! ## Weights
//!
//! An adjacency entry of 0 means "no edge", so a genuine zero-weight edge
//! cannot be expressed in the text format.

mod kruskal;
mod start;
mod stepper;

pub use kruskal::{minimum_spanning_edges, minimum_spanning_weight};
pub use start::{FirstVertex, SeededVertex, StartVertex};
#[cfg(feature = "thread-rng")]
pub use start::RandomVertex;
pub use stepper::{MstStepper, StepperState};
