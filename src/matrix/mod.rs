//! Dense square integer matrices.
//!
//! [`SquareMatrix`] backs every graph in the engine: entry `(i, j)` of an
//! adjacency matrix is the presence (0/1) or weight of the edge between
//! vertices `i` and `j`, with 0 meaning "no edge".
//!
//! ## Arithmetic
//!
//! Products are the standard O(n³) row-by-column sums computed with checked
//! `i64` arithmetic. Powers use repeated squaring:
//!
//! ```text
//! A^0 = I
//! A^1 = A
//! A^(2k)   = (A^k)·(A^k)
//! A^(2k+1) = (A^k)·(A^k)·A
//! ```
//!
//! The existence product [`SquareMatrix::multiply_existence`] works over the
//! boolean semiring: entry `(i, j)` is 1 when any `a[i][k]·b[k][j]` is
//! non-zero. For non-negative inputs it has the same zero pattern as the
//! exact product and cannot overflow.

mod square;

pub use square::SquareMatrix;
