//! Text representation of adjacency matrices.

use std::fmt;
use std::str::FromStr;

use super::Graph;
use crate::error::{GraphError, Result};
use crate::matrix::SquareMatrix;

/// Parse `"N,a_0,...,a_{N*N-1}"` into an `N`×`N` matrix.
///
/// Tokens may carry surrounding whitespace. Fails with
/// [`GraphError::InvalidFormat`] when a token is not a non-negative decimal
/// integer or the token count is not `N*N + 1`.
pub fn parse_matrix(representation: &str) -> Result<SquareMatrix> {
    let tokens = split_tokens(representation);
    let n = parse_vertex_count(&tokens, representation)?;
    let expected = cell_count(n, representation)?;

    if tokens.len() != expected + 1 {
        return Err(GraphError::invalid_format(
            representation,
            format!(
                "expected {} values for {} vertices, got {}",
                expected,
                n,
                tokens.len() - 1
            ),
        ));
    }

    let cells = tokens[1..]
        .iter()
        .map(|token| parse_int(token, representation))
        .collect::<Result<Vec<_>>>()?;

    SquareMatrix::from_row_major(n, cells)
}

/// Render a matrix in the text format accepted by [`parse_matrix`].
pub(crate) fn format_matrix(matrix: &SquareMatrix) -> String {
    let mut out = matrix.size().to_string();
    for value in matrix.as_slice() {
        out.push(',');
        out.push_str(&value.to_string());
    }
    out
}

pub(crate) fn split_tokens(representation: &str) -> Vec<&str> {
    representation.trim().split(',').map(str::trim).collect()
}

/// Read the leading vertex count token.
pub(crate) fn parse_vertex_count(tokens: &[&str], representation: &str) -> Result<usize> {
    let first = tokens.first().copied().unwrap_or_default();
    first.parse::<usize>().map_err(|_| {
        GraphError::invalid_format(
            representation,
            format!("vertex count '{}' is not a non-negative integer", first),
        )
    })
}

/// Number of matrix entries for `n` vertices.
pub(crate) fn cell_count(n: usize, representation: &str) -> Result<usize> {
    n.checked_mul(n).ok_or_else(|| {
        GraphError::invalid_format(representation, format!("vertex count {} is too large", n))
    })
}

/// Parse one matrix entry. Weights are non-negative; 0 means no edge.
pub(crate) fn parse_int(token: &str, representation: &str) -> Result<i64> {
    let value = token.parse::<i64>().map_err(|_| {
        GraphError::invalid_format(representation, format!("'{}' is not an integer", token))
    })?;
    if value < 0 {
        return Err(GraphError::invalid_format(
            representation,
            format!("weight {} is negative", value),
        ));
    }
    Ok(value)
}

impl FromStr for Graph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Graph::from_text(s)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
