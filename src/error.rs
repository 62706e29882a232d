//! Error types for the graphstep engine.
//!
//! This module provides a unified error type [`GraphError`] that covers
//! all error conditions that can occur during text parsing, matrix
//! arithmetic, graph queries and batch loading. Every variant is a local,
//! recoverable failure: callers decide whether to skip an input line,
//! surface a message or halt a batch.

use thiserror::Error;

/// Result type alias using [`GraphError`].
pub type Result<T> = std::result::Result<T, GraphError>;

/// Unified error type for all graphstep operations.
#[derive(Error, Debug)]
pub enum GraphError {
    // ============ Parsing Errors ============
    /// Malformed textual graph representation
    #[error("Invalid graph representation '{input}': {message}")]
    InvalidFormat { input: String, message: String },

    // ============ Matrix Errors ============
    /// A raw grid whose rows are not all as long as the grid is tall
    #[error("Matrix is not square: {rows} rows but row {row} has {columns} columns")]
    NotSquare {
        rows: usize,
        row: usize,
        columns: usize,
    },

    /// Multiplication of matrices with different sizes
    #[error("Cannot multiply a {left}x{left} matrix by a {right}x{right} matrix")]
    DimensionMismatch { left: usize, right: usize },

    /// Vertex or matrix index outside `[0, size)`
    #[error("Index {index} out of range for size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// Checked integer arithmetic overflowed
    #[error("Integer overflow during {operation}")]
    ArithmeticOverflow { operation: &'static str },

    // ============ Query Errors ============
    /// No path exists between the requested vertices
    #[error("No path from vertex {start} to vertex {end}")]
    NoPath { start: usize, end: usize },

    // ============ Configuration Errors ============
    /// Invalid engine configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ I/O Errors ============
    /// Error reading a graph file
    #[error("Failed to read graph file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report
    #[error("Failed to write output: {source}")]
    OutputError {
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    /// Create an invalid format error
    pub fn invalid_format(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, size: usize) -> Self {
        Self::IndexOutOfRange { index, size }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error came from a single malformed input line rather
    /// than from the environment (I/O or configuration).
    pub(crate) fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Self::FileReadError { .. } | Self::OutputError { .. } | Self::InvalidConfig { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::index_out_of_range(5, 3);
        assert_eq!(err.to_string(), "Index 5 out of range for size 3");

        let err = GraphError::NoPath { start: 0, end: 2 };
        assert_eq!(err.to_string(), "No path from vertex 0 to vertex 2");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(GraphError::invalid_format("x", "bad").is_input_error());
        assert!(!GraphError::invalid_config("bad").is_input_error());
    }
}
