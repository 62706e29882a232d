//! Line-oriented graph input.
//!
//! Each line of a graph file is parsed on its own. A line holds either a
//! plain graph or a graph followed by a shortest-path request:
//!
//! ```text
//! line  = graph | graph ',' from ',' to
//! graph = N ',' a_00 ',' ... ',' a_(N-1)(N-1)
//! ```
//!
//! The two forms are told apart by token count (`N*N + 1` versus
//! `N*N + 3`). `from` and `to` are written 1-based, as displayed to users.
//!
//! # Example
//!
//! ```text
//! 3,0,1,1,1,0,1,1,1,0
//! 4,0,1,0,1,1,0,1,0,0,1,0,1,1,0,1,0,1,3
//! ```
//!
//! What happens to a malformed line depends on [`BatchMode`]: best-effort
//! loading records it in [`Batch::rejected`] and continues, fail-fast loading
//! returns its error. Errors that don't come from the line itself always
//! propagate.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::{AnalysisConfig, BatchConfig, BatchMode};
use crate::error::{GraphError, Result};
use crate::graph::{cell_count, parse_matrix, parse_vertex_count, split_tokens, Graph};

/// A shortest-path request carried by an input line, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathQuery {
    pub from: usize,
    pub to: usize,
}

impl PathQuery {
    /// Convert to the engine's 0-based vertex indices.
    ///
    /// Fails with [`GraphError::IndexOutOfRange`] for a 0 endpoint, which has
    /// no 1-based meaning.
    pub fn zero_based(&self) -> Result<(usize, usize)> {
        let from = self
            .from
            .checked_sub(1)
            .ok_or_else(|| GraphError::index_out_of_range(self.from, 0))?;
        let to = self
            .to
            .checked_sub(1)
            .ok_or_else(|| GraphError::index_out_of_range(self.to, 0))?;
        Ok((from, to))
    }
}

/// One successfully parsed input line.
#[derive(Debug, Clone)]
pub struct GraphRecord {
    /// 1-based line number in the input
    pub line: usize,
    pub graph: Graph,
    pub path_query: Option<PathQuery>,
}

/// The result of loading a batch of lines.
#[derive(Debug, Default)]
pub struct Batch {
    pub records: Vec<GraphRecord>,
    /// Lines skipped in best-effort mode, with their 1-based line numbers
    pub rejected: Vec<(usize, GraphError)>,
}

impl Batch {
    /// Check if every non-blank line parsed.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Parse a single line with default analysis settings.
pub fn parse_line(line: &str) -> Result<(Graph, Option<PathQuery>)> {
    parse_line_with_config(line, AnalysisConfig::default())
}

/// Parse a single line into a graph and an optional path request.
pub fn parse_line_with_config(
    line: &str,
    config: AnalysisConfig,
) -> Result<(Graph, Option<PathQuery>)> {
    let tokens = split_tokens(line);
    let n = parse_vertex_count(&tokens, line)?;
    let graph_tokens = cell_count(n, line)? + 1;

    if tokens.len() == graph_tokens + 2 {
        let endpoint = |token: &str| {
            token.parse::<usize>().map_err(|_| {
                GraphError::invalid_format(
                    line,
                    format!("path endpoint '{}' is not a vertex number", token),
                )
            })
        };
        let query = PathQuery {
            from: endpoint(tokens[graph_tokens])?,
            to: endpoint(tokens[graph_tokens + 1])?,
        };
        let matrix = parse_matrix(&tokens[..graph_tokens].join(","))?;
        return Ok((Graph::with_config(matrix, config), Some(query)));
    }

    let matrix = parse_matrix(line)?;
    Ok((Graph::with_config(matrix, config), None))
}

/// Load every line of `text`.
pub fn load_str(text: &str, config: &BatchConfig) -> Result<Batch> {
    config.validate()?;
    let mut batch = Batch::default();

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        if config.skip_blank_lines && line.trim().is_empty() {
            continue;
        }

        match parse_line_with_config(line, config.analysis) {
            Ok((graph, path_query)) => {
                debug!(
                    line = line_number,
                    vertices = graph.vertex_count(),
                    "parsed graph"
                );
                batch.records.push(GraphRecord {
                    line: line_number,
                    graph,
                    path_query,
                });
            }
            Err(err) if config.mode == BatchMode::FailFast || !err.is_input_error() => {
                return Err(err);
            }
            Err(err) => {
                warn!(line = line_number, %err, "skipping malformed graph line");
                batch.rejected.push((line_number, err));
            }
        }
    }

    Ok(batch)
}

/// Load every line of the file at `path`.
pub fn load_file(path: &Path, config: &BatchConfig) -> Result<Batch> {
    let content = std::fs::read_to_string(path).map_err(|e| GraphError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    load_str(&content, config)
}
