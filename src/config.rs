//! Engine configuration.
//!
//! Configuration is plain builder-style structs; the CLI maps its flags onto
//! them and library callers construct them directly.

use crate::error::{GraphError, Result};

/// Default vertex-count threshold for exact walk counting.
pub const DEFAULT_EXACT_WALK_LIMIT: usize = 16;

/// Configuration for graph queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Graphs with at most this many vertices count closed walks exactly in
    /// 64-bit arithmetic during the bipartite check. Larger graphs only track
    /// whether a walk exists.
    pub exact_walk_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exact_walk_limit: DEFAULT_EXACT_WALK_LIMIT,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exact walk counting threshold.
    pub fn with_exact_walk_limit(mut self, limit: usize) -> Self {
        self.exact_walk_limit = limit;
        self
    }

    /// Check the configuration for values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.exact_walk_limit == 0 {
            return Err(GraphError::invalid_config(
                "exact walk limit must be at least 1",
            ));
        }
        Ok(())
    }
}

/// How a batch of input lines reacts to a malformed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Report the bad line and keep going.
    #[default]
    BestEffort,
    /// Abort the whole batch on the first bad line.
    FailFast,
}

/// Configuration for line-oriented batch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Error policy for malformed lines.
    pub mode: BatchMode,
    /// Ignore lines that are empty after trimming.
    pub skip_blank_lines: bool,
    /// Query settings applied to every graph in the batch.
    pub analysis: AnalysisConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mode: BatchMode::BestEffort,
            skip_blank_lines: true,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error policy.
    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set whether blank lines are skipped silently.
    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    /// Set the query settings for loaded graphs.
    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Check the configuration for values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
    }
}
