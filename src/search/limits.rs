//! Search limits.
//!
//! Depth is the only knob: there is no clock, so the worst-case cost of a
//! search is set entirely by how many plies it is allowed to look ahead.

use crate::error::{EngineError, EngineResult};
use crate::types::Depth;
use crate::uci::SearchParams;

/// Depth used when the caller does not ask for one.
pub const DEFAULT_DEPTH: Depth = Depth(3);

/// Search limits configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest iteration to run
    pub depth: Depth,
}

impl SearchLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(depth: i32) -> Self {
        Self {
            depth: Depth::new(depth),
        }
    }

    /// Limits for a `go` command, falling back to `default_depth`.
    pub fn from_params(params: &SearchParams, default_depth: Depth) -> Self {
        Self {
            depth: params.depth.unwrap_or(default_depth),
        }
    }

    /// Reject depths the search cannot run with.
    pub fn validate(&self) -> EngineResult<Depth> {
        if self.depth.raw() < 1 {
            return Err(EngineError::InvalidDepth {
                depth: self.depth.raw(),
            });
        }
        Ok(self.depth)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}
