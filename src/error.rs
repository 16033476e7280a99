//! Physics Error Types
//!
//! Unified error type for the 2D engine. Only the API boundary can fail
//! (world construction, body lookup); the step loop itself never returns
//! an error. Degenerate geometry degrades to "no collision" and numerical
//! drift is corrected positionally each sub-step.
//!
//! Author: Moroya Sakamoto

use thiserror::Error;

/// Unified error type for physics operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// Body index is out of range.
    ///
    /// Indices are invalidated by removal (swap-remove), so holding an
    /// index across `remove_body` or a pruning step is a caller error.
    #[error("body index {index} out of range (world has {count} bodies)")]
    InvalidBodyIndex {
        /// The invalid index that was provided
        index: usize,
        /// Current number of bodies in the world
        count: usize,
    },

    /// The world configuration failed validation.
    #[error("invalid physics configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable description of the problem
        reason: &'static str,
    },
}
