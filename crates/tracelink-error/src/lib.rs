// Tracelink error handling
// Central location for the error types shared by the resolution engine

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export common error handling tools for convenience
pub use anyhow;
pub use thiserror;

/// A snapshot pair does not satisfy a resolver's structural precondition.
///
/// Structural violations are typed failures: the caller decides whether to
/// render a degraded "unknown correspondence" view for the failing stage or
/// skip it while still resolving neighboring stages. They are always local
/// to one stage's resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralViolation {
    /// A terminal reduction expects exactly one after element.
    #[error("terminal reduction expects exactly one after element, found {found}")]
    SingleAfterExpected {
        /// Number of after elements actually captured
        found: usize,
    },

    /// An optional-producing terminal expects zero or one after element.
    #[error("optional terminal expects at most one after element, found {found}")]
    AtMostOneAfterExpected {
        /// Number of after elements actually captured
        found: usize,
    },

    /// A pass-through stage was captured without its recorded trace.
    #[error("pass-through stage carries no recorded trace")]
    MissingRecordedTrace,

    /// No resolver is registered for the stage kind.
    #[error("no resolver registered for stage kind `{0}`")]
    UnknownStageKind(String),
}

/// A snapshot side was malformed at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Two elements of the same snapshot side carried the same capture time.
    #[error("duplicate capture time {time} in the {side} snapshot")]
    DuplicateTime {
        /// Which side of the pair the collision was on ("before" or "after")
        side: &'static str,
        /// The colliding logical timestamp
        time: i64,
    },
}

/// An informational finding about an inconsistent capture.
///
/// Diagnostics are not failures: the resolver that emits one still returns
/// a best-effort partial correspondence. They are surfaced so the
/// instrumentation collaborator can spot captures inconsistent with any
/// real execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The two snapshot sides have sizes the stage kind cannot produce.
    SizeMismatch {
        /// Elements captured before the stage
        before: usize,
        /// Elements captured after the stage
        after: usize,
        /// What the resolver expected of the two sizes
        detail: String,
    },
    /// After elements were left over once every before element was paired.
    UnmatchedAfter {
        /// Number of after elements without a matched before element
        count: usize,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::SizeMismatch { before, after, detail } => {
                write!(f, "size mismatch: {before} before / {after} after ({detail})")
            }
            Diagnostic::UnmatchedAfter { count } => {
                write!(f, "{count} after element(s) without a matched before element")
            }
        }
    }
}

/// Result type for resolver invocations
pub type ResolveResult<T> = Result<T, StructuralViolation>;

/// Result type for snapshot construction
pub type SnapshotResult<T> = Result<T, SnapshotError>;
