//! Error types for the water sort engine.
//!
//! Every variant is an expected outcome rather than a fault: callers get a typed
//! result back and decide what to show the player.

use std::fmt;

use thiserror::Error;

use crate::solver::SearchStatistics;

/// Why a requested pour was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// Source and destination are the same container.
    SameContainer,
    /// One of the indices does not name a container.
    OutOfRange,
    /// The source container holds nothing to pour.
    SourceEmpty,
    /// The destination has no free space left.
    DestinationFull,
    /// The destination's top color differs from the poured color.
    ColorMismatch,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            MoveRejection::SameContainer => "source and destination are the same container",
            MoveRejection::OutOfRange => "container index out of range",
            MoveRejection::SourceEmpty => "source container is empty",
            MoveRejection::DestinationFull => "destination full",
            MoveRejection::ColorMismatch => "color mismatch",
        };
        write!(f, "{reason}")
    }
}

/// Errors returned by puzzle construction, manual moves and the search engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SolveError {
    /// Structurally impossible puzzle, detected before any search.
    #[error("container count below color count ({containers} < {colors})")]
    ConfigurationInfeasible { containers: usize, colors: usize },

    /// Parameters the engine cannot represent.
    #[error("invalid puzzle parameters: {0}")]
    InvalidParameters(String),

    /// The whole reachable state space was explored without reaching a goal.
    #[error("no solution found after exploring {} states", stats.states_explored)]
    NoSolutionFound { stats: SearchStatistics },

    /// The caller raised the cancellation flag before the search finished.
    #[error("search cancelled after exploring {} states", stats.states_explored)]
    Cancelled { stats: SearchStatistics },

    /// A manual pour that breaks the rules; the state was left unchanged.
    #[error("cannot pour from container {} into container {}: {reason}", from + 1, to + 1)]
    InvalidMoveRequested {
        from: usize,
        to: usize,
        reason: MoveRejection,
    },
}

impl SolveError {
    /// Statistics of the run that produced this error, if it came from a search.
    pub fn statistics(&self) -> Option<&SearchStatistics> {
        match self {
            SolveError::NoSolutionFound { stats } | SolveError::Cancelled { stats } => Some(stats),
            _ => None,
        }
    }
}
