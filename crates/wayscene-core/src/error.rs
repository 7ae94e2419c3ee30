//! Error types for path edits.

use serde::{Deserialize, Serialize};

/// Errors surfaced by structural path edits.
///
/// Only the hazardous removal cases are errors; out-of-range indices
/// clamp or no-op, and camera operations degrade instead of failing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PathError {
    /// The waypoint is the current scene and siblings remain.
    #[error("waypoint {index} is the current scene and cannot be removed")]
    RemoveCurrent { index: usize },

    /// The waypoint bounds the active segment of an in-flight leg.
    #[error("waypoint {index} bounds the active segment and cannot be removed mid-animation")]
    RemoveActiveEndpoint { index: usize },
}

impl PathError {
    /// Error category for logging and metrics.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::RemoveCurrent { .. } | Self::RemoveActiveEndpoint { .. } => "hazardous-removal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_index() {
        let err = PathError::RemoveCurrent { index: 3 };
        assert!(err.to_string().contains('3'));
        assert_eq!(err.category(), "hazardous-removal");
    }
}
