//! Error types for the surface seam.
//!
//! The coordinator itself never raises: suppressed gestures and stale
//! completion signals are dropped without an error value. The one fallible
//! seam is the host styling layer, which may fail to toggle a class (a
//! detached element, an unknown key). Those failures are reported to the
//! coordinator so it can log and continue; they never block settlement.

use serde::{Deserialize, Serialize};

/// Error raised by a [`SurfaceEffects`](crate::effects::SurfaceEffects)
/// handler when an animation class cannot be applied or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SurfaceError {
    /// The target key does not resolve to a live element
    #[error("unknown animation target: {key}")]
    UnknownTarget {
        /// Host key that failed to resolve
        key: String,
    },

    /// The styling layer rejected the class change
    #[error("style change failed: {message}")]
    Style {
        /// Description of the styling failure
        message: String,
    },
}

impl SurfaceError {
    /// Create an unknown-target error
    pub fn unknown_target(key: impl Into<String>) -> Self {
        Self::UnknownTarget { key: key.into() }
    }

    /// Create a style-change error
    pub fn style(message: impl Into<String>) -> Self {
        Self::Style {
            message: message.into(),
        }
    }
}

/// Standard Result type for surface operations
pub type Result<T> = std::result::Result<T, SurfaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SurfaceError::unknown_target("menu-div");
        assert!(matches!(err, SurfaceError::UnknownTarget { .. }));
        assert_eq!(err.to_string(), "unknown animation target: menu-div");
    }

    #[test]
    fn test_style_error_display() {
        let err = SurfaceError::style("class list frozen");
        assert_eq!(err.to_string(), "style change failed: class list frozen");
    }
}
