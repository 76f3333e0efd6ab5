//! Identifier types for controls, animation targets, and episodes.
//!
//! Controls and targets are named by the host with opaque string keys (for a
//! browser host these are typically element ids). Episodes are named by the
//! coordinator with fresh UUIDs so that late completion signals can be
//! matched against the episode that is still current.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier for one click episode.
///
/// Generated fresh when a gesture starts an episode. Completion signals carry
/// the id they were scoped to; a mismatch against the active episode marks
/// the signal as stale and it is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeId(pub Uuid);

impl EpisodeId {
    /// Generate a fresh episode id.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from a UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "episode-{}", self.0)
    }
}

impl From<Uuid> for EpisodeId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Host-side key for the element that receives the activating gesture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlId(String);

impl ControlId {
    /// Create a control id from a host key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the host key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ControlId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Host-side key for the element that receives the animation class.
///
/// A control and its animation target often share the same host element; the
/// two id spaces are still kept distinct because they key different
/// registries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(String);

impl TargetId {
    /// Create a target id from a host key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the host key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TargetId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Symbolic name of a CSS animation class, interpreted by the styling layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationClass(String);

impl AnimationClass {
    /// Create an animation class name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the class name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnimationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AnimationClass {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
