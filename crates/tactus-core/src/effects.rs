//! Pure effect interfaces to the host platform.
//!
//! The coordinator runs inside gesture and signal handlers, so both seams
//! are synchronous by contract: handlers must return promptly and must not
//! block. Production handlers live in `tactus-coordinator`; deterministic
//! test doubles live in `tactus-testkit`.

use crate::errors::Result;
use crate::identifiers::{AnimationClass, TargetId};

/// Monotonic millisecond clock.
///
/// Readings are only ever compared against each other to evaluate the
/// suppression-window deadline, so the epoch is irrelevant; monotonicity is
/// the only requirement.
pub trait ClockEffects: Send + Sync {
    /// Current monotonic reading in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Animation-class application on the host styling layer.
///
/// Applying a class is expected to start the named CSS animation or
/// transition on the target; the host reports the animation's end back to
/// the coordinator separately. Failures are surfaced so the coordinator can
/// log them, but they must leave the handler in a usable state: a failed
/// apply or remove on one target must not affect other targets.
pub trait SurfaceEffects: Send + Sync {
    /// Add an animation class to a target, starting its animation.
    fn apply_class(&self, target: &TargetId, class: &AnimationClass) -> Result<()>;

    /// Remove an animation class from a target.
    fn remove_class(&self, target: &TargetId, class: &AnimationClass) -> Result<()>;
}
