//! Tactus Core - Episode Model Foundation
//!
//! This crate provides the foundational types and effect interfaces for the
//! Tactus click coordinator. It contains only the pure episode state machine
//! and the trait seams to the host platform, with no runtime coupling and no
//! application logic.
//!
//! # Architecture Layers
//!
//! ## Core Types
//! - `EpisodeId`, `ControlId`, `TargetId`, `AnimationClass`: identifiers
//! - `Episode`, `EpisodeSlot`: the `Idle | Active` state machine
//!
//! ## Effect Interfaces (Pure Signatures)
//! - `ClockEffects`: monotonic millisecond clock
//! - `SurfaceEffects`: animation-class application on the styling layer
//!
//! ## Episode Laws
//! - At most one episode is active per slot at any time
//! - A slot settles exactly once, the instant both completion flags hold
//! - Completion signals carrying a non-current id are no-ops
//! - A still-unsettled episode may be superseded only after the
//!   suppression window has elapsed

#![forbid(unsafe_code)]

/// Control, target, class, and episode identifiers
pub mod identifiers;

/// The episode state machine
pub mod episode;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// Unified error handling
pub mod errors;

pub use effects::{ClockEffects, SurfaceEffects};
pub use episode::{Episode, EpisodeSlot, SettleFn, Settlement, SUPPRESSION_WINDOW_MS};
pub use errors::{Result, SurfaceError};
pub use identifiers::{AnimationClass, ControlId, EpisodeId, TargetId};
