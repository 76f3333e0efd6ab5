//! Tactus Coordinator - Animated-Click Coordination
//!
//! Joins two independently-completing events, a host-reported animation end
//! and an arbitrary asynchronous action, into one deterministic settlement
//! callback. While an episode is in flight the bound control ignores further
//! gestures, up to a fixed suppression window after which a stuck episode
//! may be superseded.
//!
//! The coordinator talks to the host through the effect seams in
//! `tactus-core`: a [`ClockEffects`](tactus_core::ClockEffects) handler for
//! deadlines and a [`SurfaceEffects`](tactus_core::SurfaceEffects) handler
//! for animation-class changes. The host delivers gestures via
//! [`ClickCoordinator::trigger`] and animation ends via
//! [`ClickCoordinator::animation_ended`]; actions report back through the
//! one-shot [`CompletionHandle`] they are handed.
//!
//! ```
//! use std::sync::Arc;
//! use tactus_coordinator::{ClickBinding, ClickCoordinator, SystemClock};
//! use tactus_core::{AnimationClass, ControlId, TargetId};
//! use tactus_testkit::RecordingSurface;
//!
//! let surface = Arc::new(RecordingSurface::new());
//! let coordinator: ClickCoordinator<bool> =
//!     ClickCoordinator::new(Arc::new(SystemClock::new()), surface);
//!
//! let control = ControlId::from("save-button");
//! coordinator.bind(
//!     control.clone(),
//!     ClickBinding::new(TargetId::from("save-button"))
//!         .with_animation(AnimationClass::from("animate-button-click"))
//!         .with_action(|handle| handle.complete(true))
//!         .on_settled(|result| assert_eq!(result, Some(true))),
//! );
//! coordinator.trigger(&control);
//! coordinator.animation_ended(&TargetId::from("save-button"));
//! ```

#![forbid(unsafe_code)]

/// Per-control binding descriptions
pub mod binding;

/// Production clock handler
pub mod clock;

/// The coordinator
pub mod coordinator;

pub use binding::{ActionFn, ClickBinding};
pub use clock::SystemClock;
pub use coordinator::{ClickCoordinator, CompletionHandle, EpisodeStatus, GestureOutcome};
