//! Tactus Testkit - Deterministic Test Doubles
//!
//! Handlers for the `tactus-core` effect seams that make coordinator
//! behavior fully deterministic in tests: a manually-advanced clock, a
//! surface that records every class change (and can be told to fail), and a
//! probe that captures settlements.
//!
//! Production handlers live in `tactus-coordinator`; nothing here belongs in
//! a shipping host.

#![forbid(unsafe_code)]

/// Manually-advanced clock
pub mod clock;

/// Recording and fault-injecting surface
pub mod surface;

/// Settlement capture
pub mod probe;

pub use clock::ManualClock;
pub use probe::SettlementProbe;
pub use surface::{ClassChange, ClassChangeKind, RecordingSurface};
