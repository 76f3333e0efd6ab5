//! Recording and fault-injecting surface handler.

use parking_lot::Mutex;
use std::collections::HashSet;
use tactus_core::{AnimationClass, Result, SurfaceEffects, SurfaceError, TargetId};

/// Direction of a recorded class change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassChangeKind {
    /// The class was applied to the target.
    Applied,
    /// The class was removed from the target.
    Removed,
}

/// One recorded class change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChange {
    /// The target the change happened on.
    pub target: TargetId,
    /// The class that changed.
    pub class: AnimationClass,
    /// Applied or removed.
    pub kind: ClassChangeKind,
}

/// Surface that records every class change and tracks which classes are
/// currently present on each target.
///
/// Targets can be marked broken with [`fail_target`](Self::fail_target) to
/// exercise the coordinator's log-and-continue path.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    log: Mutex<Vec<ClassChange>>,
    present: Mutex<HashSet<(TargetId, AnimationClass)>>,
    broken: Mutex<HashSet<TargetId>>,
}

impl RecordingSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every class change on `target` fail from now on.
    pub fn fail_target(&self, target: TargetId) {
        self.broken.lock().insert(target);
    }

    /// All recorded changes, in order.
    pub fn changes(&self) -> Vec<ClassChange> {
        self.log.lock().clone()
    }

    /// Whether `class` is currently present on `target`.
    pub fn has_class(&self, target: &TargetId, class: &AnimationClass) -> bool {
        self.present
            .lock()
            .contains(&(target.clone(), class.clone()))
    }

    fn check_broken(&self, target: &TargetId) -> Result<()> {
        if self.broken.lock().contains(target) {
            return Err(SurfaceError::unknown_target(target.as_str()));
        }
        Ok(())
    }
}

impl SurfaceEffects for RecordingSurface {
    fn apply_class(&self, target: &TargetId, class: &AnimationClass) -> Result<()> {
        self.check_broken(target)?;
        self.present
            .lock()
            .insert((target.clone(), class.clone()));
        self.log.lock().push(ClassChange {
            target: target.clone(),
            class: class.clone(),
            kind: ClassChangeKind::Applied,
        });
        Ok(())
    }

    fn remove_class(&self, target: &TargetId, class: &AnimationClass) -> Result<()> {
        self.check_broken(target)?;
        self.present
            .lock()
            .remove(&(target.clone(), class.clone()));
        self.log.lock().push(ClassChange {
            target: target.clone(),
            class: class.clone(),
            kind: ClassChangeKind::Removed,
        });
        Ok(())
    }
}
