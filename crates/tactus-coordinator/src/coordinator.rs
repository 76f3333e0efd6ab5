//! The click coordinator.
//!
//! One coordinator instance owns one episode slot, a registry of per-control
//! bindings, and a registry of per-target animation watches. A page-level
//! host typically keeps a single shared instance, so one episode slot guards
//! every bound control on the page.
//!
//! All slot and registry mutations are serialized through one mutex
//! (single-writer discipline); user code (actions, settlement callbacks,
//! decorative `on_end` hooks) and surface-effect calls always run with the
//! lock released, so callbacks may re-enter the coordinator synchronously.

use crate::binding::{ActionFn, ClickBinding};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tactus_core::{
    AnimationClass, ClockEffects, ControlId, EpisodeId, EpisodeSlot, Settlement, SurfaceEffects,
    TargetId,
};

/// What a delivered gesture did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A new episode started.
    Started(EpisodeId),
    /// An episode is in flight and inside the suppression window; the
    /// gesture was dropped.
    Suppressed,
    /// No binding is registered for the control; the gesture was dropped.
    Unbound,
}

/// Point-in-time view of the in-flight episode, for host introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeStatus {
    /// The in-flight episode's id.
    pub id: EpisodeId,
    /// Whether the animation has signaled completion.
    pub animation_done: bool,
    /// Whether the action has reported completion.
    pub action_done: bool,
}

/// One-shot completion report for an episode's action.
///
/// Handed to the action closure when its episode starts. Completing consumes
/// the handle; a handle whose episode has been superseded or settled, or
/// whose coordinator is gone, completes into nothing.
pub struct CompletionHandle<R> {
    inner: Weak<Inner<R>>,
    id: EpisodeId,
}

impl<R: Send + 'static> CompletionHandle<R> {
    /// The episode this handle reports for.
    pub fn episode_id(&self) -> EpisodeId {
        self.id
    }

    /// Report the action's result, settling the episode if its animation has
    /// already ended.
    pub fn complete(self, result: R) {
        if let Some(inner) = self.inner.upgrade() {
            inner.report_action_done(self.id, result);
        }
    }
}

impl<R> fmt::Debug for CompletionHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionHandle")
            .field("id", &self.id)
            .finish()
    }
}

/// Per-target animation watch: whoever attached last owns the target's next
/// animation-end signal, matching a host where each element has one
/// animation-end listener slot.
enum Watch {
    /// Attached by an episode; the end signal feeds the settlement check.
    Episode { id: EpisodeId, class: AnimationClass },
    /// Attached by `play_animation`; the end signal fires a plain hook.
    Decorative {
        class: AnimationClass,
        on_end: Option<Box<dyn FnOnce() + Send>>,
    },
}

struct State<R> {
    bindings: HashMap<ControlId, ClickBinding<R>>,
    watches: HashMap<TargetId, Watch>,
    slot: EpisodeSlot<R>,
}

struct Inner<R> {
    clock: Arc<dyn ClockEffects>,
    surface: Arc<dyn SurfaceEffects>,
    state: Mutex<State<R>>,
}

impl<R: Send + 'static> Inner<R> {
    fn apply_class(&self, target: &TargetId, class: &AnimationClass) {
        if let Err(error) = self.surface.apply_class(target, class) {
            tracing::warn!(%target, %class, %error, "failed to apply animation class");
        }
    }

    fn remove_class(&self, target: &TargetId, class: &AnimationClass) {
        if let Err(error) = self.surface.remove_class(target, class) {
            tracing::warn!(%target, %class, %error, "failed to remove animation class");
        }
    }

    fn fire(&self, settlement: Settlement<R>, id: EpisodeId) {
        tracing::debug!(episode = %id, "episode settled");
        settlement.fire();
    }

    fn report_action_done(&self, id: EpisodeId, result: R) {
        let settlement = self.state.lock().slot.complete_action(id, result);
        if let Some(settlement) = settlement {
            self.fire(settlement, id);
        }
    }

    fn settle_check(&self) {
        let settled = {
            let mut state = self.state.lock();
            state.slot.active_id().and_then(|id| {
                state.slot.try_settle().map(|settlement| (settlement, id))
            })
        };
        if let Some((settlement, id)) = settled {
            self.fire(settlement, id);
        }
    }
}

/// Binds controls to animated, double-trigger-safe click handling.
///
/// Cheap to clone; clones share the same episode slot and registries.
pub struct ClickCoordinator<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for ClickCoordinator<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for ClickCoordinator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickCoordinator").finish()
    }
}

impl<R: Send + 'static> ClickCoordinator<R> {
    /// Create a coordinator over the given clock and surface handlers.
    pub fn new(clock: Arc<dyn ClockEffects>, surface: Arc<dyn SurfaceEffects>) -> Self {
        Self {
            inner: Arc::new(Inner {
                clock,
                surface,
                state: Mutex::new(State {
                    bindings: HashMap::new(),
                    watches: HashMap::new(),
                    slot: EpisodeSlot::new(),
                }),
            }),
        }
    }

    /// Register `binding` for `control`, replacing any previous binding on
    /// the same control. Rebinding never disturbs an in-flight episode: the
    /// episode keeps the callback it captured when it started.
    pub fn bind(&self, control: ControlId, binding: ClickBinding<R>) {
        self.inner.state.lock().bindings.insert(control, binding);
    }

    /// Remove the binding for `control`. An in-flight episode started before
    /// the unbind still settles normally.
    pub fn unbind(&self, control: &ControlId) {
        self.inner.state.lock().bindings.remove(control);
    }

    /// Deliver a gesture on `control`.
    ///
    /// The host must suppress the platform's default gesture behavior (for
    /// example link navigation) before delivering, regardless of the
    /// outcome. A gesture is dropped while an episode is in flight and
    /// younger than the suppression window; otherwise a fresh episode starts:
    /// the animation class is applied, the action is invoked with the
    /// episode's completion handle, and the settlement check runs (an
    /// episode bound with neither animation nor action settles before this
    /// method returns).
    pub fn trigger(&self, control: &ControlId) -> GestureOutcome {
        let now_ms = self.inner.clock.now_ms();
        let (id, animation, action) = {
            let mut state = self.inner.state.lock();
            let Some(binding) = state.bindings.get(control) else {
                return GestureOutcome::Unbound;
            };
            let target = binding.target.clone();
            let class = binding.animation.clone();
            let action: Option<ActionFn<R>> = binding.action.clone();
            let on_settled = binding.on_settled.clone();

            if !state.slot.can_start(now_ms) {
                return GestureOutcome::Suppressed;
            }
            let id = state
                .slot
                .begin(now_ms, class.is_some(), action.is_some(), on_settled);
            if let Some(class) = class.clone() {
                state.watches.insert(target.clone(), Watch::Episode { id, class });
            }
            (id, class.map(|class| (target, class)), action)
        };
        tracing::debug!(episode = %id, %control, "episode started");

        if let Some((target, class)) = animation {
            self.inner.apply_class(&target, &class);
        }
        if let Some(action) = action {
            action(CompletionHandle {
                inner: Arc::downgrade(&self.inner),
                id,
            });
        }
        self.inner.settle_check();
        GestureOutcome::Started(id)
    }

    /// Deliver an animation-end signal for `target`.
    ///
    /// Returns whether a watch consumed the signal; on `true` the host
    /// should stop the platform event from propagating further. The class is
    /// removed from the target before any episode validity check, so visual
    /// cleanup happens even for superseded episodes.
    pub fn animation_ended(&self, target: &TargetId) -> bool {
        let watch = self.inner.state.lock().watches.remove(target);
        let Some(watch) = watch else {
            return false;
        };
        match watch {
            Watch::Episode { id, class } => {
                self.inner.remove_class(target, &class);
                let settlement = self.inner.state.lock().slot.complete_animation(id);
                if let Some(settlement) = settlement {
                    self.inner.fire(settlement, id);
                }
            }
            Watch::Decorative { class, on_end } => {
                self.inner.remove_class(target, &class);
                if let Some(on_end) = on_end {
                    on_end();
                }
            }
        }
        true
    }

    /// Report the action's completion for episode `id`.
    ///
    /// Actions normally report through their [`CompletionHandle`]; this
    /// entry point exists for hosts that route completion through their own
    /// plumbing. A stale id is dropped silently.
    pub fn report_action_done(&self, id: EpisodeId, result: R) {
        self.inner.report_action_done(id, result);
    }

    /// Start a decorative animation on `target`, outside episode semantics.
    ///
    /// No suppression, no exclusivity: retriggering replaces the target's
    /// watch, and animations on distinct targets run concurrently.
    pub fn play_animation(&self, target: TargetId, class: AnimationClass) {
        self.start_decorative(target, class, None);
    }

    /// Like [`play_animation`](Self::play_animation), invoking `on_end` when
    /// the host reports the animation finished.
    pub fn play_animation_then(
        &self,
        target: TargetId,
        class: AnimationClass,
        on_end: impl FnOnce() + Send + 'static,
    ) {
        self.start_decorative(target, class, Some(Box::new(on_end)));
    }

    fn start_decorative(
        &self,
        target: TargetId,
        class: AnimationClass,
        on_end: Option<Box<dyn FnOnce() + Send>>,
    ) {
        self.inner.state.lock().watches.insert(
            target.clone(),
            Watch::Decorative {
                class: class.clone(),
                on_end,
            },
        );
        self.inner.apply_class(&target, &class);
    }

    /// The in-flight episode's status, if any.
    pub fn active_episode(&self) -> Option<EpisodeStatus> {
        let state = self.inner.state.lock();
        state.slot.active().map(|episode| EpisodeStatus {
            id: episode.id(),
            animation_done: episode.animation_done(),
            action_done: episode.action_done(),
        })
    }
}
