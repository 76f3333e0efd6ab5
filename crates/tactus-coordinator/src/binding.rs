//! Per-control binding descriptions.
//!
//! A binding names the animation target and optionally carries an animation
//! class, an action, and a settlement callback. Every part except the target
//! is optional, mirroring the call sites this serves: decorative-only
//! buttons bind just an animation, background submits bind just an action,
//! and menu items bind neither and settle synchronously.

use crate::coordinator::CompletionHandle;
use std::fmt;
use std::sync::Arc;
use tactus_core::{AnimationClass, SettleFn, TargetId};

/// Action closure invoked when an episode starts.
///
/// The action receives the episode's one-shot [`CompletionHandle`] and must
/// eventually call [`CompletionHandle::complete`] exactly once, on success
/// and failure paths alike; an application-level failure is reported as a
/// result value, never by skipping the report. An action that never
/// completes leaves its episode unsettled until the suppression window lets
/// a later gesture supersede it.
pub type ActionFn<R> = Arc<dyn Fn(CompletionHandle<R>) + Send + Sync>;

/// What a bound control does when triggered.
pub struct ClickBinding<R> {
    pub(crate) target: TargetId,
    pub(crate) animation: Option<AnimationClass>,
    pub(crate) action: Option<ActionFn<R>>,
    pub(crate) on_settled: Option<SettleFn<R>>,
}

impl<R> ClickBinding<R> {
    /// Create a binding that animates `target`.
    ///
    /// The target is frequently the same host element as the control being
    /// bound (a button animating itself), but need not be (a close icon
    /// animating the menu panel it closes).
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            animation: None,
            action: None,
            on_settled: None,
        }
    }

    /// Animate the target with `class` for the duration of each episode.
    pub fn with_animation(mut self, class: AnimationClass) -> Self {
        self.animation = Some(class);
        self
    }

    /// Run `action` on each episode.
    pub fn with_action(
        mut self,
        action: impl Fn(CompletionHandle<R>) + Send + Sync + 'static,
    ) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    /// Invoke `callback` when each episode settles, with the action's
    /// reported result (`None` when the binding has no action).
    pub fn on_settled(mut self, callback: impl Fn(Option<R>) + Send + Sync + 'static) -> Self {
        self.on_settled = Some(Arc::new(callback));
        self
    }

    /// The binding's animation target.
    pub fn target(&self) -> &TargetId {
        &self.target
    }

    /// The binding's animation class, if any.
    pub fn animation(&self) -> Option<&AnimationClass> {
        self.animation.as_ref()
    }
}

impl<R> fmt::Debug for ClickBinding<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickBinding")
            .field("target", &self.target)
            .field("animation", &self.animation)
            .field("has_action", &self.action.is_some())
            .field("has_on_settled", &self.on_settled.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_empty() {
        let binding: ClickBinding<()> = ClickBinding::new(TargetId::from("panel"));
        assert_eq!(binding.target().as_str(), "panel");
        assert!(binding.animation().is_none());
        assert!(binding.action.is_none());
        assert!(binding.on_settled.is_none());
    }

    #[test]
    fn test_builder_sets_parts() {
        let binding: ClickBinding<u8> = ClickBinding::new(TargetId::from("panel"))
            .with_animation(AnimationClass::from("animate-panel-hide"))
            .with_action(|handle| handle.complete(1))
            .on_settled(|_| {});
        assert_eq!(
            binding.animation().map(AnimationClass::as_str),
            Some("animate-panel-hide")
        );
        assert!(binding.action.is_some());
        assert!(binding.on_settled.is_some());
    }
}
