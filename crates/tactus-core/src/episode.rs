//! The episode state machine.
//!
//! An episode is one click cycle: gesture, animation plus action, settlement.
//! The slot holds at most one episode and is the single piece of shared
//! mutable state in the system. All three mutation sites (gesture start,
//! animation signal, action report) are expressed as transitions here, each
//! guarded by episode-id comparison, so the at-most-one and exactly-once
//! invariants live in this type rather than in caller convention.
//!
//! # Episode Laws
//! - `begin` replaces the slot content; callers gate it with `can_start`
//! - `complete_*` with a non-current id returns `None` and mutates nothing
//! - settlement is produced exactly once, in the same call that first
//!   observes both completion flags, and empties the slot before returning

use crate::identifiers::EpisodeId;
use std::fmt;
use std::sync::Arc;

/// Duration in milliseconds for which an unsettled episode suppresses new
/// gestures on the same coordinator.
///
/// A control whose animation or action never signals completion would
/// otherwise be wedged forever; once this window has elapsed since episode
/// start, a new gesture may supersede the stuck episode. The superseded
/// episode's late signals fail the id guard and its callback never fires.
pub const SUPPRESSION_WINDOW_MS: u64 = 2000;

/// Settlement callback, invoked with the action's reported result
/// (`None` when the episode had no action).
pub type SettleFn<R> = Arc<dyn Fn(Option<R>) + Send + Sync>;

/// The output of a settling transition: the captured callback and the
/// action's result, handed back so the caller can invoke user code outside
/// any lock it holds around the slot.
pub struct Settlement<R> {
    result: Option<R>,
    on_settled: Option<SettleFn<R>>,
}

impl<R> Settlement<R> {
    /// Invoke the settlement callback, if one was bound.
    pub fn fire(self) {
        if let Some(on_settled) = self.on_settled {
            on_settled(self.result);
        }
    }

    /// The result the settling action reported, if any.
    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }
}

impl<R> fmt::Debug for Settlement<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settlement")
            .field("has_result", &self.result.is_some())
            .field("has_callback", &self.on_settled.is_some())
            .finish()
    }
}

/// One in-flight click episode.
pub struct Episode<R> {
    id: EpisodeId,
    started_at_ms: u64,
    animation_done: bool,
    action_done: bool,
    result: Option<R>,
    on_settled: Option<SettleFn<R>>,
}

impl<R> Episode<R> {
    /// The episode's id.
    pub fn id(&self) -> EpisodeId {
        self.id
    }

    /// Clock reading at episode start.
    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// Whether the animation has signaled completion (immediately true for
    /// episodes bound without an animation class).
    pub fn animation_done(&self) -> bool {
        self.animation_done
    }

    /// Whether the action has reported completion (immediately true for
    /// episodes bound without an action).
    pub fn action_done(&self) -> bool {
        self.action_done
    }

    fn suppression_deadline(&self) -> u64 {
        self.started_at_ms.saturating_add(SUPPRESSION_WINDOW_MS)
    }
}

impl<R> fmt::Debug for Episode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Episode")
            .field("id", &self.id)
            .field("started_at_ms", &self.started_at_ms)
            .field("animation_done", &self.animation_done)
            .field("action_done", &self.action_done)
            .field("has_result", &self.result.is_some())
            .finish()
    }
}

/// The active-episode slot: `Idle`, or `Active` with exactly one episode.
#[derive(Debug)]
pub enum EpisodeSlot<R> {
    /// No episode in flight.
    Idle,
    /// One episode in flight.
    Active(Episode<R>),
}

impl<R> Default for EpisodeSlot<R> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<R> EpisodeSlot<R> {
    /// Create an idle slot.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Whether no episode is in flight.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The in-flight episode, if any.
    pub fn active(&self) -> Option<&Episode<R>> {
        match self {
            Self::Idle => None,
            Self::Active(episode) => Some(episode),
        }
    }

    /// The in-flight episode's id, if any.
    pub fn active_id(&self) -> Option<EpisodeId> {
        self.active().map(Episode::id)
    }

    /// Whether a gesture arriving at `now_ms` may start a new episode.
    ///
    /// True when the slot is idle, or when the in-flight episode started at
    /// least [`SUPPRESSION_WINDOW_MS`] ago. The comparison is strict on the
    /// suppressed side: a gesture landing exactly on the deadline starts a
    /// new episode.
    pub fn can_start(&self, now_ms: u64) -> bool {
        match self {
            Self::Idle => true,
            Self::Active(episode) => now_ms >= episode.suppression_deadline(),
        }
    }

    /// Start a new episode, replacing whatever the slot held.
    ///
    /// Callers gate this with [`can_start`](Self::can_start); the replace is
    /// unconditional so that a post-window gesture supersedes a stuck
    /// episode. A completion flag starts `true` when the corresponding
    /// collaborator is absent, so an episode bound with neither animation
    /// nor action settles on the first settlement check.
    pub fn begin(
        &mut self,
        now_ms: u64,
        has_animation: bool,
        has_action: bool,
        on_settled: Option<SettleFn<R>>,
    ) -> EpisodeId {
        let id = EpisodeId::fresh();
        *self = Self::Active(Episode {
            id,
            started_at_ms: now_ms,
            animation_done: !has_animation,
            action_done: !has_action,
            result: None,
            on_settled,
        });
        id
    }

    /// Record that the animation scoped to `id` has ended.
    ///
    /// Returns the settlement when this signal completes the episode. A
    /// stale id (superseded or already-settled episode) is a silent no-op.
    pub fn complete_animation(&mut self, id: EpisodeId) -> Option<Settlement<R>> {
        match self {
            Self::Active(episode) if episode.id == id => {
                episode.animation_done = true;
                self.try_settle()
            }
            _ => None,
        }
    }

    /// Record the action's completion report for episode `id`.
    ///
    /// Returns the settlement when this report completes the episode. A
    /// stale id is a silent no-op and `result` is discarded, which is how an
    /// action that raced past the suppression window self-discards.
    pub fn complete_action(&mut self, id: EpisodeId, result: R) -> Option<Settlement<R>> {
        match self {
            Self::Active(episode) if episode.id == id => {
                episode.action_done = true;
                episode.result = Some(result);
                self.try_settle()
            }
            _ => None,
        }
    }

    /// Settle if both completion flags hold, emptying the slot.
    ///
    /// This is the only path that produces a [`Settlement`]; because it
    /// empties the slot before returning, a settlement is produced at most
    /// once per episode.
    pub fn try_settle(&mut self) -> Option<Settlement<R>> {
        let ready = matches!(
            self,
            Self::Active(episode) if episode.animation_done && episode.action_done
        );
        if !ready {
            return None;
        }
        match std::mem::replace(self, Self::Idle) {
            Self::Active(episode) => Some(Settlement {
                result: episode.result,
                on_settled: episode.on_settled,
            }),
            Self::Idle => None,
        }
    }
}
