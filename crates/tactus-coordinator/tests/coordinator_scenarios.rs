//! End-to-end coordinator scenarios over deterministic testkit handlers.

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tactus_coordinator::{ClickBinding, ClickCoordinator, CompletionHandle, GestureOutcome};
use tactus_core::{AnimationClass, ControlId, TargetId, SUPPRESSION_WINDOW_MS};
use tactus_testkit::{ClassChangeKind, ManualClock, RecordingSurface, SettlementProbe};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

struct Rig<R> {
    clock: Arc<ManualClock>,
    surface: Arc<RecordingSurface>,
    coordinator: ClickCoordinator<R>,
}

impl<R: Send + 'static> Rig<R> {
    fn new() -> Self {
        init_tracing();
        let clock = Arc::new(ManualClock::new());
        let surface = Arc::new(RecordingSurface::new());
        let coordinator = ClickCoordinator::new(clock.clone(), surface.clone());
        Self {
            clock,
            surface,
            coordinator,
        }
    }
}

/// Collects the completion handles an action receives, so the test can
/// complete them at chosen moments.
struct HandleBin<R>(Arc<Mutex<Vec<CompletionHandle<R>>>>);

impl<R: Send + 'static> HandleBin<R> {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn action(&self) -> impl Fn(CompletionHandle<R>) + Send + Sync + 'static {
        let handles = Arc::clone(&self.0);
        move |handle| handles.lock().unwrap().push(handle)
    }

    fn take(&self) -> CompletionHandle<R> {
        self.0.lock().unwrap().remove(0)
    }

    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

fn started(outcome: GestureOutcome) -> tactus_core::EpisodeId {
    match outcome {
        GestureOutcome::Started(id) => id,
        other => panic!("expected a started episode, got {other:?}"),
    }
}

#[test]
fn test_settles_once_regardless_of_signal_order() {
    for action_first in [false, true] {
        let rig: Rig<u32> = Rig::new();
        let control = ControlId::from("save");
        let target = TargetId::from("save");
        let probe = SettlementProbe::new();
        let bin = HandleBin::new();
        rig.coordinator.bind(
            control.clone(),
            ClickBinding::new(target.clone())
                .with_animation(AnimationClass::from("animate-button-click"))
                .with_action(bin.action())
                .on_settled(probe.hook()),
        );

        started(rig.coordinator.trigger(&control));
        if action_first {
            bin.take().complete(42);
            assert_eq!(probe.count(), 0);
            rig.coordinator.animation_ended(&target);
        } else {
            rig.coordinator.animation_ended(&target);
            assert_eq!(probe.count(), 0);
            bin.take().complete(42);
        }

        assert_eq!(probe.results(), vec![Some(42)]);
        assert!(rig.coordinator.active_episode().is_none());
    }
}

#[test]
fn test_stale_signals_after_settlement_do_nothing() {
    let rig: Rig<u32> = Rig::new();
    let control = ControlId::from("save");
    let target = TargetId::from("save");
    let probe = SettlementProbe::new();
    let bin = HandleBin::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(target.clone())
            .with_animation(AnimationClass::from("animate-button-click"))
            .with_action(bin.action())
            .on_settled(probe.hook()),
    );

    let id = started(rig.coordinator.trigger(&control));
    rig.coordinator.animation_ended(&target);
    bin.take().complete(1);
    assert_eq!(probe.count(), 1);

    // The episode is gone; repeats of both signals fall on the floor.
    rig.coordinator.report_action_done(id, 2);
    assert!(!rig.coordinator.animation_ended(&target));
    assert_eq!(probe.results(), vec![Some(1)]);
}

#[test]
fn test_bare_binding_settles_synchronously_with_no_result() {
    let rig: Rig<u32> = Rig::new();
    let control = ControlId::from("menu-item");
    let probe = SettlementProbe::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(TargetId::from("menu-item")).on_settled(probe.hook()),
    );

    started(rig.coordinator.trigger(&control));
    assert_eq!(probe.results(), vec![None]);
    assert!(rig.coordinator.active_episode().is_none());
}

#[test]
fn test_rapid_second_gesture_is_suppressed() {
    let rig: Rig<u32> = Rig::new();
    let control = ControlId::from("reply");
    let target = TargetId::from("reply");
    let probe = SettlementProbe::new();
    let bin = HandleBin::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(target.clone())
            .with_animation(AnimationClass::from("animate-button-click"))
            .with_action(bin.action())
            .on_settled(probe.hook()),
    );

    started(rig.coordinator.trigger(&control));
    rig.clock.advance(100);
    assert_eq!(rig.coordinator.trigger(&control), GestureOutcome::Suppressed);
    // The double click started no second action.
    assert_eq!(bin.len(), 1);

    rig.coordinator.animation_ended(&target);
    bin.take().complete(7);
    assert_eq!(probe.results(), vec![Some(7)]);
}

#[test]
fn test_gesture_past_window_supersedes_stuck_episode() {
    let rig: Rig<u32> = Rig::new();
    let control = ControlId::from("reply");
    let target = TargetId::from("reply");
    let probe = SettlementProbe::new();
    let bin = HandleBin::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(target.clone())
            .with_animation(AnimationClass::from("animate-button-click"))
            .with_action(bin.action())
            .on_settled(probe.hook()),
    );

    // First episode never hears back from animation or action.
    let first = started(rig.coordinator.trigger(&control));
    let stuck = bin.take();

    rig.clock.advance(SUPPRESSION_WINDOW_MS + 600);
    let second = started(rig.coordinator.trigger(&control));
    assert_ne!(first, second);
    assert_eq!(rig.coordinator.active_episode().map(|s| s.id), Some(second));

    // The stuck episode's late report self-discards; its callback never ran.
    stuck.complete(1);
    assert_eq!(probe.count(), 0);
    assert_eq!(rig.coordinator.active_episode().map(|s| s.id), Some(second));

    // The successor settles on its own signals.
    rig.coordinator.animation_ended(&target);
    bin.take().complete(2);
    assert_eq!(probe.results(), vec![Some(2)]);
}

#[test]
fn test_synchronous_action_report_inside_gesture() {
    let rig: Rig<Value> = Rig::new();
    let control = ControlId::from("menu-close");
    let target = TargetId::from("menu-div");
    let probe = SettlementProbe::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(target.clone())
            .with_animation(AnimationClass::from("animate-menu-hide"))
            .with_action(|handle| handle.complete(Value::Null))
            .on_settled(probe.hook()),
    );

    // The action reported during the gesture; settlement still waits for
    // the animation.
    started(rig.coordinator.trigger(&control));
    let status = rig.coordinator.active_episode().unwrap();
    assert!(status.action_done);
    assert!(!status.animation_done);
    assert_eq!(probe.count(), 0);

    rig.coordinator.animation_ended(&target);
    assert_eq!(probe.results(), vec![Some(Value::Null)]);
}

#[test]
fn test_animation_class_lifecycle_on_surface() {
    let rig: Rig<u32> = Rig::new();
    let control = ControlId::from("save");
    let target = TargetId::from("save");
    let class = AnimationClass::from("animate-button-click");
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(target.clone()).with_animation(class.clone()),
    );

    started(rig.coordinator.trigger(&control));
    assert!(rig.surface.has_class(&target, &class));

    rig.coordinator.animation_ended(&target);
    assert!(!rig.surface.has_class(&target, &class));

    let kinds: Vec<_> = rig.surface.changes().into_iter().map(|c| c.kind).collect();
    assert_eq!(kinds, [ClassChangeKind::Applied, ClassChangeKind::Removed]);
}

/// The worked timing scenario: a 300 ms animation joined with a 500 ms
/// action, an early double click, and a fresh click after the window.
#[test]
fn test_fade_and_fetch_timeline() {
    let rig: Rig<Value> = Rig::new();
    let control = ControlId::from("fetch");
    let target = TargetId::from("fetch");
    let probe = SettlementProbe::new();
    let bin = HandleBin::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(target.clone())
            .with_animation(AnimationClass::from("fade"))
            .with_action(bin.action())
            .on_settled(probe.hook()),
    );

    // t=0: click starts the episode.
    started(rig.coordinator.trigger(&control));

    // t=100: double click, ignored.
    rig.clock.advance(100);
    assert_eq!(rig.coordinator.trigger(&control), GestureOutcome::Suppressed);

    // t=300: animation ends; no settlement yet.
    rig.clock.advance(200);
    rig.coordinator.animation_ended(&target);
    let status = rig.coordinator.active_episode().unwrap();
    assert!(status.animation_done);
    assert!(!status.action_done);
    assert_eq!(probe.count(), 0);

    // t=500: action reports; settlement fires once.
    rig.clock.advance(200);
    bin.take().complete(json!({ "success": true }));
    assert_eq!(probe.results(), vec![Some(json!({ "success": true }))]);

    // t=2600: well past the window, a fresh episode starts.
    rig.clock.advance(2100);
    started(rig.coordinator.trigger(&control));
}

#[test]
fn test_episode_and_decorative_watches_coexist() {
    let rig: Rig<u32> = Rig::new();
    let control = ControlId::from("save");
    let button = TargetId::from("save");
    let banner = TargetId::from("banner");
    let click_class = AnimationClass::from("animate-button-click");
    let flash_class = AnimationClass::from("animate-flash");
    let probe = SettlementProbe::new();
    let bin = HandleBin::new();
    rig.coordinator.bind(
        control.clone(),
        ClickBinding::new(button.clone())
            .with_animation(click_class.clone())
            .with_action(bin.action())
            .on_settled(probe.hook()),
    );

    let flashed = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&flashed);
    started(rig.coordinator.trigger(&control));
    rig.coordinator
        .play_animation_then(banner.clone(), flash_class.clone(), move || {
            *flag.lock().unwrap() = true;
        });
    assert!(rig.surface.has_class(&button, &click_class));
    assert!(rig.surface.has_class(&banner, &flash_class));

    // Each end signal resolves against its own target's watch.
    assert!(rig.coordinator.animation_ended(&banner));
    assert!(*flashed.lock().unwrap());
    assert_eq!(probe.count(), 0);
    assert!(rig.coordinator.active_episode().is_some());

    assert!(rig.coordinator.animation_ended(&button));
    bin.take().complete(9);
    assert_eq!(probe.results(), vec![Some(9)]);
}

#[tokio::test]
async fn test_action_completing_from_spawned_task() {
    init_tracing();
    let clock = Arc::new(ManualClock::new());
    let surface = Arc::new(RecordingSurface::new());
    let coordinator: ClickCoordinator<bool> = ClickCoordinator::new(clock, surface);
    let control = ControlId::from("submit");

    let (done_tx, done_rx) = tokio::sync::oneshot::channel();
    let done_tx = Mutex::new(Some(done_tx));
    coordinator.bind(
        control.clone(),
        ClickBinding::new(TargetId::from("submit"))
            .with_action(|handle| {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    handle.complete(true);
                });
            })
            .on_settled(move |result| {
                if let Some(done_tx) = done_tx.lock().unwrap().take() {
                    let _ = done_tx.send(result);
                }
            }),
    );

    coordinator.trigger(&control);
    let result = tokio::time::timeout(Duration::from_secs(1), done_rx)
        .await
        .expect("settlement before timeout")
        .expect("settlement callback ran");
    assert_eq!(result, Some(true));
}
