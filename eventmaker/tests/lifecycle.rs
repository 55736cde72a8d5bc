use eventmaker::{
    CONNECT_EVENT, DISCONNECT_EVENT, Emission, EmitError, EventMaker, Status, Value, args,
    testing::{FailingHandler, ManualScheduler, RecordingHandler},
};
use std::{sync::Arc, time::Duration};

mod common;
use common::manual_engine;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

// ============================================================================
// Idle timer
// ============================================================================

#[test]
fn test_idle_timer_disconnects_and_notifies() {
    let (engine, scheduler) = manual_engine();
    let h = RecordingHandler::new();
    engine.on(DISCONNECT_EVENT, h.clone());

    engine.set_idle_disconnect_after(ms(100));
    scheduler.advance(ms(99));
    assert!(engine.is_idling());

    scheduler.advance(ms(1));
    assert!(engine.is_disconnected());
    assert_eq!(h.count(), 1);

    let calls = h.calls_as::<EventMaker>();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].to_string(), "EventMaker(test)");
}

#[test]
fn test_disconnect_keeps_armed_countdown() {
    let (engine, scheduler) = manual_engine();
    engine.set_idle_disconnect_after(ms(100));

    scheduler.advance(ms(10));
    engine.disconnect().unwrap();
    assert_eq!(scheduler.pending(), 1);

    scheduler.advance(ms(10));
    engine.connect().unwrap();
    assert_eq!(scheduler.pending(), 2);

    // The countdown armed before the disconnect still fires on schedule.
    scheduler.advance(ms(79));
    assert!(engine.is_idling());
    scheduler.advance(ms(1));
    assert!(engine.is_disconnected());
}

#[test]
fn test_delivered_emission_restarts_countdown() {
    let (engine, scheduler) = manual_engine();
    engine.on("e", |_: &[Value]| {});
    engine.set_idle_disconnect_after(ms(100));

    scheduler.advance(ms(60));
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Delivered(1));

    scheduler.advance(ms(60));
    assert!(engine.is_idling());

    scheduler.advance(ms(40));
    assert!(engine.is_disconnected());
}

#[test]
fn test_empty_delivery_does_not_restart_countdown() {
    let (engine, scheduler) = manual_engine();
    engine.on("e", |_: &[Value]| {});
    engine.set_idle_disconnect_after(ms(100));

    scheduler.advance(ms(50));
    engine.remove_all_listeners();
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Delivered(0));

    scheduler.advance(ms(50));
    assert!(engine.is_disconnected());
}

#[test]
fn test_setting_idle_duration_replaces_previous_timer() {
    let (engine, scheduler) = manual_engine();
    engine.set_idle_disconnect_after(ms(100));
    engine.set_idle_disconnect_after(ms(300));
    assert_eq!(scheduler.pending(), 1);

    scheduler.advance(ms(200));
    assert!(engine.is_idling());

    scheduler.advance(ms(100));
    assert!(engine.is_disconnected());
    assert_eq!(engine.idle_disconnect_after(), Some(ms(300)));
}

#[test]
fn test_malformed_millis_keeps_duration_but_restarts() {
    let (engine, scheduler) = manual_engine();
    engine.set_idle_disconnect_after_millis(100.0);
    assert_eq!(engine.idle_disconnect_after(), Some(ms(100)));

    scheduler.advance(ms(60));
    engine
        .set_idle_disconnect_after_millis(f64::NAN)
        .set_idle_disconnect_after_millis(f64::INFINITY);
    assert_eq!(engine.idle_disconnect_after(), Some(ms(100)));

    scheduler.advance(ms(40));
    assert!(engine.is_idling());

    scheduler.advance(ms(60));
    assert!(engine.is_disconnected());
}

#[test]
fn test_negative_millis_disconnects_immediately() {
    let (engine, scheduler) = manual_engine();
    engine.set_idle_disconnect_after_millis(-5.0);
    assert_eq!(engine.idle_disconnect_after(), Some(Duration::ZERO));

    scheduler.advance(Duration::ZERO);
    assert!(engine.is_disconnected());
}

#[test]
fn test_malformed_millis_without_duration_does_nothing() {
    let (engine, scheduler) = manual_engine();
    engine.set_idle_disconnect_after_millis(f64::INFINITY);

    assert_eq!(engine.idle_disconnect_after(), None);
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_builder_arms_idle_timer() {
    let scheduler = Arc::new(ManualScheduler::new());
    let engine = EventMaker::builder()
        .scheduler(scheduler.clone())
        .idle_disconnect_after(ms(100))
        .build();

    assert_eq!(engine.idle_disconnect_after(), Some(ms(100)));
    scheduler.advance(ms(100));
    assert_eq!(engine.status(), Status::Disconnected);
}

// ============================================================================
// Gating
// ============================================================================

#[test]
fn test_disconnected_engine_rejects_when_listeners_exist() {
    let (engine, _) = manual_engine();
    let h = RecordingHandler::new();
    engine.on("e", h.clone());

    engine.disconnect().unwrap();
    assert_eq!(engine.emit("e", args![1_i32]).unwrap(), Emission::Rejected);
    assert_eq!(h.count(), 0);
    assert!(engine.is_disconnected());
}

#[test]
fn test_disconnected_engine_without_listeners_still_emits() {
    let (engine, _) = manual_engine();
    let h = RecordingHandler::new();
    engine.on("e", h.clone());

    engine.disconnect().unwrap();
    engine.remove_all_listeners();
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Delivered(0));
    assert!(engine.is_disconnected());
}

#[test]
fn test_disconnect_from_listener_sticks() {
    let (engine, _) = manual_engine();
    let inner = engine.clone();
    engine.on("shutdown", move |_: &[Value]| inner.disconnect());

    assert_eq!(
        engine.emit("shutdown", args![]).unwrap(),
        Emission::Delivered(1)
    );
    assert!(engine.is_disconnected());
}

// ============================================================================
// Connect / disconnect
// ============================================================================

#[test]
fn test_disconnect_notifies_then_switches() {
    let (engine, _) = manual_engine();
    let statuses = Arc::new(std::sync::Mutex::new(Vec::new()));

    let probe = engine.clone();
    let seen = statuses.clone();
    engine.on(DISCONNECT_EVENT, move |_: &[Value]| {
        seen.lock().unwrap().push(probe.status());
    });

    engine.disconnect().unwrap();
    assert_eq!(*statuses.lock().unwrap(), vec![Status::Processing]);
    assert!(engine.is_disconnected());
}

#[test]
fn test_connect_from_idle_notifies() {
    let (engine, _) = manual_engine();
    let h = RecordingHandler::new();
    engine.on(CONNECT_EVENT, h.clone());

    engine.connect().unwrap();
    assert_eq!(h.count(), 1);
    assert_eq!(h.calls_as::<EventMaker>()[0][0].to_string(), "EventMaker(test)");
    assert!(engine.is_idling());
}

#[test]
fn test_connect_while_disconnected_is_not_announced() {
    let (engine, _) = manual_engine();
    let h = RecordingHandler::new();
    engine.on(CONNECT_EVENT, h.clone());

    engine.disconnect().unwrap();
    engine.connect().unwrap();

    // The notification is gated like any other emission.
    assert_eq!(h.count(), 0);
    assert!(engine.is_idling());
    assert_eq!(engine.emit(CONNECT_EVENT, args![]).unwrap(), Emission::Delivered(1));
}

#[test]
fn test_connect_restarts_idle_timer() {
    let (engine, scheduler) = manual_engine();
    engine.set_idle_disconnect_after(ms(100));
    engine.disconnect().unwrap();

    scheduler.advance(ms(500));
    assert_eq!(scheduler.pending(), 0);
    engine.connect().unwrap();
    assert_eq!(scheduler.pending(), 1);

    scheduler.advance(ms(100));
    assert!(engine.is_disconnected());
}

#[test]
fn test_failing_lifecycle_listener_still_transitions() {
    let (engine, _) = manual_engine();
    let failing = FailingHandler::new("refused");
    engine.on(DISCONNECT_EVENT, failing.clone());

    let err = engine.disconnect().unwrap_err();
    assert!(matches!(err, EmitError::Listener { .. }));
    assert_eq!(err.event(), DISCONNECT_EVENT);
    assert!(engine.is_disconnected());
    assert_eq!(failing.count(), 1);
}

#[test]
fn test_delayed_transitions() {
    let (engine, scheduler) = manual_engine();

    engine.disconnect_after(ms(50));
    scheduler.advance(ms(49));
    assert!(engine.is_idling());
    scheduler.advance(ms(1));
    assert!(engine.is_disconnected());

    engine.connect_after(ms(30));
    scheduler.advance(ms(29));
    assert!(engine.is_disconnected());
    scheduler.advance(ms(1));
    assert!(engine.is_idling());
}

#[test]
fn test_reconnect_after_idle_disconnect_resumes_delivery() {
    let (engine, scheduler) = manual_engine();
    let h = RecordingHandler::new();
    engine.on("e", h.clone());
    engine.set_idle_disconnect_after(ms(100));

    scheduler.advance(ms(100));
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Rejected);

    engine.connect_after(ms(10));
    scheduler.advance(ms(10));
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Delivered(1));
    assert_eq!(h.count(), 1);
}
