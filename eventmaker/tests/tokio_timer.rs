use eventmaker::{DISCONNECT_EVENT, Emission, EventMaker, Value, args, testing::RecordingHandler};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn test_default_scheduler_disconnects_when_idle() {
    let engine = EventMaker::builder().name("tokio").build();
    let h = RecordingHandler::new();
    engine.on(DISCONNECT_EVENT, h.clone());

    engine.set_idle_disconnect_after(Duration::from_millis(100));

    sleep(Duration::from_millis(50)).await;
    assert!(engine.is_idling());

    sleep(Duration::from_millis(60)).await;
    assert!(engine.is_disconnected());
    assert_eq!(h.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_default_scheduler_countdown_resets() {
    let engine = EventMaker::new();
    engine.on("e", |_: &[Value]| {});
    engine.set_idle_disconnect_after(Duration::from_millis(100));

    sleep(Duration::from_millis(70)).await;
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Delivered(1));

    sleep(Duration::from_millis(70)).await;
    assert!(engine.is_idling());

    sleep(Duration::from_millis(40)).await;
    assert!(engine.is_disconnected());
}

#[tokio::test(start_paused = true)]
async fn test_default_scheduler_delayed_connect() {
    let engine = EventMaker::new();
    engine.disconnect().unwrap();

    engine.connect_after(Duration::from_millis(20));
    sleep(Duration::from_millis(10)).await;
    assert!(engine.is_disconnected());

    sleep(Duration::from_millis(20)).await;
    assert!(engine.is_idling());
}

#[test]
fn test_engine_works_without_runtime() {
    let engine = EventMaker::new();
    let h = RecordingHandler::new();
    engine.on("e", h.clone());

    // Timers are dropped outside a runtime; dispatch is unaffected.
    engine.set_idle_disconnect_after(Duration::from_millis(1));
    assert_eq!(engine.emit("e", args![]).unwrap(), Emission::Delivered(1));
    assert!(engine.is_idling());
}
