//! Architectural Contract Test: Delivery Failure Isolation
//!
//! This test verifies that a broken notification channel NEVER stops the
//! polling loop or changes what the loop decides to send.
//!
//! Constraints verified:
//! - A failed delivery is swallowed; the next cycle polls as usual
//! - An error notification counts as sent on the attempt, even when
//!   delivery fails
//! - Failed deliveries surface on the event stream
//!
//! If this test fails, someone has added:
//! - Delivery retries or error propagation at the loop layer
//! - Delivery-success tracking into the error deduplicator

mod common;

use common::*;
use revwatch_core::{EngineEvent, Error, RevwatchEngine};

#[tokio::test]
async fn delivery_failure_does_not_stop_the_loop() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, _event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    source.push_response(Ok(payload(vec![homework("hw1", "reviewing")])));
    source.push_response(Ok(payload(vec![homework("hw2", "reviewing")])));

    // First delivery fails, second succeeds
    notifier.set_failing(true);
    engine.run_cycle().await;

    notifier.set_failing(false);
    engine.run_cycle().await;

    let fetches = source.fetch_call_count();
    assert_eq!(
        fetches, 2,
        "Expected polling to continue after a failed delivery, got {} fetches",
        fetches
    );
    assert_eq!(notifier.send_call_count(), 2);
    assert_eq!(
        notifier.sent_messages(),
        vec![
            "Изменился статус проверки работы \"hw2\". \
             Работа взята на проверку ревьюером."
        ]
    );
}

#[tokio::test]
async fn failed_error_notification_still_counts_as_sent() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, _event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    source.push_response(Err(Error::endpoint_unavailable(
        "Эндпоинт недоступен, код ответа: 503",
    )));
    source.push_response(Err(Error::endpoint_unavailable(
        "Эндпоинт недоступен, код ответа: 503",
    )));

    // The delivery attempt fails, but the error is marked notified anyway
    notifier.set_failing(true);
    engine.run_cycle().await;

    // Channel recovers; the repeat is already suppressed
    notifier.set_failing(false);
    engine.run_cycle().await;

    let attempts = notifier.send_call_count();
    assert_eq!(
        attempts, 1,
        "Expected 1 delivery attempt for a repeated error, got {}",
        attempts
    );
    assert!(notifier.sent_messages().is_empty());
}

#[tokio::test]
async fn failed_delivery_is_emitted_as_an_event() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, mut event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    source.push_response(Ok(payload(vec![homework("hw1", "approved")])));

    notifier.set_failing(true);
    engine.run_cycle().await;

    let events = drain_events(&mut event_rx);
    assert!(
        events.contains(&EngineEvent::NotificationFailed {
            error: "connection refused".to_string(),
        }),
        "Expected a NotificationFailed event, got {:?}",
        events
    );
}
