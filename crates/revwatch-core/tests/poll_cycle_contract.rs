//! Architectural Contract Test: Poll Cycle Discipline
//!
//! This test verifies the fixed shape of one poll cycle: one fetch per
//! cycle, cursor advancement on every path, and honest cycle events.
//!
//! Constraints verified:
//! - Exactly one fetch per cycle, carrying the current cursor
//! - The cursor advances after failed cycles too, never backwards
//! - A quiet cycle completes cleanly with zero changes
//! - CycleCompleted reports how many notifications the cycle produced
//!
//! If this test fails, someone has added:
//! - Retry loops inside a cycle
//! - Conditional cursor advancement

mod common;

use common::*;
use revwatch_core::{EngineEvent, Error, RevwatchEngine};

#[tokio::test]
async fn each_cycle_fetches_exactly_once() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, _event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    engine.run_cycle().await;
    engine.run_cycle().await;
    engine.run_cycle().await;

    let fetches = source.fetch_call_count();
    assert_eq!(
        fetches, 3,
        "Expected 1 fetch per cycle over 3 cycles, got {}",
        fetches
    );
}

#[tokio::test]
async fn cursor_advances_even_after_failed_cycles() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, _event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    let initial_cursor = engine.cursor();

    source.push_response(Err(Error::endpoint_unavailable(
        "Эндпоинт недоступен, код ответа: 503",
    )));
    source.push_response(Ok(payload(vec![])));

    engine.run_cycle().await;
    let after_failure = engine.cursor();
    engine.run_cycle().await;

    // The first poll used the construction-time cursor
    let cursors = source.recorded_cursors();
    assert_eq!(cursors[0], initial_cursor);

    // Monotonic-or-equal advancement, failure or not
    assert!(after_failure >= initial_cursor);
    assert!(cursors[1] >= cursors[0]);
    assert!(engine.cursor() >= after_failure);
}

#[tokio::test]
async fn quiet_cycle_completes_with_zero_changes() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, mut event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    source.push_response(Ok(payload(vec![])));

    engine.run_cycle().await;

    assert_eq!(notifier.send_call_count(), 0);

    let events = drain_events(&mut event_rx);
    assert!(
        events.contains(&EngineEvent::CycleCompleted { changes: 0 }),
        "Expected a zero-change CycleCompleted event, got {:?}",
        events
    );
}

#[tokio::test]
async fn cycle_completed_counts_notifications() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, mut event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    source.push_response(Ok(payload(vec![
        homework("hw1", "reviewing"),
        homework("hw2", "approved"),
    ])));

    engine.run_cycle().await;

    let events = drain_events(&mut event_rx);
    assert!(
        events.contains(&EngineEvent::CycleCompleted { changes: 2 }),
        "Expected CycleCompleted with 2 changes, got {:?}",
        events
    );
}

#[tokio::test]
async fn failed_cycle_never_emits_cycle_completed() {
    let source = ScriptedSource::new();
    let notifier = RecordingNotifier::new();

    let (mut engine, mut event_rx) = RevwatchEngine::new(
        Box::new(ScriptedSource::sharing_counters_with(&source)),
        Box::new(RecordingNotifier::sharing_counters_with(&notifier)),
        minimal_config(),
    )
    .expect("engine construction succeeds");

    source.push_response(Err(Error::endpoint_unavailable(
        "Эндпоинт недоступен, код ответа: 503",
    )));

    engine.run_cycle().await;

    let events = drain_events(&mut event_rx);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, EngineEvent::CycleCompleted { .. })),
        "A failed cycle must not report completion, got {:?}",
        events
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, EngineEvent::CycleFailed { .. })),
        "Expected a CycleFailed event, got {:?}",
        events
    );
}
