//! Test doubles and common utilities for architecture contract tests
//!
//! This module provides minimal test doubles that verify architectural
//! constraints without implementing real functionality.

use revwatch_core::config::{EngineConfig, NotifierConfig, ReviewSourceConfig, RevwatchConfig};
use revwatch_core::{EngineEvent, Error, Notifier, Result, ReviewSource};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A review source that replays a scripted sequence of responses
///
/// Each `fetch()` call pops the next scripted outcome. When the script
/// runs dry the source returns an empty homework list, so extra cycles
/// behave like quiet polls instead of failing the test.
pub struct ScriptedSource {
    /// Scripted fetch outcomes, consumed front to back
    script: Arc<Mutex<VecDeque<Result<Value>>>>,
    /// Call counter for fetch()
    fetch_call_count: Arc<AtomicUsize>,
    /// Cursor value received by each fetch call
    recorded_cursors: Arc<Mutex<Vec<i64>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
            recorded_cursors: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue the next fetch outcome
    pub fn push_response(&self, response: Result<Value>) {
        self.script.lock().unwrap().push_back(response);
    }

    /// Get the number of times fetch() was called
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_call_count.load(Ordering::SeqCst)
    }

    /// Get the cursor values the engine polled with, in order
    pub fn recorded_cursors(&self) -> Vec<i64> {
        self.recorded_cursors.lock().unwrap().clone()
    }

    /// Create a new ScriptedSource that shares script and counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            script: Arc::clone(&other.script),
            fetch_call_count: Arc::clone(&other.fetch_call_count),
            recorded_cursors: Arc::clone(&other.recorded_cursors),
        }
    }
}

#[async_trait::async_trait]
impl ReviewSource for ScriptedSource {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        self.recorded_cursors.lock().unwrap().push(from_date);

        match self.script.lock().unwrap().pop_front() {
            Some(outcome) => outcome,
            None => Ok(json!({ "homeworks": [] })),
        }
    }

    fn source_name(&self) -> &'static str {
        "scripted"
    }
}

/// A notifier that records every delivery attempt
pub struct RecordingNotifier {
    /// Messages that were accepted (delivery succeeded)
    sent: Arc<Mutex<Vec<String>>>,
    /// Call counter for send(), successful or not
    send_call_count: Arc<AtomicUsize>,
    /// When set, every send() fails with a delivery error
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            send_call_count: Arc::new(AtomicUsize::new(0)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the messages that were delivered, in order
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    /// Get the number of times send() was called
    pub fn send_call_count(&self) -> usize {
        self.send_call_count.load(Ordering::SeqCst)
    }

    /// Make subsequent send() calls fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Create a new RecordingNotifier that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            sent: Arc::clone(&other.sent),
            send_call_count: Arc::clone(&other.send_call_count),
            failing: Arc::clone(&other.failing),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        self.send_call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::delivery("connection refused"));
        }

        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "recording"
    }
}

/// Helper to create a minimal RevwatchConfig for testing
pub fn minimal_config() -> RevwatchConfig {
    RevwatchConfig {
        source: ReviewSourceConfig::Practicum {
            endpoint: None,
            token: "test-token".to_string(),
        },
        notifier: NotifierConfig::Telegram {
            bot_token: "123456:test".to_string(),
            chat_id: "4242".to_string(),
        },
        engine: EngineConfig {
            poll_interval_secs: 600,
            event_channel_capacity: 100,
        },
    }
}

/// Build one homework record as the review API renders it
pub fn homework(name: &str, status: &str) -> Value {
    json!({ "homework_name": name, "status": status })
}

/// Wrap records in the review API payload shape
pub fn payload(records: Vec<Value>) -> Value {
    json!({ "homeworks": records })
}

/// Collect every event currently buffered on the receiver
pub fn drain_events(rx: &mut mpsc::Receiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
