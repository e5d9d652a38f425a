//! Core revwatch engine
//!
//! The RevwatchEngine is responsible for:
//! - Polling the review API via ReviewSource
//! - Validating payload shape
//! - Diffing records against the StatusLedger
//! - Delivering change messages via Notifier
//! - Deduplicating error notifications via ErrorTracker
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    payload    ┌────────────────┐
//! │ ReviewSource │ ────────────▶ │ RevwatchEngine │
//! └──────────────┘               └────────────────┘
//!                                        │
//!                  ┌─────────────────────┼─────────────────────┐
//!                  ▼                     ▼                     ▼
//!          ┌──────────────┐      ┌──────────────┐      ┌─────────────┐
//!          │ StatusLedger │      │   Notifier   │      │   Events    │
//!          │   (diff)     │      │  (deliver)   │      │ (monitor)   │
//!          └──────────────┘      └──────────────┘      └─────────────┘
//! ```
//!
//! ## Cycle Flow
//!
//! 1. Fetch the payload with the current cursor
//! 2. Validate the payload shape
//! 3. Diff every homework record against the ledger, in order
//! 4. Deliver a message for each change; log unchanged records at debug
//! 5. Route any error through the tracker to the notifier, deduplicated
//! 6. Clear the tracker after a fully clean cycle
//! 7. Advance the cursor to "now" and sleep, whatever happened above

use crate::config::RevwatchConfig;
use crate::error::{Error, Result};
use crate::review::{homework_list, HomeworkStatus, StatusCheck};
use crate::state::{ErrorTracker, StatusLedger};
use crate::traits::{Notifier, ReviewSource};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Events emitted by the RevwatchEngine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Engine started
    Started {
        source: String,
        notifier: String,
        poll_interval_secs: u64,
    },

    /// A homework status changed (or was seen for the first time)
    StatusChanged {
        homework: String,
        status: HomeworkStatus,
    },

    /// A message was accepted by the notification channel
    NotificationSent { text: String },

    /// A message could not be delivered; the loop keeps running
    NotificationFailed { error: String },

    /// A cycle hit a taxonomy error (poll, validate, or diff)
    CycleFailed { error: String },

    /// An error notification was suppressed by deduplication
    ErrorSuppressed { message: String },

    /// A cycle finished without errors
    CycleCompleted { changes: usize },

    /// Engine stopped
    Stopped { reason: String },
}

/// Core revwatch engine
///
/// The engine orchestrates the poll → validate → diff → notify cycle.
/// It runs continuously, announcing status changes and deduplicated errors.
///
/// ## Lifecycle
///
/// 1. Create with [`RevwatchEngine::new()`]
/// 2. Start with [`RevwatchEngine::run()`]
/// 3. Engine runs until shutdown signal received
/// 4. Drop to cleanup
///
/// ## Threading
///
/// All state (ledger, tracker, cursor) is owned by the engine and mutated
/// only by its single task; there is no shared-state locking anywhere.
///
/// ## Load Resistance
///
/// The event channel is bounded; when nobody drains it, new events are
/// dropped with a warning instead of growing memory without bound.
pub struct RevwatchEngine {
    /// Review source to poll
    source: Box<dyn ReviewSource>,

    /// Notification channel for users
    notifier: Box<dyn Notifier>,

    /// Last-seen status per homework
    ledger: StatusLedger,

    /// Error-notification deduplication
    errors: ErrorTracker,

    /// Query-window cursor, Unix seconds
    cursor: i64,

    /// Seconds to sleep between cycles
    poll_interval_secs: u64,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<EngineEvent>,
}

impl RevwatchEngine {
    /// Create a new revwatch engine
    ///
    /// # Parameters
    ///
    /// - `source`: review source implementation
    /// - `notifier`: notification channel implementation
    /// - `config`: revwatch configuration
    ///
    /// # Returns
    ///
    /// A tuple of (engine, event_receiver) where event_receiver yields engine events
    pub fn new(
        source: Box<dyn ReviewSource>,
        notifier: Box<dyn Notifier>,
        config: RevwatchConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.engine.event_channel_capacity);

        let engine = Self {
            source,
            notifier,
            ledger: StatusLedger::new(),
            errors: ErrorTracker::new(),
            cursor: chrono::Utc::now().timestamp(),
            poll_interval_secs: config.engine.poll_interval_secs,
            event_tx: tx,
        };

        Ok((engine, rx))
    }

    /// Current query-window cursor, Unix seconds
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Read access to the status ledger
    pub fn ledger(&self) -> &StatusLedger {
        &self.ledger
    }

    /// Run the engine
    ///
    /// Polls until a shutdown signal (SIGINT) is received. The signal is
    /// honored at the sleep boundary, never in the middle of a cycle.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Clean shutdown
    /// - `Err(Error)`: Fatal error
    pub async fn run(&mut self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Internal run implementation that accepts an optional shutdown signal
    ///
    /// # Parameters
    ///
    /// - `shutdown_rx`: Optional oneshot receiver to trigger shutdown (for testing)
    async fn run_internal(
        &mut self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        self.emit_event(EngineEvent::Started {
            source: self.source.source_name().to_string(),
            notifier: self.notifier.notifier_name().to_string(),
            poll_interval_secs: self.poll_interval_secs,
        });
        info!(
            "Engine started: source={}, notifier={}, poll interval {}s",
            self.source.source_name(),
            self.notifier.notifier_name(),
            self.poll_interval_secs
        );

        let interval = std::time::Duration::from_secs(self.poll_interval_secs);

        if let Some(mut rx) = shutdown_rx {
            // Test mode: wait for provided shutdown signal
            loop {
                // Checked before each cycle so a pending signal never costs
                // another poll
                match rx.try_recv() {
                    Err(tokio::sync::oneshot::error::TryRecvError::Empty) => {}
                    _ => {
                        info!("Shutdown signal received");
                        self.emit_event(EngineEvent::Stopped {
                            reason: "Shutdown signal".to_string(),
                        });
                        break;
                    }
                }

                self.run_cycle().await;

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}

                    // Handle test shutdown signal at the sleep boundary
                    _ = &mut rx => {
                        info!("Shutdown signal received");
                        self.emit_event(EngineEvent::Stopped {
                            reason: "Shutdown signal".to_string(),
                        });
                        break;
                    }
                }
            }
        } else {
            // Production mode: wait for SIGINT
            loop {
                self.run_cycle().await;

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}

                    // Handle shutdown signal (production)
                    _ = tokio::signal::ctrl_c() => {
                        info!("Shutdown signal received");
                        self.emit_event(EngineEvent::Stopped {
                            reason: "Shutdown signal".to_string(),
                        });
                        break;
                    }
                }
            }
        }

        info!("Engine stopped");
        Ok(())
    }

    /// Run one poll cycle: fetch, validate, diff, notify.
    ///
    /// Every taxonomy error is caught here, formatted, and routed through
    /// the deduplicator; nothing propagates. The cursor is advanced to "now"
    /// on every path, matching the sleep that follows in [`run()`].
    ///
    /// Public so embedders and tests can drive cycles deterministically
    /// without the sleep/signal plumbing.
    ///
    /// [`run()`]: RevwatchEngine::run
    pub async fn run_cycle(&mut self) {
        debug!(
            "Polling {} with cursor {}",
            self.source.source_name(),
            self.cursor
        );

        let mut cycle_failed = false;
        let mut changes = 0usize;

        match self.source.fetch(self.cursor).await {
            Ok(payload) => match homework_list(&payload) {
                Ok(records) => {
                    for record in records {
                        match self.ledger.apply(record) {
                            Ok(check) => {
                                if let Some(text) = check.notification() {
                                    if let StatusCheck::Changed { homework, status } = &check {
                                        info!(
                                            "Status of homework \"{}\" changed to {}",
                                            homework, status
                                        );
                                        self.emit_event(EngineEvent::StatusChanged {
                                            homework: homework.clone(),
                                            status: *status,
                                        });
                                    }
                                    self.deliver(&text).await;
                                    changes += 1;
                                } else {
                                    debug!(
                                        "Status of homework \"{}\" is unchanged",
                                        check.homework()
                                    );
                                }
                            }
                            // A bad record does not abort its siblings
                            Err(e) => {
                                self.route_error(&e).await;
                                cycle_failed = true;
                            }
                        }
                    }
                }
                Err(e) => {
                    self.route_error(&e).await;
                    cycle_failed = true;
                }
            },
            Err(e) => {
                self.route_error(&e).await;
                cycle_failed = true;
            }
        }

        if !cycle_failed {
            self.errors.clear();
            self.emit_event(EngineEvent::CycleCompleted { changes });
        }

        self.cursor = chrono::Utc::now().timestamp();
        debug!("Cursor advanced to {}", self.cursor);
    }

    /// Format an error, log it, and notify the user about it once.
    ///
    /// The formatted text is the deduplication key: the exact same text is
    /// suppressed until the tracker is cleared by a clean cycle.
    async fn route_error(&mut self, error: &Error) {
        let message = format!("Сбой в работе программы: {}", error);
        error!("{}", message);
        self.emit_event(EngineEvent::CycleFailed {
            error: error.to_string(),
        });

        if self.errors.should_notify(&message) {
            self.deliver(&message).await;
        } else {
            debug!("Error already notified, suppressing: {}", message);
            self.emit_event(EngineEvent::ErrorSuppressed { message });
        }
    }

    /// Deliver one message, swallowing failures.
    ///
    /// A broken notification channel must never stop the polling loop, so
    /// delivery errors are logged and emitted as events only.
    async fn deliver(&self, text: &str) {
        match self.notifier.send(text).await {
            Ok(()) => {
                info!("Notification delivered: {}", text);
                self.emit_event(EngineEvent::NotificationSent {
                    text: text.to_string(),
                });
            }
            Err(e) => {
                error!("Failed to deliver notification: {}", e);
                self.emit_event(EngineEvent::NotificationFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Emit an engine event
    ///
    /// # Parameters
    ///
    /// - `event`: The event to emit
    fn emit_event(&self, event: EngineEvent) {
        // Send event, logging warning if channel is full (backpressure)
        if let Err(_) = self.event_tx.try_send(event) {
            warn!("Event channel full, dropping event. Consider increasing event_channel_capacity or draining the receiver.");
        }
    }

    /// Test-only helper to run the engine with a controlled shutdown signal
    ///
    /// # Visibility
    ///
    /// This is `pub` for testing purposes only.
    ///
    /// **TESTING ONLY**: Architecture contract tests require controlled shutdown.
    /// Production daemon code should use `run()` instead, which manages shutdown
    /// via OS signals (SIGINT) rather than programmatic channels.
    ///
    /// External sources and notifiers MUST NOT call this method.
    pub async fn run_with_shutdown(
        &mut self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        self.run_internal(shutdown_rx).await
    }
}
