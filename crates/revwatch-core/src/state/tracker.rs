// # Error Tracker
//
// Deduplication map for outbound error notifications. Keyed by the exact
// formatted message text: a one-character difference counts as a new error.
// The map is cleared after any fully successful cycle, so a persistent
// failure is announced once per outage, not once per poll.

use std::collections::HashMap;

/// Tracks which error messages have already been sent to the user
///
/// A message is marked as sent when notification is attempted, regardless of
/// whether delivery succeeded. Delivery failures are swallowed downstream
/// and do not re-arm the message.
#[derive(Debug, Default)]
pub struct ErrorTracker {
    notified: HashMap<String, bool>,
}

impl ErrorTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether this message should be sent, and record the attempt.
    ///
    /// Returns `true` for a message not yet marked as sent (never seen, or
    /// seen with the sent flag unset) and marks it sent. Returns `false`
    /// when the message was already marked sent.
    pub fn should_notify(&mut self, message: &str) -> bool {
        match self.notified.get(message).copied() {
            Some(true) => false,
            Some(false) | None => {
                self.notified.insert(message.to_string(), true);
                true
            }
        }
    }

    /// Forget all tracked messages.
    ///
    /// Called after a cycle completes without errors; a recurring failure
    /// will be announced again on its next occurrence.
    pub fn clear(&mut self) {
        self.notified.clear();
    }

    /// Number of tracked messages
    pub fn len(&self) -> usize {
        self.notified.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.notified.is_empty()
    }

    #[cfg(test)]
    fn seed(&mut self, message: &str, sent: bool) {
        self.notified.insert(message.to_string(), sent);
    }
}
