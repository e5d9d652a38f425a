// # Status Ledger
//
// Last-seen review status per homework name. The ledger is the memory the
// differ compares against: a record produces a notification only when its
// status differs from (or is absent from) the recorded one.
//
// ## Crash Behavior
//
// - All entries are lost on restart
// - First cycle after restart treats every homework as newly changed and
//   re-announces its current status

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::review::{HomeworkStatus, StatusCheck};

/// In-memory map of homework name to the last observed status
///
/// # Example
///
/// ```rust
/// use revwatch_core::state::StatusLedger;
/// use serde_json::json;
///
/// let mut ledger = StatusLedger::new();
/// let record = json!({"homework_name": "hw1", "status": "reviewing"});
///
/// let check = ledger.apply(&record).unwrap();
/// assert!(check.is_changed());
///
/// let check = ledger.apply(&record).unwrap();
/// assert!(!check.is_changed());
/// ```
#[derive(Debug, Default)]
pub struct StatusLedger {
    statuses: HashMap<String, HomeworkStatus>,
}

impl StatusLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff one homework record against the ledger and record the outcome.
    ///
    /// Shape and vocabulary failures leave the ledger untouched:
    ///
    /// - `MissingField` when `homework_name` or `status` is absent, or the
    ///   name is not a string
    /// - `UnknownStatus` when the status value is outside the recognized set
    ///
    /// A new or differing status is written to the ledger and reported as
    /// `StatusCheck::Changed`; a matching one as `StatusCheck::Unchanged`.
    pub fn apply(&mut self, record: &Value) -> Result<StatusCheck> {
        let name = record.get("homework_name");
        let status = record.get("status");
        let (Some(name), Some(status)) = (name, status) else {
            return Err(Error::missing_field(
                "В записи о домашней работе отсутствуют ключи \"homework_name\" или \"status\"",
            ));
        };
        let Some(name) = name.as_str() else {
            return Err(Error::missing_field(
                "В записи о домашней работе отсутствуют ключи \"homework_name\" или \"status\"",
            ));
        };

        let parsed = status.as_str().and_then(HomeworkStatus::parse);
        let Some(new_status) = parsed else {
            let rendered = status
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string());
            return Err(Error::unknown_status(format!(
                "Недокументированный статус домашней работы: {rendered}"
            )));
        };

        match self.statuses.get(name) {
            Some(previous) if *previous == new_status => Ok(StatusCheck::Unchanged {
                homework: name.to_string(),
            }),
            _ => {
                self.statuses.insert(name.to_string(), new_status);
                Ok(StatusCheck::Changed {
                    homework: name.to_string(),
                    status: new_status,
                })
            }
        }
    }

    /// Last recorded status for a homework, if any
    pub fn last_status(&self, homework: &str) -> Option<HomeworkStatus> {
        self.statuses.get(homework).copied()
    }

    /// Number of homeworks tracked
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Whether the ledger has no entries yet
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
