//! Homework review domain model
//!
//! Status vocabulary, payload shape checks, and the outcome type produced by
//! diffing a record against the ledger. The notification strings rendered
//! here are user-facing and localized; they must stay byte-for-byte stable
//! because error deduplication and downstream chat history key on them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Review status of a homework submission, as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    /// Accepted by the reviewer
    Approved,
    /// Taken in for review
    Reviewing,
    /// Returned with remarks
    Rejected,
}

impl HomeworkStatus {
    /// Parse a wire status value. Case-sensitive: the API contract is
    /// lowercase and anything else is an undocumented status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Localized verdict text sent to the user for this status
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate the overall payload shape and extract the homework records.
///
/// The payload must be a JSON object with a `homeworks` key holding a list.
/// Records inside the list are returned uninterpreted; per-record checks
/// happen when each record is diffed against the ledger.
pub fn homework_list(payload: &Value) -> Result<&[Value]> {
    let object = payload
        .as_object()
        .ok_or_else(|| Error::type_mismatch("Ответ API не является объектом"))?;
    let homeworks = object
        .get("homeworks")
        .ok_or_else(|| Error::missing_field("В ответе API отсутствует ключ \"homeworks\""))?;
    homeworks
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::type_mismatch("Значение \"homeworks\" в ответе API не является списком"))
}

/// Outcome of diffing one homework record against the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCheck {
    /// First sighting, or the status differs from the recorded one
    Changed {
        /// Homework name as reported by the API
        homework: String,
        /// Newly recorded status
        status: HomeworkStatus,
    },
    /// Status matches the recorded one; nothing to announce
    Unchanged {
        /// Homework name as reported by the API
        homework: String,
    },
}

impl StatusCheck {
    /// Homework name this outcome refers to
    pub fn homework(&self) -> &str {
        match self {
            Self::Changed { homework, .. } | Self::Unchanged { homework } => homework,
        }
    }

    /// Whether the ledger was updated for this record
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Render the user-facing notification for this outcome.
    ///
    /// Only changes produce a message; unchanged statuses are a silent no-op
    /// at the notification layer.
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Changed { homework, status } => Some(format!(
                "Изменился статус проверки работы \"{}\". {}",
                homework,
                status.verdict()
            )),
            Self::Unchanged { .. } => None,
        }
    }
}
