// # In-Memory Loop State
//
// State owned by the engine and mutated only between cycles: the last-seen
// status ledger and the error-notification tracker. Nothing here persists
// across restarts; every run starts from empty maps.

pub mod ledger;
pub mod tracker;

pub use ledger::StatusLedger;
pub use tracker::ErrorTracker;
