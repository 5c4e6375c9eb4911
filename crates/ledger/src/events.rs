//! Change notifications published by the ledger.
//!
//! Best-effort fan-out: slow readers miss events instead of blocking the
//! ledger, and publishing with no subscribers is a no-op.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// What happened inside the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A record was appended; readers should repaint the list and total.
    Changed,
    /// The write-through save failed. The in-memory state stays ahead of
    /// the persisted blob until the next successful save.
    SaveFailed(String),
}

pub(crate) fn channel() -> broadcast::Sender<LedgerEvent> {
    broadcast::channel(CHANNEL_CAPACITY).0
}
