// Messages exchanged between a worker and its host
// Author: Gabriel Demetrios Lafis

use serde::{Deserialize, Serialize};

use crate::processing::Analysis;

/// One message from the worker. Any number of `Progress` messages, strictly
/// non-decreasing, precede exactly one `Complete` or `Error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerMessage {
    Progress { progress: u8 },
    Complete { data: Analysis },
    Error { error: String },
}

impl WorkerMessage {
    /// Whether this message ends the exchange
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WorkerMessage::Progress { .. })
    }
}
