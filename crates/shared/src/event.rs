use serde::{Deserialize, Serialize};

use crate::domain::BlockHash;

/// Ordered transaction lifecycle notifications emitted while a command is
/// processed: `Submitted` → `InBlock` → `Succeeded` | `Failed`. A command's
/// event stream yields each of these at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TxEvent {
    Submitted,
    InBlock { block_hash: BlockHash },
    Succeeded,
    Failed { reason: String },
}
