// crates/core/src/reconcile.rs

//! Attachment list reconciliation.
//!
//! An agent's attachment list is read, changed by exactly one entry, and written
//! back whole. The write replaces the full list, so anything another writer
//! changed between our read and our write is lost. The remote service offers
//! no version token to guard against that, and no locking is attempted here.

use crate::types::ToolId;

/// The single change an operation wants to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    Add(ToolId),
    Remove(ToolId),
}

/// Next attachment list and whether it differs from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub next: Vec<ToolId>,
    pub changed: bool,
}

/// Apply `delta` to a snapshot of the attachment list.
///
/// `Add` appends when absent and is a no-op otherwise. `Remove` drops the
/// first occurrence and is a no-op when absent. Entries other than the one
/// named by the delta keep their relative order.
pub fn reconcile(current: Vec<ToolId>, delta: &Delta) -> Reconciled {
    let mut next = current;
    let changed = match delta {
        Delta::Add(id) => {
            if next.contains(id) {
                false
            } else {
                next.push(id.clone());
                true
            }
        }
        Delta::Remove(id) => match next.iter().position(|t| t == id) {
            Some(pos) => {
                next.remove(pos);
                true
            }
            None => false,
        },
    };
    Reconciled { next, changed }
}
