//! Group snapshots
//!
//! Serializable point-in-time copy of a ledger. Settlement plans are always
//! computed from a snapshot, and the snapshot's content hash lets a caller
//! tell whether a plan it holds still matches the group's current state.
//!
//! # Critical Invariants
//!
//! - **Plan inputs only**: the hash covers the group id, members and the
//!   financial part of each expense; renaming the group or editing an
//!   expense description leaves it unchanged
//! - **Order sensitivity**: member and expense order do affect the hash,
//!   because they affect settlement order

use crate::models::expense::{Expense, ExpenseRecord};
use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Errors from snapshot (de)serialization
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),
}

/// Projection hashed by [`GroupSnapshot::content_hash`]
///
/// Plain structs and sequences only, so field order is fixed by declaration
/// and the JSON encoding is stable.
#[derive(Serialize)]
struct PlanInputs<'a> {
    group: Uuid,
    members: &'a [MemberId],
    expenses: Vec<ExpenseRecord>,
}

/// Serialized state of one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: Uuid,
    pub name: String,
    pub created_by: MemberId,
    pub members: Vec<MemberId>,
    pub expenses: Vec<Expense>,
}

impl GroupSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json)
            .map_err(|e| SnapshotError::Serialization(format!("Invalid snapshot JSON: {}", e)))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SnapshotError::Serialization(e.to_string()))
    }

    /// SHA-256 over everything that decides the settlement plan, lowercase hex
    pub fn content_hash(&self) -> Result<String, SnapshotError> {
        let inputs = PlanInputs {
            group: self.id,
            members: &self.members,
            expenses: self.expense_records(),
        };
        let bytes = serde_json::to_vec(&inputs)
            .map_err(|e| SnapshotError::Serialization(format!("Plan inputs not hashable: {}", e)))?;

        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }

    /// Expense history as calculator input
    pub fn expense_records(&self) -> Vec<ExpenseRecord> {
        self.expenses.iter().map(ExpenseRecord::from).collect()
    }
}
