//! Group Book
//!
//! Every group known to the process, keyed by id in creation order. This is
//! the container the hosting application queries to list a member's groups
//! and to delete a group together with its expense history.

use crate::ledger::{GroupLedger, LedgerError};
use crate::models::member::MemberId;
use indexmap::IndexMap;
use uuid::Uuid;

/// In-memory store of group ledgers
#[derive(Debug, Clone, Default)]
pub struct GroupBook {
    groups: IndexMap<Uuid, GroupLedger>,
}

impl GroupBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }

    /// Create a group and store it
    pub fn create(
        &mut self,
        name: impl Into<String>,
        created_by: MemberId,
    ) -> Result<&GroupLedger, LedgerError> {
        let ledger = GroupLedger::new(name, created_by)?;
        let id = ledger.id();
        self.groups.insert(id, ledger);
        Ok(&self.groups[&id])
    }

    /// Store an existing ledger (e.g. restored from a snapshot), replacing
    /// any group with the same id
    pub fn insert(&mut self, ledger: GroupLedger) -> Option<GroupLedger> {
        self.groups.insert(ledger.id(), ledger)
    }

    pub fn get(&self, group_id: Uuid) -> Result<&GroupLedger, LedgerError> {
        self.groups
            .get(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    pub fn get_mut(&mut self, group_id: Uuid) -> Result<&mut GroupLedger, LedgerError> {
        self.groups
            .get_mut(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    /// Groups the member belongs to, in creation order
    pub fn groups_for(&self, member: &MemberId) -> Vec<&GroupLedger> {
        self.groups
            .values()
            .filter(|ledger| ledger.is_member(member))
            .collect()
    }

    /// Add a member to a group; `Ok(false)` if they were already in it
    pub fn join(&mut self, group_id: Uuid, member: MemberId) -> Result<bool, LedgerError> {
        Ok(self.get_mut(group_id)?.join(member))
    }

    /// Delete a group and its expenses; only the creator may do this
    pub fn delete(
        &mut self,
        group_id: Uuid,
        requester: &MemberId,
    ) -> Result<GroupLedger, LedgerError> {
        self.get(group_id)?.authorize_delete(requester)?;

        let removed = self
            .groups
            .shift_remove(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;

        tracing::debug!(
            %group_id,
            %requester,
            expenses = removed.expenses().len(),
            "group deleted"
        );

        Ok(removed)
    }

    /// Number of stored groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
