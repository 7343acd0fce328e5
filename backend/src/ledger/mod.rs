//! Group Ledger
//!
//! In-memory record of one expense-sharing group: its members, its expense
//! history, and an event log of every change. The ledger is the layer that
//! validates input and hands plain records to the settlement calculator.
//!
//! # Critical Invariants
//!
//! 1. **Unique members**: a member appears at most once, in join order
//! 2. **Unique expenses**: every expense id appears exactly once
//! 3. **Valid history**: every stored expense passed creation rules
//! 4. **Nothing derived is stored**: balances and settlements are recomputed
//!    from the full history on every request
//!
//! # Example
//!
//! ```rust
//! use khata_core::{GroupLedger, MemberId, NewExpense, Split};
//!
//! let alice = MemberId::from("alice");
//! let bob = MemberId::from("bob");
//!
//! let mut ledger = GroupLedger::new("Flat 4B", alice.clone()).unwrap();
//! ledger.join(bob.clone());
//!
//! ledger
//!     .add_expense(
//!         alice.clone(),
//!         NewExpense::new(
//!             "Groceries",
//!             100.0,
//!             vec![Split::new(alice.clone(), 50.0), Split::new(bob.clone(), 50.0)],
//!         ),
//!     )
//!     .unwrap();
//!
//! let settlements = ledger.settlements();
//! assert_eq!(settlements.len(), 1);
//! assert_eq!(settlements[0].from, bob);
//! assert_eq!(settlements[0].to, alice);
//! ```

pub mod book;
pub mod snapshot;

use crate::models::event::{EventLog, LedgerEvent};
use crate::models::expense::{Expense, ExpenseError, ExpenseRecord, NewExpense};
use crate::models::member::MemberId;
use crate::models::settlement::{Settlement, SettlementPlan};
use crate::settlement::{self, Balances};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

pub use book::GroupBook;
pub use snapshot::{GroupSnapshot, SnapshotError};

/// Errors from ledger operations
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Group name is required")]
    EmptyName,

    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),

    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),

    #[error("Member {0} does not belong to this group")]
    NotAMember(MemberId),

    #[error("Member {0} is not allowed to perform this action")]
    Forbidden(MemberId),

    #[error("Duplicate member: {0}")]
    DuplicateMember(MemberId),

    #[error("Duplicate expense: {0}")]
    DuplicateExpense(Uuid),

    #[error("Invalid expense: {0}")]
    InvalidExpense(#[from] ExpenseError),
}

/// One group's members and expense history
#[derive(Debug, Clone)]
pub struct GroupLedger {
    id: Uuid,
    name: String,
    created_by: MemberId,
    members: Vec<MemberId>,
    expenses: Vec<Expense>,
    events: EventLog,
}

impl GroupLedger {
    /// Create a group; the creator becomes its first member
    pub fn new(name: impl Into<String>, created_by: MemberId) -> Result<Self, LedgerError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let id = Uuid::new_v4();
        let mut events = EventLog::new();
        events.log(LedgerEvent::GroupCreated {
            group_id: id,
            name: name.clone(),
            created_by: created_by.clone(),
        });

        tracing::debug!(group_id = %id, %created_by, "group created");

        Ok(Self {
            id,
            name,
            members: vec![created_by.clone()],
            created_by,
            expenses: Vec::new(),
            events,
        })
    }

    /// Rebuild a ledger from a snapshot
    ///
    /// Re-checks every invariant the ledger normally maintains. The event
    /// log starts empty; snapshots carry state, not history.
    pub fn from_snapshot(snapshot: GroupSnapshot) -> Result<Self, LedgerError> {
        let name = snapshot.name.trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let mut seen_members = HashSet::with_capacity(snapshot.members.len());
        for member in &snapshot.members {
            if !seen_members.insert(member) {
                return Err(LedgerError::DuplicateMember(member.clone()));
            }
        }
        if !seen_members.contains(&snapshot.created_by) {
            return Err(LedgerError::NotAMember(snapshot.created_by));
        }

        let mut seen_expenses = HashSet::with_capacity(snapshot.expenses.len());
        for expense in &snapshot.expenses {
            if !seen_expenses.insert(expense.id()) {
                return Err(LedgerError::DuplicateExpense(expense.id()));
            }
            expense.validate()?;
        }

        tracing::debug!(
            group_id = %snapshot.id,
            members = snapshot.members.len(),
            expenses = snapshot.expenses.len(),
            "group restored from snapshot"
        );

        Ok(Self {
            id: snapshot.id,
            name,
            created_by: snapshot.created_by,
            members: snapshot.members,
            expenses: snapshot.expenses,
            events: EventLog::new(),
        })
    }

    /// Point-in-time copy of the ledger's state
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            id: self.id,
            name: self.name.clone(),
            created_by: self.created_by.clone(),
            members: self.members.clone(),
            expenses: self.expenses.clone(),
        }
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Add a member; returns `false` if they were already in the group
    pub fn join(&mut self, member: MemberId) -> bool {
        if self.is_member(&member) {
            return false;
        }

        tracing::debug!(group_id = %self.id, %member, "member joined");
        self.events.log(LedgerEvent::MemberJoined {
            member: member.clone(),
        });
        self.members.push(member);
        true
    }

    /// Check group membership
    pub fn is_member(&self, member: &MemberId) -> bool {
        self.members.contains(member)
    }

    fn ensure_member(&self, member: &MemberId) -> Result<(), LedgerError> {
        if self.is_member(member) {
            Ok(())
        } else {
            Err(LedgerError::NotAMember(member.clone()))
        }
    }

    /// Only the creator may delete a group
    pub fn authorize_delete(&self, requester: &MemberId) -> Result<(), LedgerError> {
        if requester == &self.created_by {
            Ok(())
        } else {
            Err(LedgerError::Forbidden(requester.clone()))
        }
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Record an expense dated now
    pub fn add_expense(
        &mut self,
        paid_by: MemberId,
        request: NewExpense,
    ) -> Result<&Expense, LedgerError> {
        self.add_expense_at(paid_by, request, Utc::now())
    }

    /// Record an expense with an explicit date
    ///
    /// Payer and split members are not required to belong to the group;
    /// outsiders are logged and still take part in balances.
    pub fn add_expense_at(
        &mut self,
        paid_by: MemberId,
        request: NewExpense,
        date: DateTime<Utc>,
    ) -> Result<&Expense, LedgerError> {
        let expense = Expense::create(paid_by, request, date)?;

        let outsiders = expense
            .participants()
            .filter(|member| !self.is_member(member))
            .count();
        if outsiders > 0 {
            tracing::warn!(
                group_id = %self.id,
                expense_id = %expense.id(),
                outsiders,
                "expense references members outside the group"
            );
        }

        tracing::debug!(
            group_id = %self.id,
            expense_id = %expense.id(),
            paid_by = %expense.paid_by(),
            amount = expense.amount(),
            "expense added"
        );
        self.events.log(LedgerEvent::ExpenseAdded {
            expense_id: expense.id(),
            paid_by: expense.paid_by().clone(),
            amount: expense.amount(),
        });

        self.expenses.push(expense);
        let index = self.expenses.len() - 1;
        Ok(&self.expenses[index])
    }

    /// Delete an expense by id, returning it
    pub fn remove_expense(&mut self, expense_id: Uuid) -> Result<Expense, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id() == expense_id)
            .ok_or(LedgerError::ExpenseNotFound(expense_id))?;

        let removed = self.expenses.remove(index);

        tracing::debug!(group_id = %self.id, %expense_id, "expense removed");
        self.events.log(LedgerEvent::ExpenseRemoved { expense_id });

        Ok(removed)
    }

    /// Look up an expense by id
    pub fn expense(&self, expense_id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id() == expense_id)
    }

    /// Expense history converted to calculator input
    pub fn expense_records(&self) -> Vec<ExpenseRecord> {
        self.expenses.iter().map(ExpenseRecord::from).collect()
    }

    // ========================================================================
    // Settlement (always recomputed)
    // ========================================================================

    /// Net balance per member, recomputed from the history
    pub fn balances(&self) -> Balances {
        Balances::accumulate(&self.members, &self.expense_records())
    }

    /// Transfers that settle the group
    pub fn settlements(&self) -> Vec<Settlement> {
        settlement::compute_settlements(&self.members, &self.expense_records())
    }

    /// Balances and settlements together
    pub fn settlement_plan(&self) -> SettlementPlan {
        settlement::plan(&self.members, &self.expense_records())
    }

    /// Settlements, visible only to group members
    pub fn settlements_for(&self, requester: &MemberId) -> Result<Vec<Settlement>, LedgerError> {
        self.ensure_member(requester)?;
        Ok(self.settlements())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Group identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Group display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member who created the group
    pub fn created_by(&self) -> &MemberId {
        &self.created_by
    }

    /// Members in join order
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    /// Expense history in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Mutations since creation or restore
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
