//! Ledger event log
//!
//! Every mutation of a [`crate::ledger::GroupLedger`] appends an event.
//! Events are kept in the order they happened and are never rewritten,
//! which lets callers audit how a group's expense history evolved.
//!
//! # Example
//!
//! ```rust
//! use khata_core::models::event::{LedgerEvent, EventLog};
//! use khata_core::MemberId;
//!
//! let mut log = EventLog::new();
//! log.log(LedgerEvent::MemberJoined { member: MemberId::from("bob") });
//! assert_eq!(log.len(), 1);
//! ```

use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State change in a group ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// Group created (creator becomes the first member)
    GroupCreated {
        group_id: Uuid,
        name: String,
        created_by: MemberId,
    },

    /// New member joined
    MemberJoined { member: MemberId },

    /// Expense recorded
    ExpenseAdded {
        expense_id: Uuid,
        paid_by: MemberId,
        amount: f64,
    },

    /// Expense deleted
    ExpenseRemoved { expense_id: Uuid },
}

impl LedgerEvent {
    /// Short name, used in logs
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::GroupCreated { .. } => "group_created",
            LedgerEvent::MemberJoined { .. } => "member_joined",
            LedgerEvent::ExpenseAdded { .. } => "expense_added",
            LedgerEvent::ExpenseRemoved { .. } => "expense_removed",
        }
    }
}

/// Append-only event storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    /// Create an empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event
    pub fn log(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// All events in log order
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one type, in log order
    pub fn events_of_type(&self, event_type: &str) -> Vec<&LedgerEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }
}
