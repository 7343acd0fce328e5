//! Khata Core - Shared Expense Settlement Engine
//!
//! Tracks a group's shared expenses and works out who should pay whom to
//! clear every debt.
//!
//! # Architecture
//!
//! - **models**: Domain types (MemberId, Expense, Settlement, events)
//! - **settlement**: Balance accumulation and the settlement calculator
//! - **ledger**: In-memory group ledgers, the group book, and hashable snapshots
//!
//! # Critical Invariants
//!
//! 1. Settlement amounts are rounded to cents when created
//! 2. Balances within one cent of zero count as settled
//! 3. Output order is deterministic (insertion-ordered balances)
//! 4. The calculator is a pure function and never fails

// Module declarations
pub mod ledger;
pub mod models;
pub mod settlement;

// Re-exports for convenience
pub use ledger::{GroupBook, GroupLedger, GroupSnapshot, LedgerError, SnapshotError};
pub use models::{
    event::{EventLog, LedgerEvent},
    expense::{Expense, ExpenseError, ExpenseRecord, NewExpense, Split},
    member::MemberId,
    money::{round_to_cents, SETTLEMENT_EPSILON},
    settlement::{MemberBalance, Settlement, SettlementPlan},
};
pub use settlement::{compute_settlements, settle_balances, Balances};
