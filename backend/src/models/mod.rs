//! Domain models for the expense ledger

pub mod event;
pub mod expense;
pub mod member;
pub mod money;
pub mod settlement;

// Re-exports
pub use event::{EventLog, LedgerEvent};
pub use expense::{Expense, ExpenseError, ExpenseRecord, NewExpense, Split};
pub use member::MemberId;
pub use settlement::{MemberBalance, Settlement, SettlementPlan};
