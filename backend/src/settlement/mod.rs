//! Settlement Module
//!
//! Computes who pays whom to clear a group's shared expenses:
//! - Net balance per member (paid minus owed)
//! - Creditor/debtor partition with a one-cent tolerance
//! - Greedy first-available matching into pairwise transfers
//!
//! Everything here is a pure function of its inputs. Results are never
//! cached; callers recompute from the full expense history.
//!
//! # Example
//!
//! ```rust
//! use khata_core::settlement;
//! use khata_core::{ExpenseRecord, Split};
//!
//! let expenses = vec![ExpenseRecord::new(
//!     "A",
//!     100.0,
//!     vec![Split::new("A", 50.0), Split::new("B", 50.0)],
//! )];
//!
//! let settlements = settlement::compute_settlements(&["A", "B"], &expenses);
//! assert_eq!(settlements.len(), 1);
//! assert_eq!(settlements[0].from, "B");
//! assert_eq!(settlements[0].to, "A");
//! assert_eq!(settlements[0].amount, 50.0);
//! ```

pub mod balances;
pub mod calculator;

// Re-export public API
pub use balances::Balances;
pub use calculator::{compute_settlements, plan, settle_balances};
