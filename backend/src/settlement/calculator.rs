//! Settlement calculator
//!
//! Turns net balances into a list of pairwise transfers that retires every
//! debt.
//!
//! # Algorithm
//!
//! ```text
//! creditors = members with balance >  ε   (accumulation order)
//! debtors   = members with balance < -ε   (accumulation order)
//!
//! for each debtor:
//!     while remaining debt > ε:
//!         creditor = first creditor with remaining credit > ε   (else stop)
//!         transfer = min(remaining debt, remaining credit)
//!         emit (debtor → creditor, round_to_cents(transfer))
//!         subtract transfer from both sides
//! ```
//!
//! Matching is greedy first-available, not largest-first. It does not always
//! find the minimum number of transfers, but it is deterministic for a given
//! input order and fully discharges both sides up to ε.
//!
//! # Critical Invariants
//!
//! - **No self-settlement**: a member is never both creditor and debtor
//! - **Positive amounts**: every emitted amount is at least one cent
//! - **Determinism**: identical input sequences give identical output
//! - **Purity**: no I/O, no shared state, never fails

use crate::models::expense::ExpenseRecord;
use crate::models::money::{round_to_cents, SETTLEMENT_EPSILON};
use crate::models::settlement::{Settlement, SettlementPlan};
use crate::settlement::balances::Balances;
use std::hash::Hash;

/// Compute the transfers that settle a group
///
/// # Arguments
///
/// * `members` - Everyone on the balance sheet, including inactive members
/// * `expenses` - Expense history (any order)
///
/// # Example
///
/// ```rust
/// use khata_core::{compute_settlements, ExpenseRecord, Settlement, Split};
///
/// let expenses = vec![ExpenseRecord::new(
///     "A",
///     90.0,
///     vec![Split::new("A", 30.0), Split::new("B", 30.0), Split::new("C", 30.0)],
/// )];
///
/// let settlements = compute_settlements(&["A", "B", "C"], &expenses);
/// assert_eq!(
///     settlements,
///     vec![Settlement::new("B", "A", 30.0), Settlement::new("C", "A", 30.0)]
/// );
/// ```
pub fn compute_settlements<M>(members: &[M], expenses: &[ExpenseRecord<M>]) -> Vec<Settlement<M>>
where
    M: Clone + Eq + Hash,
{
    let balances = Balances::accumulate(members, expenses);
    settle_balances(&balances)
}

/// Match debtors against creditors for already-computed balances
pub fn settle_balances<M>(balances: &Balances<M>) -> Vec<Settlement<M>>
where
    M: Clone + Eq + Hash,
{
    let mut creditors = balances.creditors();
    let debtors = balances.debtors();
    let mut settlements = Vec::new();

    for (debtor, debt) in &debtors {
        let mut remaining = *debt;

        while remaining > SETTLEMENT_EPSILON {
            let Some((creditor, credit)) = creditors
                .iter_mut()
                .find(|(_, credit)| *credit > SETTLEMENT_EPSILON)
            else {
                break;
            };

            let transfer = remaining.min(*credit);
            settlements.push(Settlement::new(
                debtor.clone(),
                creditor.clone(),
                round_to_cents(transfer),
            ));

            *credit -= transfer;
            remaining -= transfer;
        }
    }

    tracing::debug!(
        creditors = creditors.len(),
        debtors = debtors.len(),
        settlements = settlements.len(),
        "computed settlements"
    );

    settlements
}

/// Balances and settlements in one pass
pub fn plan<M>(members: &[M], expenses: &[ExpenseRecord<M>]) -> SettlementPlan<M>
where
    M: Clone + Eq + Hash,
{
    let balances = Balances::accumulate(members, expenses);
    let settlements = settle_balances(&balances);

    SettlementPlan {
        balances: balances.to_member_balances(),
        settlements,
    }
}
