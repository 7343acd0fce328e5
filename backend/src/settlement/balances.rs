//! Balance accumulation
//!
//! Net position per member: total paid minus total owed. The accumulator is
//! an insertion-ordered map, so iteration follows the member list first and
//! then any identity first seen while walking the expenses. Matching order
//! (and therefore output order) depends on this.
//!
//! # Critical Invariants
//!
//! - **Stable order**: same members + same expenses in the same order produce
//!   the same iteration order
//! - **Conservation**: when every expense's splits sum to its amount, the
//!   balances sum to zero (up to float drift)

use crate::models::expense::ExpenseRecord;
use crate::models::member::MemberId;
use crate::models::money::{is_negligible, SETTLEMENT_EPSILON};
use crate::models::settlement::{MemberBalance, Settlement};
use indexmap::IndexMap;
use std::hash::Hash;

/// Signed net balance per member (positive = owed money by the group)
#[derive(Debug, Clone)]
pub struct Balances<M = MemberId> {
    entries: IndexMap<M, f64>,
    /// Distinct entries seeded from the member list; later ones are outsiders
    listed: usize,
}

impl<M> Balances<M>
where
    M: Clone + Eq + Hash,
{
    /// Compute balances from a member list and an expense history
    ///
    /// 1. Every listed member starts at zero.
    /// 2. Each payer is credited the full expense amount.
    /// 3. Each split member is debited their owed amount, the payer's own
    ///    split included.
    ///
    /// Payers or split members outside `members` are not an error; they get
    /// their own entry appended after the listed members.
    ///
    /// # Example
    /// ```
    /// use khata_core::{Balances, ExpenseRecord, Split};
    ///
    /// let expenses = vec![ExpenseRecord::new(
    ///     "A",
    ///     100.0,
    ///     vec![Split::new("A", 50.0), Split::new("B", 50.0)],
    /// )];
    /// let balances = Balances::accumulate(&["A", "B"], &expenses);
    ///
    /// assert_eq!(balances.get(&"A"), Some(50.0));
    /// assert_eq!(balances.get(&"B"), Some(-50.0));
    /// ```
    pub fn accumulate(members: &[M], expenses: &[ExpenseRecord<M>]) -> Self {
        let mut entries: IndexMap<M, f64> = IndexMap::with_capacity(members.len());

        for member in members {
            entries.entry(member.clone()).or_insert(0.0);
        }
        let listed = entries.len();

        for expense in expenses {
            *entries.entry(expense.payer.clone()).or_insert(0.0) += expense.amount;

            for split in &expense.splits {
                *entries.entry(split.member.clone()).or_insert(0.0) -= split.amount;
            }
        }

        let balances = Self { entries, listed };

        let outsiders = balances.outsiders().count();
        if outsiders > 0 {
            tracing::trace!(outsiders, "expenses reference identities outside the member list");
        }

        balances
    }

    /// Balance of one member, if they appear at all
    pub fn get(&self, member: &M) -> Option<f64> {
        self.entries.get(member).copied()
    }

    /// Members and balances in accumulation order
    pub fn iter(&self) -> impl Iterator<Item = (&M, f64)> + '_ {
        self.entries.iter().map(|(member, balance)| (member, *balance))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identities that only appeared through expenses, in first-seen order
    pub fn outsiders(&self) -> impl Iterator<Item = &M> + '_ {
        self.entries.keys().skip(self.listed)
    }

    /// Members owed money (balance > ε), in accumulation order
    pub fn creditors(&self) -> Vec<(M, f64)> {
        self.iter()
            .filter(|(_, balance)| *balance > SETTLEMENT_EPSILON)
            .map(|(member, balance)| (member.clone(), balance))
            .collect()
    }

    /// Members owing money (balance < -ε) with their debt as a positive
    /// number, in accumulation order
    pub fn debtors(&self) -> Vec<(M, f64)> {
        self.iter()
            .filter(|(_, balance)| *balance < -SETTLEMENT_EPSILON)
            .map(|(member, balance)| (member.clone(), -balance))
            .collect()
    }

    /// True when every balance is within ε of zero
    pub fn is_settled(&self) -> bool {
        self.iter().all(|(_, balance)| is_negligible(balance))
    }

    /// Balances left over after applying `settlements`
    ///
    /// A payer's balance rises by what they pay out; a recipient's falls by
    /// what they receive. After a complete plan every entry is within ε of
    /// zero.
    pub fn residual_after(&self, settlements: &[Settlement<M>]) -> Self {
        let mut entries = self.entries.clone();

        for settlement in settlements {
            *entries.entry(settlement.from.clone()).or_insert(0.0) += settlement.amount;
            *entries.entry(settlement.to.clone()).or_insert(0.0) -= settlement.amount;
        }

        Self {
            entries,
            listed: self.listed,
        }
    }

    /// Flatten into presentation rows, keeping order
    pub fn to_member_balances(&self) -> Vec<MemberBalance<M>> {
        self.iter()
            .map(|(member, balance)| MemberBalance {
                member: member.clone(),
                balance,
            })
            .collect()
    }
}
