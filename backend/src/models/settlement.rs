//! Settlement output model
//!
//! A settlement is an instruction: `from` pays `amount` to `to`. Amounts are
//! always positive and rounded to cents.

use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};

/// One settling transfer between two members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement<M = MemberId> {
    pub from: M,
    pub to: M,
    pub amount: f64,
}

impl<M> Settlement<M> {
    pub fn new(from: M, to: M, amount: f64) -> Self {
        Self { from, to, amount }
    }
}

/// Net position of one member, in balance-map order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance<M = MemberId> {
    pub member: M,
    pub balance: f64,
}

/// Balances plus the transfers that retire them
///
/// Produced by [`crate::settlement::plan`] for callers that show both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementPlan<M = MemberId> {
    pub balances: Vec<MemberBalance<M>>,
    pub settlements: Vec<Settlement<M>>,
}

impl<M> SettlementPlan<M> {
    /// Sum of all settlement amounts
    pub fn total_transferred(&self) -> f64 {
        self.settlements.iter().map(|s| s.amount).sum()
    }

    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}
