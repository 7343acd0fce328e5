//! Expense models
//!
//! Two shapes live here:
//! - [`ExpenseRecord`]: the plain input the settlement calculator consumes
//!   (payer, amount, per-member owed amounts). Generic over the member
//!   identity type.
//! - [`Expense`]: the ledger's stored record, carrying an id, description
//!   and date on top of the same financial data.
//!
//! Validation happens when an [`Expense`] is created. The calculator itself
//! never rejects a record.

use crate::models::member::MemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised when an expense fails validation
#[derive(Debug, Error, PartialEq)]
pub enum ExpenseError {
    #[error("Expense description is required")]
    EmptyDescription,

    #[error("Expense amount must be positive, got {amount}")]
    NonPositiveAmount { amount: f64 },

    #[error("Expense amount must be a finite number")]
    NonFiniteAmount,

    #[error("Expense must have at least one split")]
    NoSplits,

    #[error("Invalid split for member {member}: {amount}")]
    InvalidSplit { member: MemberId, amount: f64 },
}

/// Portion of an expense owed by one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split<M = MemberId> {
    pub member: M,
    pub amount: f64,
}

impl<M> Split<M> {
    pub fn new(member: M, amount: f64) -> Self {
        Self { member, amount }
    }
}

/// Calculator input: who fronted the money and who owes what
///
/// The sum of `splits` should equal `amount`, but nothing depends on it.
///
/// # Example
/// ```
/// use khata_core::{ExpenseRecord, Split};
///
/// let dinner = ExpenseRecord::new(
///     "A",
///     90.0,
///     vec![Split::new("A", 30.0), Split::new("B", 30.0), Split::new("C", 30.0)],
/// );
/// assert_eq!(dinner.splits.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord<M = MemberId> {
    pub payer: M,
    pub amount: f64,
    pub splits: Vec<Split<M>>,
}

impl<M> ExpenseRecord<M> {
    pub fn new(payer: M, amount: f64, splits: Vec<Split<M>>) -> Self {
        Self {
            payer,
            amount,
            splits,
        }
    }
}

/// Request to record a new expense in a group
///
/// The payer is supplied separately (it is the authenticated caller in the
/// hosting application).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub splits: Vec<Split>,
}

impl NewExpense {
    pub fn new(description: impl Into<String>, amount: f64, splits: Vec<Split>) -> Self {
        Self {
            description: description.into(),
            amount,
            splits,
        }
    }

    /// Check the request before it is stored
    ///
    /// Rules:
    /// - description is non-empty after trimming
    /// - amount is finite and strictly positive
    /// - at least one split, each with a finite, non-negative amount
    ///
    /// Split totals are not compared against `amount`.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseError::EmptyDescription);
        }
        if !self.amount.is_finite() {
            return Err(ExpenseError::NonFiniteAmount);
        }
        if self.amount <= 0.0 {
            return Err(ExpenseError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.splits.is_empty() {
            return Err(ExpenseError::NoSplits);
        }
        if let Some(bad) = self
            .splits
            .iter()
            .find(|split| !split.amount.is_finite() || split.amount < 0.0)
        {
            return Err(ExpenseError::InvalidSplit {
                member: bad.member.clone(),
                amount: bad.amount,
            });
        }
        Ok(())
    }
}

/// An expense as stored by a group ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: Uuid,
    description: String,
    amount: f64,
    paid_by: MemberId,
    splits: Vec<Split>,
    date: DateTime<Utc>,
}

impl Expense {
    /// Validate a request and turn it into a stored expense
    ///
    /// Assigns a fresh UUID. The description is stored trimmed.
    pub fn create(
        paid_by: MemberId,
        request: NewExpense,
        date: DateTime<Utc>,
    ) -> Result<Self, ExpenseError> {
        request.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            description: request.description.trim().to_string(),
            amount: request.amount,
            paid_by,
            splits: request.splits,
            date,
        })
    }

    /// Re-run creation rules on a stored expense (used when restoring)
    pub fn validate(&self) -> Result<(), ExpenseError> {
        NewExpense {
            description: self.description.clone(),
            amount: self.amount,
            splits: self.splits.clone(),
        }
        .validate()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn paid_by(&self) -> &MemberId {
        &self.paid_by
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Members referenced by the expense (payer first, then split order)
    pub fn participants(&self) -> impl Iterator<Item = &MemberId> {
        std::iter::once(&self.paid_by).chain(self.splits.iter().map(|split| &split.member))
    }

    /// Strip descriptive fields, leaving what the calculator needs
    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord {
            payer: self.paid_by.clone(),
            amount: self.amount,
            splits: self.splits.clone(),
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        expense.to_record()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splits(pairs: &[(&str, f64)]) -> Vec<Split> {
        pairs
            .iter()
            .map(|(member, amount)| Split::new(MemberId::from(*member), *amount))
            .collect()
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        let request = NewExpense::new("Groceries", 40.0, splits(&[("a", 20.0), ("b", 20.0)]));
        assert_eq!(request.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        let request = NewExpense::new("   ", 40.0, splits(&[("a", 40.0)]));
        assert_eq!(request.validate(), Err(ExpenseError::EmptyDescription));
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let request = NewExpense::new("Nothing", 0.0, splits(&[("a", 0.0)]));
        assert_eq!(
            request.validate(),
            Err(ExpenseError::NonPositiveAmount { amount: 0.0 })
        );
    }

    #[test]
    fn test_validate_rejects_nan_amount() {
        let request = NewExpense::new("Broken", f64::NAN, splits(&[("a", 1.0)]));
        assert_eq!(request.validate(), Err(ExpenseError::NonFiniteAmount));
    }

    #[test]
    fn test_validate_rejects_missing_splits() {
        let request = NewExpense::new("Taxi", 12.0, Vec::new());
        assert_eq!(request.validate(), Err(ExpenseError::NoSplits));
    }

    #[test]
    fn test_validate_rejects_negative_split() {
        let request = NewExpense::new("Taxi", 12.0, splits(&[("a", 14.0), ("b", -2.0)]));
        assert_eq!(
            request.validate(),
            Err(ExpenseError::InvalidSplit {
                member: MemberId::from("b"),
                amount: -2.0,
            })
        );
    }

    #[test]
    fn test_create_trims_description_and_assigns_id() {
        let request = NewExpense::new("  Rent  ", 900.0, splits(&[("a", 450.0), ("b", 450.0)]));
        let first = Expense::create(MemberId::from("a"), request.clone(), Utc::now()).unwrap();
        let second = Expense::create(MemberId::from("a"), request, Utc::now()).unwrap();

        assert_eq!(first.description(), "Rent");
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_to_record_keeps_financial_fields() {
        let request = NewExpense::new("Rent", 900.0, splits(&[("a", 450.0), ("b", 450.0)]));
        let expense = Expense::create(MemberId::from("a"), request, Utc::now()).unwrap();
        let record = ExpenseRecord::from(&expense);

        assert_eq!(record.payer, MemberId::from("a"));
        assert_eq!(record.amount, 900.0);
        assert_eq!(record.splits, expense.splits().to_vec());
    }
}
