//! Group Ledger Tests
//!
//! Membership, expense validation and removal, access checks, and the
//! settlement views the ledger derives from its history.

use chrono::{TimeZone, Utc};
use khata_core::{
    ExpenseError, GroupLedger, LedgerError, LedgerEvent, MemberId, NewExpense, Settlement, Split,
};
use uuid::Uuid;

// ============================================================================
// Test Helpers
// ============================================================================

fn member(id: &str) -> MemberId {
    MemberId::from(id)
}

fn request(description: &str, amount: f64, splits: &[(&str, f64)]) -> NewExpense {
    NewExpense::new(
        description,
        amount,
        splits
            .iter()
            .map(|(id, owed)| Split::new(member(id), *owed))
            .collect(),
    )
}

/// Ledger with alice (creator), bob and carol
fn create_test_ledger() -> GroupLedger {
    let mut ledger = GroupLedger::new("Goa Trip", member("alice")).unwrap();
    ledger.join(member("bob"));
    ledger.join(member("carol"));
    ledger
}

// ============================================================================
// Creation and Membership
// ============================================================================

#[test]
fn test_creator_is_first_member() {
    let ledger = GroupLedger::new("  Flat 4B ", member("alice")).unwrap();

    assert_eq!(ledger.name(), "Flat 4B");
    assert_eq!(ledger.created_by(), &member("alice"));
    assert_eq!(ledger.members(), &[member("alice")]);
    assert!(ledger.expenses().is_empty());
}

#[test]
fn test_blank_name_rejected() {
    let result = GroupLedger::new("   ", member("alice"));
    assert_eq!(result.unwrap_err(), LedgerError::EmptyName);
}

#[test]
fn test_join_is_idempotent() {
    let mut ledger = create_test_ledger();

    assert!(!ledger.join(member("bob")), "Existing member should not be re-added");
    assert!(ledger.join(member("dave")));
    assert_eq!(
        ledger.members(),
        &[member("alice"), member("bob"), member("carol"), member("dave")]
    );
}

#[test]
fn test_events_record_history() {
    let mut ledger = create_test_ledger();
    let expense_id = ledger
        .add_expense(member("alice"), request("Cab", 30.0, &[("bob", 30.0)]))
        .unwrap()
        .id();
    ledger.remove_expense(expense_id).unwrap();

    let types: Vec<&str> = ledger
        .events()
        .events()
        .iter()
        .map(LedgerEvent::event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            "group_created",
            "member_joined",
            "member_joined",
            "expense_added",
            "expense_removed"
        ]
    );
    assert_eq!(ledger.events().events_of_type("member_joined").len(), 2);
}

// ============================================================================
// Expenses
// ============================================================================

#[test]
fn test_add_expense_stores_validated_record() {
    let mut ledger = create_test_ledger();
    let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let expense = ledger
        .add_expense_at(
            member("bob"),
            request(" Dinner ", 90.0, &[("alice", 30.0), ("bob", 30.0), ("carol", 30.0)]),
            date,
        )
        .unwrap();

    assert_eq!(expense.description(), "Dinner");
    assert_eq!(expense.paid_by(), &member("bob"));
    assert_eq!(expense.date(), date);
    assert_eq!(ledger.expenses().len(), 1);
}

#[test]
fn test_invalid_expense_not_stored() {
    let mut ledger = create_test_ledger();

    let result = ledger.add_expense(member("alice"), request("Refund", -5.0, &[("bob", 5.0)]));

    assert_eq!(
        result.unwrap_err(),
        LedgerError::InvalidExpense(ExpenseError::NonPositiveAmount { amount: -5.0 })
    );
    assert!(ledger.expenses().is_empty());
    assert!(ledger.events().events_of_type("expense_added").is_empty());
}

#[test]
fn test_expense_without_splits_rejected() {
    let mut ledger = create_test_ledger();

    let result = ledger.add_expense(member("alice"), request("Snacks", 5.0, &[]));

    assert_eq!(
        result.unwrap_err(),
        LedgerError::InvalidExpense(ExpenseError::NoSplits)
    );
}

#[test]
fn test_outsider_splits_accepted() {
    let mut ledger = create_test_ledger();

    ledger
        .add_expense(member("alice"), request("Museum", 20.0, &[("guest", 20.0)]))
        .unwrap();

    assert_eq!(
        ledger.settlements(),
        vec![Settlement::new(member("guest"), member("alice"), 20.0)]
    );
}

#[test]
fn test_remove_expense() {
    let mut ledger = create_test_ledger();
    let id = ledger
        .add_expense(member("alice"), request("Cab", 30.0, &[("bob", 30.0)]))
        .unwrap()
        .id();

    let removed = ledger.remove_expense(id).unwrap();

    assert_eq!(removed.id(), id);
    assert!(ledger.expense(id).is_none());
    assert!(ledger.settlements().is_empty());
}

#[test]
fn test_remove_unknown_expense() {
    let mut ledger = create_test_ledger();
    let missing = Uuid::new_v4();

    assert_eq!(
        ledger.remove_expense(missing).unwrap_err(),
        LedgerError::ExpenseNotFound(missing)
    );
}

// ============================================================================
// Settlement Views
// ============================================================================

#[test]
fn test_settlements_recomputed_after_each_change() {
    let mut ledger = create_test_ledger();

    ledger
        .add_expense(
            member("alice"),
            request("Hotel", 90.0, &[("alice", 30.0), ("bob", 30.0), ("carol", 30.0)]),
        )
        .unwrap();
    assert_eq!(
        ledger.settlements(),
        vec![
            Settlement::new(member("bob"), member("alice"), 30.0),
            Settlement::new(member("carol"), member("alice"), 30.0),
        ]
    );

    ledger
        .add_expense(member("bob"), request("Fuel", 30.0, &[("carol", 30.0)]))
        .unwrap();
    assert_eq!(
        ledger.settlements(),
        vec![Settlement::new(member("carol"), member("alice"), 60.0)]
    );
}

#[test]
fn test_settlement_plan_lists_every_member() {
    let mut ledger = create_test_ledger();
    ledger
        .add_expense(member("alice"), request("Cab", 30.0, &[("bob", 30.0)]))
        .unwrap();

    let plan = ledger.settlement_plan();

    assert_eq!(plan.balances.len(), 3);
    assert_eq!(plan.balances[2].member, member("carol"));
    assert_eq!(plan.balances[2].balance, 0.0);
    assert_eq!(plan.total_transferred(), 30.0);
    assert!(!plan.is_settled());
}

#[test]
fn test_balances_match_expense_history() {
    let mut ledger = create_test_ledger();
    ledger
        .add_expense(member("carol"), request("Tickets", 45.0, &[("alice", 15.0), ("bob", 15.0), ("carol", 15.0)]))
        .unwrap();

    let balances = ledger.balances();

    assert_eq!(balances.get(&member("carol")), Some(30.0));
    assert_eq!(balances.get(&member("alice")), Some(-15.0));
    assert_eq!(ledger.expense_records().len(), 1);
}

// ============================================================================
// Access Checks
// ============================================================================

#[test]
fn test_settlements_for_non_member_rejected() {
    let ledger = create_test_ledger();

    assert_eq!(
        ledger.settlements_for(&member("mallory")).unwrap_err(),
        LedgerError::NotAMember(member("mallory"))
    );
    assert!(ledger.settlements_for(&member("bob")).is_ok());
}

#[test]
fn test_only_creator_may_delete() {
    let ledger = create_test_ledger();

    assert!(ledger.authorize_delete(&member("alice")).is_ok());
    assert_eq!(
        ledger.authorize_delete(&member("bob")).unwrap_err(),
        LedgerError::Forbidden(member("bob"))
    );
}
