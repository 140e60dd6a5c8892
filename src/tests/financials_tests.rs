use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::models::{ExpenseSplit, ExpenseStatus};
use crate::service::FairsplitService;
use crate::storage::Storage;
use crate::storage::in_memory::InMemoryStorage;
use crate::tests::seed_group;

#[test]
fn unknown_group_returns_zeroed_financials() {
    let _ = env_logger::try_init();
    let mut storage = InMemoryStorage::new();
    let service = FairsplitService::new(&mut storage);

    let financials = service.monthly_financials(Uuid::new_v4(), Utc::now());

    assert_eq!(financials.total_spend, Decimal::ZERO);
    assert!(financials.balances.is_empty());
    assert_eq!(financials.member_count, 0);
    assert!(financials.group.is_none());
}

#[test]
fn two_member_split_yields_symmetric_balances() {
    let _ = env_logger::try_init();
    let mut storage = InMemoryStorage::new();
    let mut service = FairsplitService::new(&mut storage);
    let (group, users) = seed_group(&mut service, &["Alice", "Bob"], dec!(2000));

    service
        .add_expense(
            &group,
            users[0].id,
            dec!(100.00),
            "Dinner".to_string(),
            "Food".to_string(),
            vec![
                ExpenseSplit::accepted(users[0].id, dec!(50.00)),
                ExpenseSplit::accepted(users[1].id, dec!(50.00)),
            ],
        )
        .unwrap();

    let financials = service.monthly_financials(group.id, Utc::now());
    assert_eq!(financials.total_spend, dec!(100.00));
    assert_eq!(financials.member_count, 2);
    assert_eq!(financials.balances[&users[0].id], dec!(50.00));
    assert_eq!(financials.balances[&users[1].id], dec!(-50.00));
}

#[test]
fn singleton_member_keeps_full_paid_amount() {
    let _ = env_logger::try_init();
    let mut storage = InMemoryStorage::new();
    let mut service = FairsplitService::new(&mut storage);
    let (group, users) = seed_group(&mut service, &["Solo"], dec!(2000));

    // The split back to themselves must not cancel the payment out.
    service
        .add_expense(
            &group,
            users[0].id,
            dec!(80.00),
            "Groceries".to_string(),
            "Food".to_string(),
            vec![ExpenseSplit::accepted(users[0].id, dec!(80.00))],
        )
        .unwrap();

    let financials = service.monthly_financials(group.id, Utc::now());
    assert_eq!(financials.member_count, 1);
    assert_eq!(financials.balances[&users[0].id], dec!(80.00));
}

#[test]
fn balances_sum_to_zero_across_the_group() {
    let _ = env_logger::try_init();
    let mut storage = InMemoryStorage::new();
    let mut service = FairsplitService::new(&mut storage);
    let (group, users) = seed_group(&mut service, &["Alice", "Bob", "Chandra"], dec!(2000));

    service
        .add_expense(
            &group,
            users[0].id,
            dec!(90.00),
            "Brunch".to_string(),
            "Food".to_string(),
            vec![
                ExpenseSplit::accepted(users[0].id, dec!(30.00)),
                ExpenseSplit::accepted(users[1].id, dec!(30.00)),
                ExpenseSplit::accepted(users[2].id, dec!(30.00)),
            ],
        )
        .unwrap();
    service
        .add_expense(
            &group,
            users[1].id,
            dec!(45.50),
            "Fuel".to_string(),
            "Transportation".to_string(),
            vec![
                ExpenseSplit::accepted(users[1].id, dec!(20.50)),
                ExpenseSplit::accepted(users[2].id, dec!(25.00)),
            ],
        )
        .unwrap();

    let financials = service.monthly_financials(group.id, Utc::now());
    let sum: Decimal = financials.balances.values().copied().sum();
    assert_eq!(sum, Decimal::ZERO);
    assert_eq!(financials.total_spend, dec!(135.50));
}

#[test]
fn expenses_outside_the_current_month_are_ignored() {
    let _ = env_logger::try_init();
    let mut storage = InMemoryStorage::new();
    let mut service = FairsplitService::new(&mut storage);
    let (group, users) = seed_group(&mut service, &["Alice", "Bob"], dec!(2000));

    let expense = service
        .add_expense(
            &group,
            users[0].id,
            dec!(100.00),
            "Old dinner".to_string(),
            "Food".to_string(),
            vec![
                ExpenseSplit::accepted(users[0].id, dec!(50.00)),
                ExpenseSplit::accepted(users[1].id, dec!(50.00)),
            ],
        )
        .unwrap();
    drop(service);

    // Push the expense out of the current month.
    let mut backdated = storage.get_expense(expense.id).unwrap();
    backdated.created_at = Utc::now() - Duration::days(40);
    storage.update_expense(backdated).unwrap();

    let service = FairsplitService::new(&mut storage);
    let financials = service.monthly_financials(group.id, Utc::now());
    assert_eq!(financials.total_spend, Decimal::ZERO);
    assert_eq!(financials.balances[&users[0].id], Decimal::ZERO);
    assert_eq!(financials.balances[&users[1].id], Decimal::ZERO);
}

#[test]
fn pending_and_rejected_expenses_are_excluded() {
    let _ = env_logger::try_init();
    let mut storage = InMemoryStorage::new();
    let mut service = FairsplitService::new(&mut storage);
    let (group, users) = seed_group(&mut service, &["Alice", "Bob"], dec!(2000));

    let rejected = service
        .add_expense(
            &group,
            users[0].id,
            dec!(60.00),
            "Contested cab".to_string(),
            "Transportation".to_string(),
            vec![
                ExpenseSplit::accepted(users[0].id, dec!(30.00)),
                ExpenseSplit::accepted(users[1].id, dec!(30.00)),
            ],
        )
        .unwrap();
    service.reject_expense(rejected.id).unwrap();

    let pending = service
        .add_expense(
            &group,
            users[0].id,
            dec!(40.00),
            "Unconfirmed".to_string(),
            "Miscellaneous".to_string(),
            vec![
                ExpenseSplit::accepted(users[0].id, dec!(20.00)),
                ExpenseSplit::accepted(users[1].id, dec!(20.00)),
            ],
        )
        .unwrap();
    drop(service);

    let mut not_yet_approved = storage.get_expense(pending.id).unwrap();
    not_yet_approved.status = ExpenseStatus::Pending;
    storage.update_expense(not_yet_approved).unwrap();

    let service = FairsplitService::new(&mut storage);
    let financials = service.monthly_financials(group.id, Utc::now());
    assert_eq!(financials.total_spend, Decimal::ZERO);
    assert_eq!(financials.balances[&users[1].id], Decimal::ZERO);
}
