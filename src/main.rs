use chrono::Utc;
use fairsplit::config::CONFIG;
use fairsplit::models::{ExpenseSplit, GroupKind};
use fairsplit::{FairsplitService, InMemoryStorage};
use rust_decimal_macros::dec;

// Seeds an in-memory group and prints the fairness analysis payload.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(CONFIG.log_level.as_str()),
    )
    .init();

    let mut storage = InMemoryStorage::new();
    let mut service = FairsplitService::new(&mut storage);

    let alice = service.create_user("Alice".to_string(), "alice@example.com".to_string())?;
    let bob = service.create_user("Bob".to_string(), "bob@example.com".to_string())?;
    let chandra = service.create_user("Chandra".to_string(), "chandra@example.com".to_string())?;

    let group = service.create_group(
        &alice,
        "Flat 4B".to_string(),
        GroupKind::Long,
        Some(dec!(500.00)),
    )?;
    service.add_member(&group, &bob)?;
    service.add_member(&group, &chandra)?;

    service.add_expense(
        &group,
        alice.id,
        dec!(2400.00),
        "Groceries".to_string(),
        "Food".to_string(),
        vec![
            ExpenseSplit::accepted(alice.id, dec!(800.00)),
            ExpenseSplit::accepted(bob.id, dec!(800.00)),
            ExpenseSplit::accepted(chandra.id, dec!(800.00)),
        ],
    )?;
    service.add_expense(
        &group,
        bob.id,
        dec!(600.00),
        "Cab to airport".to_string(),
        "Transportation".to_string(),
        vec![
            ExpenseSplit::accepted(bob.id, dec!(300.00)),
            ExpenseSplit::accepted(chandra.id, dec!(300.00)),
        ],
    )?;

    let report = service.fairness_analysis_with_members(group.id, Utc::now());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
