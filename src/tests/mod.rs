mod financials_tests;

use rust_decimal::Decimal;

use crate::models::{Group, GroupKind, User};
use crate::service::FairsplitService;

/// Creates one user per name and a group containing all of them, owned by
/// the first.
pub fn seed_group(
    service: &mut FairsplitService<'_>,
    names: &[&str],
    min_floor: Decimal,
) -> (Group, Vec<User>) {
    let users: Vec<User> = names
        .iter()
        .map(|name| {
            service
                .create_user(
                    name.to_string(),
                    format!("{}@example.com", name.to_lowercase()),
                )
                .unwrap()
        })
        .collect();

    let group = service
        .create_group(
            &users[0],
            "Test Group".to_string(),
            GroupKind::Long,
            Some(min_floor),
        )
        .unwrap();
    for user in &users[1..] {
        service.add_member(&group, user).unwrap();
    }

    (group, users)
}
