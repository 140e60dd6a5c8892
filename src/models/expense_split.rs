use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-member opinion on a split. Has no effect on balance math; only the
/// parent expense's status gates inclusion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitStatus {
    Pending,
    Accepted,
    Rejected,
    Disputed,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpenseSplit {
    pub user_id: Uuid,
    pub owed_amount: Decimal,
    pub status: SplitStatus,
}

impl ExpenseSplit {
    pub fn accepted(user_id: Uuid, owed_amount: Decimal) -> Self {
        ExpenseSplit {
            user_id,
            owed_amount,
            status: SplitStatus::Accepted,
        }
    }
}
