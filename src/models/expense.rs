use super::expense_split::ExpenseSplit;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
    Disputed,
}

impl std::fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpenseStatus::Pending => "PENDING",
            ExpenseStatus::Approved => "APPROVED",
            ExpenseStatus::Rejected => "REJECTED",
            ExpenseStatus::Disputed => "DISPUTED",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub payer_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub status: ExpenseStatus,
    pub dispute_reason: Option<String>,
    pub splits: Vec<ExpenseSplit>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Only rejected (or still-pending) expenses drop out of the books;
    /// disputed ones keep counting until formally rejected (benefit of the
    /// doubt).
    pub fn counts_toward_balances(&self) -> bool {
        matches!(
            self.status,
            ExpenseStatus::Approved | ExpenseStatus::Disputed
        )
    }
}
