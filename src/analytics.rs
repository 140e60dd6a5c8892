//! Monthly aggregation and fairness-alert payloads, plus the pure stages the
//! analyzer composes (limit derivation, balance ordering, debt
//! classification). The walk over stored expenses lives in the service.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::constants::{HARD_FLOOR_MULTIPLIER, SOFT_SHARE_RATIO};
use crate::models::Group;

/// Current-month financial picture of a group. Balances are keyed by member
/// id; positive means the member is owed money, negative means they owe.
#[derive(Clone, Debug, Serialize)]
pub struct MonthlyFinancials {
    pub total_spend: Decimal,
    pub balances: HashMap<Uuid, Decimal>,
    pub member_count: usize,
    /// `None` when the group id did not resolve; callers detect the missing
    /// group by this (and the serialized payload by the absent key).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

impl MonthlyFinancials {
    /// Zeroed result for an unknown group.
    pub fn empty() -> Self {
        MonthlyFinancials {
            total_spend: Decimal::ZERO,
            balances: HashMap::new(),
            member_count: 0,
            group: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Warning,
    Critical,
}

#[derive(Clone, Debug, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    /// Formats the user-facing message for a debtor. Debt is shown rounded to
    /// whole currency units.
    pub fn for_member(name: &str, debt: Decimal, level: AlertLevel) -> Alert {
        let rounded = debt.round_dp(0);
        let message = match level {
            AlertLevel::Warning => {
                format!("🟡 **{}** is lagging (₹{}) this month.", name, rounded)
            }
            AlertLevel::Critical => {
                format!("🔴 **{}** hit the monthly limit (₹{}). Settle Up.", name, rounded)
            }
        };
        Alert { level, message }
    }
}

/// Observability block attached to a successful analysis.
#[derive(Clone, Debug, Serialize)]
pub struct FairnessStats {
    pub month: String,
    pub total_spend: f64,
    pub floor_setting: f64,
    pub dynamic_hard_limit: f64,
}

/// Per-member enrichment for group detail views.
#[derive(Clone, Debug, Serialize)]
pub struct MemberDetail {
    pub name: String,
    pub balance: f64,
    pub transaction_count: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct FairnessReport {
    pub alerts: Vec<Alert>,
    pub balances: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FairnessStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_details: Option<Vec<MemberDetail>>,
}

impl FairnessReport {
    /// Report for an unknown group: no alerts, no balances, no stats key.
    pub fn empty() -> Self {
        FairnessReport {
            alerts: Vec::new(),
            balances: BTreeMap::new(),
            stats: None,
            member_details: None,
        }
    }
}

/// Expense counters for group listings.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub total_transactions: usize,
    pub approved_transactions: usize,
    pub pending_transactions: usize,
    pub net_amount: f64,
    pub member_count: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Dynamic debt thresholds for one group-month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebtLimits {
    pub soft: Decimal,
    pub hard: Decimal,
}

/// Derives the soft/hard limits from the group floor and the fair share.
/// Soft: the floor or half the share, whichever is higher. Hard: twice the
/// floor or the full share, whichever is higher.
pub fn debt_limits(min_floor: Decimal, fair_share: Decimal) -> DebtLimits {
    DebtLimits {
        soft: min_floor.max(fair_share * SOFT_SHARE_RATIO),
        hard: (min_floor * HARD_FLOOR_MULTIPLIER).max(fair_share),
    }
}

/// Sort stage: ascending by balance so the deepest debtor comes first, with
/// the member id as secondary key so equal balances order the same way on
/// every run.
pub fn sorted_balances(balances: &HashMap<Uuid, Decimal>) -> Vec<(Uuid, Decimal)> {
    let mut pairs: Vec<(Uuid, Decimal)> = balances.iter().map(|(&id, &bal)| (id, bal)).collect();
    pairs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

/// Classify stage: debts in `[soft, hard)` warn, `hard` and above are
/// critical, anything below the soft limit stays quiet.
pub fn classify_debt(debt: Decimal, limits: &DebtLimits) -> Option<AlertLevel> {
    if debt >= limits.hard {
        Some(AlertLevel::Critical)
    } else if debt >= limits.soft {
        Some(AlertLevel::Warning)
    } else {
        None
    }
}
