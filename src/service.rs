use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, Utc};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use crate::analytics::{
    Alert, DebtLimits, FairnessReport, FairnessStats, GroupSummary, MemberDetail,
    MonthlyFinancials, classify_debt, debt_limits, sorted_balances,
};
use crate::config::CONFIG;
use crate::constants::{MAX_GROUP_MEMBERS, SHORT_GROUP_ARCHIVE_DAYS, SPLIT_TOLERANCE};
use crate::error::FairsplitError;
use crate::models::*;
use crate::storage::Storage;

pub struct FairsplitService<'a> {
    pub storage: &'a mut dyn Storage,
}

impl<'a> FairsplitService<'a> {
    pub fn new(storage: &'a mut dyn Storage) -> Self {
        info!("Initializing FairsplitService");
        Self { storage }
    }

    // USER MANAGEMENT

    pub fn create_user(&mut self, name: String, email: String) -> Result<User, FairsplitError> {
        info!("Creating user with email: {}", email);
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: now,
            updated_at: now,
        };

        let created = self.storage.create_user(user)?;
        debug!("User created with ID: {}", created.id);
        Ok(created)
    }

    // GROUP MANAGEMENT

    pub fn create_group(
        &mut self,
        owner: &User,
        name: String,
        kind: GroupKind,
        min_floor: Option<Decimal>,
    ) -> Result<Group, FairsplitError> {
        info!("Creating group '{}' for owner ID: {}", name, owner.id);
        let now = Utc::now();
        let group = Group {
            id: Uuid::new_v4(),
            name,
            kind,
            min_floor: min_floor.unwrap_or(CONFIG.default_min_floor),
            owner_id: Some(owner.id),
            created_at: now,
            archived_at: None,
        };

        let created = self.storage.create_group(group)?;
        // Owner starts as the first member
        self.storage.add_member(GroupMember {
            group_id: created.id,
            user_id: owner.id,
            joined_at: now,
        })?;
        debug!("Group created with ID: {}", created.id);
        Ok(created)
    }

    pub fn add_member(&mut self, group: &Group, user: &User) -> Result<GroupMember, FairsplitError> {
        info!("Adding user {} to group {}", user.id, group.id);
        if self.storage.list_members(group.id).len() >= MAX_GROUP_MEMBERS {
            warn!("Group {} is at the member cap", group.id);
            return Err(FairsplitError::GroupFull(group.id.to_string()));
        }

        let membership = GroupMember {
            group_id: group.id,
            user_id: user.id,
            joined_at: Utc::now(),
        };
        self.storage.add_member(membership.clone())?;
        debug!("User {} joined group {}", user.id, group.id);
        Ok(membership)
    }

    /// Marks short-term groups older than the archival window as archived.
    /// Returns how many groups were archived.
    pub fn archive_stale_groups(&mut self, now: DateTime<Utc>) -> Result<usize, FairsplitError> {
        let cutoff = now - Duration::days(SHORT_GROUP_ARCHIVE_DAYS);
        info!("Archiving short-term groups created before {}", cutoff);

        let stale: Vec<Group> = self
            .storage
            .list_groups()
            .into_iter()
            .filter(|g| g.kind == GroupKind::Short && !g.is_archived() && g.created_at < cutoff)
            .collect();

        let mut count = 0;
        for mut group in stale {
            group.archived_at = Some(now);
            self.storage.update_group(group)?;
            count += 1;
        }

        debug!("Archived {} groups", count);
        Ok(count)
    }

    // EXPENSE MANAGEMENT

    pub fn add_expense(
        &mut self,
        group: &Group,
        payer_id: Uuid,
        amount: Decimal,
        description: String,
        category: String,
        splits: Vec<ExpenseSplit>,
    ) -> Result<Expense, FairsplitError> {
        info!(
            "Creating expense in group {} paid by {} for amount {}",
            group.id, payer_id, amount
        );
        if group.is_archived() {
            warn!("Group {} is archived, rejecting expense", group.id);
            return Err(FairsplitError::GroupArchived(group.id.to_string()));
        }
        if !self.storage.is_member(group.id, payer_id) {
            warn!("Payer {} not in group {}", payer_id, group.id);
            return Err(FairsplitError::NotGroupMember(payer_id.to_string()));
        }
        for split in &splits {
            if !self.storage.is_member(group.id, split.user_id) {
                warn!("User {} in splits not in group {}", split.user_id, group.id);
                return Err(FairsplitError::NotGroupMember(split.user_id.to_string()));
            }
        }

        let split_total: Decimal = splits.iter().map(|s| s.owed_amount).sum();
        if (split_total - amount).abs() > SPLIT_TOLERANCE {
            warn!(
                "Split sum {} does not match expense amount {}",
                split_total, amount
            );
            return Err(FairsplitError::InvalidSplit);
        }

        let expense = Expense {
            id: Uuid::new_v4(),
            group_id: group.id,
            payer_id,
            amount,
            description,
            category,
            status: ExpenseStatus::Approved,
            dispute_reason: None,
            splits,
            created_at: Utc::now(),
        };

        let created = self.storage.create_expense(expense)?;
        debug!("Expense created with ID: {}", created.id);
        Ok(created)
    }

    pub fn approve_expense(&mut self, expense_id: Uuid) -> Result<Expense, FairsplitError> {
        self.set_expense_status(expense_id, ExpenseStatus::Approved, None)
    }

    pub fn reject_expense(&mut self, expense_id: Uuid) -> Result<Expense, FairsplitError> {
        self.set_expense_status(expense_id, ExpenseStatus::Rejected, None)
    }

    /// Flags an expense as disputed on behalf of a group member. The expense
    /// keeps counting toward balances until it is formally rejected.
    pub fn dispute_expense(
        &mut self,
        expense_id: Uuid,
        disputed_by: &User,
        reason: String,
    ) -> Result<Expense, FairsplitError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .ok_or_else(|| FairsplitError::ExpenseNotFound(expense_id.to_string()))?;
        if !self.storage.is_member(expense.group_id, disputed_by.id) {
            warn!(
                "User {} disputing expense {} without membership in group {}",
                disputed_by.id, expense_id, expense.group_id
            );
            return Err(FairsplitError::NotGroupMember(disputed_by.id.to_string()));
        }

        info!(
            "User {} disputing expense {}: {}",
            disputed_by.id, expense_id, reason
        );
        self.set_expense_status(expense_id, ExpenseStatus::Disputed, Some(reason))
    }

    pub fn delete_expense(&mut self, expense_id: Uuid) -> Result<(), FairsplitError> {
        info!("Deleting expense {}", expense_id);
        self.storage.delete_expense(expense_id)
    }

    fn set_expense_status(
        &mut self,
        expense_id: Uuid,
        status: ExpenseStatus,
        dispute_reason: Option<String>,
    ) -> Result<Expense, FairsplitError> {
        let expense = self
            .storage
            .get_expense(expense_id)
            .ok_or_else(|| FairsplitError::ExpenseNotFound(expense_id.to_string()))?;

        debug!(
            "Expense {} status {} -> {}",
            expense_id, expense.status, status
        );
        let updated = Expense {
            status,
            dispute_reason: dispute_reason.or(expense.dispute_reason.clone()),
            ..expense
        };
        self.storage.update_expense(updated)
    }

    // MONTHLY AGGREGATION

    /// Computes the group's current-month total spend and each member's net
    /// balance (paid minus consumed). Only expenses still counting toward
    /// balances are included; split statuses are ignored. An unknown group
    /// yields the zeroed result rather than an error.
    pub fn monthly_financials(&self, group_id: Uuid, now: DateTime<Utc>) -> MonthlyFinancials {
        let Some(group) = self.storage.get_group(group_id) else {
            debug!("Group {} not found, returning empty financials", group_id);
            return MonthlyFinancials::empty();
        };

        let members = self.storage.list_members(group_id);
        let member_count = members.len();
        debug!(
            "Aggregating {}-{:02} financials for group {} with {} members",
            now.year(),
            now.month(),
            group_id,
            member_count
        );

        let monthly: Vec<Expense> = self
            .storage
            .list_expenses(group_id)
            .into_iter()
            .filter(|e| {
                e.created_at.year() == now.year()
                    && e.created_at.month() == now.month()
                    && e.counts_toward_balances()
            })
            .collect();

        let total_spend: Decimal = monthly.iter().map(|e| e.amount).sum();

        let mut paid: HashMap<Uuid, Decimal> = HashMap::new();
        let mut consumed: HashMap<Uuid, Decimal> = HashMap::new();
        for expense in &monthly {
            *paid.entry(expense.payer_id).or_insert(Decimal::ZERO) += expense.amount;
            for split in &expense.splits {
                // Split status is deliberately ignored here; only the parent
                // expense's status gates inclusion.
                *consumed.entry(split.user_id).or_insert(Decimal::ZERO) += split.owed_amount;
            }
        }

        let mut balances: HashMap<Uuid, Decimal> = HashMap::with_capacity(member_count);
        for member in &members {
            let p = paid.get(&member.user_id).copied().unwrap_or(Decimal::ZERO);
            let c = consumed
                .get(&member.user_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            // Singleton groups keep the full paid amount: you paid yourself,
            // there is no debt to net out.
            let net = if member_count == 1 { p } else { p - c };
            balances.insert(member.user_id, net);
        }

        debug!(
            "Group {} total spend {} across {} expenses",
            group_id,
            total_spend,
            monthly.len()
        );
        MonthlyFinancials {
            total_spend,
            balances,
            member_count,
            group: Some(group),
        }
    }

    // FAIRNESS ANALYSIS

    /// Derives dynamic debt limits from the group floor and fair share, then
    /// tiers every debtor into no-alert / warning / critical. Alerts come out
    /// deepest-debt first.
    pub fn fairness_analysis(&self, group_id: Uuid, now: DateTime<Utc>) -> FairnessReport {
        let financials = self.monthly_financials(group_id, now);
        let Some(group) = &financials.group else {
            debug!("Group {} not found, returning empty report", group_id);
            return FairnessReport::empty();
        };

        let fair_share = if financials.member_count > 0 {
            financials.total_spend / Decimal::from(financials.member_count as u64)
        } else {
            Decimal::ZERO
        };
        let limits = debt_limits(group.min_floor, fair_share);
        debug!(
            "Group {} fair share {} soft limit {} hard limit {}",
            group_id, fair_share, limits.soft, limits.hard
        );

        let alerts = self.build_alerts(&financials.balances, &limits);

        let balances: BTreeMap<String, f64> = financials
            .balances
            .iter()
            .map(|(&id, bal)| (self.member_name(id), bal.to_f64().unwrap_or(0.0)))
            .collect();

        let stats = FairnessStats {
            month: now.format("%B").to_string(),
            total_spend: financials.total_spend.to_f64().unwrap_or(0.0),
            floor_setting: group.min_floor.to_f64().unwrap_or(0.0),
            dynamic_hard_limit: limits.hard.to_f64().unwrap_or(0.0),
        };

        FairnessReport {
            alerts,
            balances,
            stats: Some(stats),
            member_details: None,
        }
    }

    /// `fairness_analysis` plus per-member enrichment (balance and number of
    /// expenses paid this month) for group detail views.
    pub fn fairness_analysis_with_members(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> FairnessReport {
        let mut report = self.fairness_analysis(group_id, now);
        if report.stats.is_none() {
            return report;
        }

        // Transaction counts ignore status: a disputed or rejected expense is
        // still activity worth surfacing.
        let monthly: Vec<Expense> = self
            .storage
            .list_expenses(group_id)
            .into_iter()
            .filter(|e| e.created_at.year() == now.year() && e.created_at.month() == now.month())
            .collect();

        let mut details: Vec<MemberDetail> = Vec::new();
        for member in self.storage.list_members(group_id) {
            let name = self.member_name(member.user_id);
            let balance = report.balances.get(&name).copied().unwrap_or(0.0);
            let transaction_count = monthly.iter().filter(|e| e.payer_id == member.user_id).count();
            details.push(MemberDetail {
                name,
                balance,
                transaction_count,
            });
        }

        report.member_details = Some(details);
        report
    }

    /// Summary counters for group listings.
    pub fn group_summary(&self, group_id: Uuid) -> Result<GroupSummary, FairsplitError> {
        if self.storage.get_group(group_id).is_none() {
            return Err(FairsplitError::GroupNotFound(group_id.to_string()));
        }

        let expenses = self.storage.list_expenses(group_id);
        let net_amount: Decimal = expenses.iter().map(|e| e.amount).sum();
        Ok(GroupSummary {
            total_transactions: expenses.len(),
            approved_transactions: expenses
                .iter()
                .filter(|e| e.status == ExpenseStatus::Approved)
                .count(),
            pending_transactions: expenses
                .iter()
                .filter(|e| e.status == ExpenseStatus::Pending)
                .count(),
            net_amount: net_amount.to_f64().unwrap_or(0.0),
            member_count: self.storage.list_members(group_id).len(),
            last_activity: expenses.iter().map(|e| e.created_at).max(),
        })
    }

    // HELPERS

    fn build_alerts(
        &self,
        balances: &HashMap<Uuid, Decimal>,
        limits: &DebtLimits,
    ) -> Vec<Alert> {
        let mut alerts = Vec::new();
        for (user_id, balance) in sorted_balances(balances) {
            if balance >= Decimal::ZERO {
                // Creditors and settled members never alert.
                continue;
            }
            let debt = balance.abs();
            if let Some(level) = classify_debt(debt, limits) {
                alerts.push(Alert::for_member(&self.member_name(user_id), debt, level));
            }
        }
        alerts
    }

    fn member_name(&self, user_id: Uuid) -> String {
        self.storage
            .get_user(user_id)
            .map(|u| u.name)
            .unwrap_or_else(|| user_id.to_string())
    }
}
