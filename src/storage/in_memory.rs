use std::collections::HashMap;

use uuid::Uuid;

use crate::error::FairsplitError;
use crate::models::*;
use crate::storage::Storage;

#[derive(Default)]
pub struct InMemoryStorage {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    members: Vec<GroupMember>,
    expenses: HashMap<Uuid, Expense>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for InMemoryStorage {
    fn create_user(&mut self, user: User) -> Result<User, FairsplitError> {
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.users.get(&user_id).cloned()
    }

    fn create_group(&mut self, group: Group) -> Result<Group, FairsplitError> {
        self.groups.insert(group.id, group.clone());
        Ok(group)
    }

    fn update_group(&mut self, group: Group) -> Result<Group, FairsplitError> {
        if !self.groups.contains_key(&group.id) {
            return Err(FairsplitError::GroupNotFound(group.id.to_string()));
        }
        self.groups.insert(group.id, group.clone());
        Ok(group)
    }

    fn get_group(&self, group_id: Uuid) -> Option<Group> {
        self.groups.get(&group_id).cloned()
    }

    fn list_groups(&self) -> Vec<Group> {
        self.groups.values().cloned().collect()
    }

    fn add_member(&mut self, member: GroupMember) -> Result<(), FairsplitError> {
        if self.is_member(member.group_id, member.user_id) {
            return Err(FairsplitError::AlreadyGroupMember(
                member.user_id.to_string(),
            ));
        }
        self.members.push(member);
        Ok(())
    }

    fn is_member(&self, group_id: Uuid, user_id: Uuid) -> bool {
        self.members
            .iter()
            .any(|m| m.group_id == group_id && m.user_id == user_id)
    }

    fn list_members(&self, group_id: Uuid) -> Vec<GroupMember> {
        self.members
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect()
    }

    fn create_expense(&mut self, expense: Expense) -> Result<Expense, FairsplitError> {
        self.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    fn update_expense(&mut self, expense: Expense) -> Result<Expense, FairsplitError> {
        if !self.expenses.contains_key(&expense.id) {
            return Err(FairsplitError::ExpenseNotFound(expense.id.to_string()));
        }
        self.expenses.insert(expense.id, expense.clone());
        Ok(expense)
    }

    fn delete_expense(&mut self, expense_id: Uuid) -> Result<(), FairsplitError> {
        // Splits live inside the expense, so they go with it.
        self.expenses
            .remove(&expense_id)
            .map(|_| ())
            .ok_or_else(|| FairsplitError::ExpenseNotFound(expense_id.to_string()))
    }

    fn get_expense(&self, expense_id: Uuid) -> Option<Expense> {
        self.expenses.get(&expense_id).cloned()
    }

    fn list_expenses(&self, group_id: Uuid) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .cloned()
            .collect();
        expenses.sort_by_key(|e| e.created_at);
        expenses
    }
}
