use uuid::Uuid;

use crate::error::FairsplitError;
use crate::models::*;

pub trait Storage {
    fn create_user(&mut self, user: User) -> Result<User, FairsplitError>;
    fn get_user(&self, user_id: Uuid) -> Option<User>;

    fn create_group(&mut self, group: Group) -> Result<Group, FairsplitError>;
    fn update_group(&mut self, group: Group) -> Result<Group, FairsplitError>;
    fn get_group(&self, group_id: Uuid) -> Option<Group>;
    fn list_groups(&self) -> Vec<Group>;

    fn add_member(&mut self, member: GroupMember) -> Result<(), FairsplitError>;
    fn is_member(&self, group_id: Uuid, user_id: Uuid) -> bool;
    fn list_members(&self, group_id: Uuid) -> Vec<GroupMember>;

    fn create_expense(&mut self, expense: Expense) -> Result<Expense, FairsplitError>;
    fn update_expense(&mut self, expense: Expense) -> Result<Expense, FairsplitError>;
    fn delete_expense(&mut self, expense_id: Uuid) -> Result<(), FairsplitError>;
    fn get_expense(&self, expense_id: Uuid) -> Option<Expense>;
    fn list_expenses(&self, group_id: Uuid) -> Vec<Expense>;
}

pub mod in_memory;
