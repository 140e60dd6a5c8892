pub mod expense;
pub mod expense_split;
pub mod group;
pub mod group_member;
pub mod user;

pub use expense::{Expense, ExpenseStatus};
pub use expense_split::{ExpenseSplit, SplitStatus};
pub use group::{Group, GroupKind};
pub use group_member::GroupMember;
pub use user::User;
