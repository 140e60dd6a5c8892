use thiserror::Error;

#[derive(Error, Debug)]
pub enum FairsplitError {
    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// User is already a member of the group
    #[error("User {0} is already a group member")]
    AlreadyGroupMember(String),

    /// User is not a member of the group
    #[error("User {0} is not a group member")]
    NotGroupMember(String),

    /// Group is at its member cap
    #[error("Group {0} is full")]
    GroupFull(String),

    /// Group has been archived and no longer accepts expenses
    #[error("Group {0} is archived")]
    GroupArchived(String),

    /// Split amounts don't add up to the expense amount
    #[error("Invalid split amounts")]
    InvalidSplit,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    StorageError(String),
}
