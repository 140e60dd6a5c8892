use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")] // Ensures JSON uses "SHORT" / "LONG"
pub enum GroupKind {
    Short,
    Long,
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupKind::Short => "SHORT",
            GroupKind::Long => "LONG",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub kind: GroupKind,
    /// Debt a member may carry before alerts start firing.
    pub min_floor: Decimal,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}
