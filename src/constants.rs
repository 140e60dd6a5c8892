use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maximum drift allowed between an expense amount and the sum of its splits.
pub const SPLIT_TOLERANCE: Decimal = dec!(0.01);

/// Hard cap on group size.
pub const MAX_GROUP_MEMBERS: usize = 32;

/// Short-term groups older than this are eligible for archival.
pub const SHORT_GROUP_ARCHIVE_DAYS: i64 = 14;

/// Soft limit kicks in at half the fair share (or the group floor, whichever
/// is higher).
pub const SOFT_SHARE_RATIO: Decimal = dec!(0.5);

/// Hard limit multiplies the group floor.
pub const HARD_FLOOR_MULTIPLIER: Decimal = dec!(2);
