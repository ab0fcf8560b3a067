//! Role levels matching the default moderation thresholds.

/// Level of an ordinary user, writes are queued for approval
pub const REQUESTER: i32 = 1;

/// Level allowed to write sources directly
pub const MODERATOR: i32 = 2;

/// Level allowed to run URL audits and duplicate scans
pub const ADMIN: i32 = 3;
