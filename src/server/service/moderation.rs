//! Role-based moderation policy.
//!
//! Maps an actor's role level to what they may do with sources. Thresholds come from
//! configuration so deployments can reshape their role ladder without code changes.

/// Role level assumed for actors unknown to the role store.
pub const UNKNOWN_ROLE_LEVEL: i32 = 0;

/// Outcome of a policy check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Perform the operation directly
    Allowed,
    /// Queue the operation as a change request for a moderator
    RequiresApproval,
    /// Reject the operation
    Denied,
}

/// Role level thresholds for source operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModerationPolicy {
    /// Minimum level to submit change requests
    pub requester_level: i32,
    /// Minimum level to write sources directly
    pub moderator_level: i32,
    /// Minimum level for URL audits and duplicate scans
    pub admin_level: i32,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            requester_level: 1,
            moderator_level: 2,
            admin_level: 3,
        }
    }
}

impl ModerationPolicy {
    /// Decides how a write by an actor with `role` is handled.
    pub fn decide_write(&self, role: i32) -> Decision {
        if role >= self.moderator_level {
            Decision::Allowed
        } else if role >= self.requester_level {
            Decision::RequiresApproval
        } else {
            Decision::Denied
        }
    }

    /// Decides whether an actor with `role` may run administrative scans.
    pub fn decide_admin(&self, role: i32) -> Decision {
        if role >= self.admin_level {
            Decision::Allowed
        } else {
            Decision::Denied
        }
    }
}
