//! Access decisions: role gate and ownership gate.
//!
//! Pure functions over caller-supplied facts. The engine never fetches data;
//! handlers load the resource and pass its owner id in.

use serde::Serialize;

use crate::models::user::{Identity, Role};

/// Why a decision denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// No identity was presented.
    Unauthenticated,
    /// Authenticated, but the role does not satisfy the gate.
    InsufficientRole,
    /// Authenticated, but not the resource owner.
    NotOwner,
}

/// Outcome of an authorization check. Deny-by-default: every path that is
/// not explicitly allowed carries a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Allow iff the identity holds `required`, or `Admin`. Admin overrides
/// every role-gated operation; there is no other escalated role.
pub fn require_role(identity: Option<&Identity>, required: Role) -> AccessDecision {
    match identity {
        None => AccessDecision::Deny(DenyReason::Unauthenticated),
        Some(id) if id.role == required || id.role == Role::Admin => AccessDecision::Allow,
        Some(_) => AccessDecision::Deny(DenyReason::InsufficientRole),
    }
}

/// Allow iff the identity is the resource owner, or `Admin`. Ownership is
/// exact id equality; there is no transitive or delegated ownership.
pub fn require_owner_or_admin(identity: Option<&Identity>, owner_id: i64) -> AccessDecision {
    match identity {
        None => AccessDecision::Deny(DenyReason::Unauthenticated),
        Some(id) if id.id == owner_id || id.role == Role::Admin => AccessDecision::Allow,
        Some(_) => AccessDecision::Deny(DenyReason::NotOwner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn who(id: i64, role: Role) -> Identity {
        Identity {
            id,
            username: format!("user-{id}"),
            role,
        }
    }

    #[test]
    fn role_gate_matrix() {
        // Exhaustive over the finite role set.
        let admin = who(1, Role::Admin);
        let user = who(2, Role::User);

        assert!(require_role(Some(&admin), Role::Admin).is_allowed());
        assert!(require_role(Some(&admin), Role::User).is_allowed());
        assert!(require_role(Some(&user), Role::User).is_allowed());
        assert_eq!(
            require_role(Some(&user), Role::Admin),
            AccessDecision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn role_gate_denies_anonymous() {
        assert_eq!(
            require_role(None, Role::User),
            AccessDecision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn ownership_gate_matrix() {
        let owner = who(5, Role::User);
        let stranger = who(6, Role::User);
        let admin = who(7, Role::Admin);

        assert!(require_owner_or_admin(Some(&owner), 5).is_allowed());
        assert_eq!(
            require_owner_or_admin(Some(&stranger), 5),
            AccessDecision::Deny(DenyReason::NotOwner)
        );
        // Admin may act on any resource regardless of owner.
        assert!(require_owner_or_admin(Some(&admin), 5).is_allowed());
        assert!(require_owner_or_admin(Some(&admin), 9999).is_allowed());
    }

    #[test]
    fn ownership_gate_denies_anonymous() {
        assert_eq!(
            require_owner_or_admin(None, 5),
            AccessDecision::Deny(DenyReason::Unauthenticated)
        );
    }
}
