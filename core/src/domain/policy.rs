// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Authorization policy for adoption and catalog operations.
//!
//! Stateless decision functions over the closed [`Role`] enum. Each returns
//! a structured [`Decision`] so callers can gate an operation *before* any
//! mutation and surface the denial reason unchanged. `list own requests`
//! has no function here: it is scoped by construction (the store is only
//! ever queried by the caller's own id).

use crate::domain::error::CoreError;
use crate::domain::identity::Identity;
use crate::domain::user::{Role, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(&'static str),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Convert a denial into the `Forbidden` error kind.
    pub fn require(self) -> Result<(), CoreError> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(reason) => Err(CoreError::Forbidden(reason.to_string())),
        }
    }
}

/// Any authenticated identity may apply for any available pet; there is no
/// ownership check on application.
pub fn can_apply(_identity: &Identity) -> Decision {
    Decision::Allow
}

/// Listing a shelter's incoming requests requires the shelter or admin role.
pub fn can_list_for_shelter(identity: &Identity) -> Decision {
    match identity.role {
        Role::Shelter | Role::Admin => Decision::Allow,
        Role::User => Decision::Deny("shelter or admin role required"),
    }
}

/// Resolving a request is permitted for admins and for the owner of the
/// shelter the pet belongs to.
pub fn can_resolve(identity: &Identity, shelter_owner: UserId) -> Decision {
    if identity.is_admin() || identity.user_id == shelter_owner {
        Decision::Allow
    } else {
        Decision::Deny("only the owning shelter or an admin may update this request")
    }
}

/// Pet and shelter mutations (create/update/delete) are admin-only.
pub fn can_manage_catalog(identity: &Identity) -> Decision {
    if identity.is_admin() {
        Decision::Allow
    } else {
        Decision::Deny("admin role required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity::new(UserId::new(), role)
    }

    #[test]
    fn anyone_may_apply() {
        for role in [Role::User, Role::Shelter, Role::Admin] {
            assert!(can_apply(&identity(role)).is_allowed());
        }
    }

    #[test]
    fn shelter_listing_requires_shelter_or_admin() {
        assert!(!can_list_for_shelter(&identity(Role::User)).is_allowed());
        assert!(can_list_for_shelter(&identity(Role::Shelter)).is_allowed());
        assert!(can_list_for_shelter(&identity(Role::Admin)).is_allowed());
    }

    #[test]
    fn resolve_requires_owner_or_admin() {
        let owner = UserId::new();
        let owning = Identity::new(owner, Role::Shelter);
        assert!(can_resolve(&owning, owner).is_allowed());

        let admin = identity(Role::Admin);
        assert!(can_resolve(&admin, owner).is_allowed());

        let stranger = identity(Role::Shelter);
        let decision = can_resolve(&stranger, owner);
        assert!(!decision.is_allowed());
        assert!(matches!(
            decision.require(),
            Err(CoreError::Forbidden(_))
        ));
    }

    #[test]
    fn catalog_mutations_are_admin_only() {
        assert!(!can_manage_catalog(&identity(Role::User)).is_allowed());
        assert!(!can_manage_catalog(&identity(Role::Shelter)).is_allowed());
        assert!(can_manage_catalog(&identity(Role::Admin)).is_allowed());
    }
}
