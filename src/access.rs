//! Role and plan based access control.
//!
//! Roles and plans are closed enumerations. The data this system inherits
//! used free-form role strings compared ad hoc at call sites, so parsing
//! goes through an explicit alias table instead of scattered string
//! comparisons. Permission checks are a static lookup, not a policy engine:
//! `can(role, permission, plan)` answers from two constant tables.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Closed set of roles an authenticated session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Condominium administrator (building management staff)
    Admin,
    /// Resident of a unit, read access to their own financial data
    Resident,
}

/// Legacy role spellings and the role each maps to.
///
/// `"ADMIN"` and `"STAFF"` were used interchangeably by the previous system;
/// both resolve to [`Role::Admin`] here.
pub const LEGACY_ROLE_ALIASES: &[(&str, Role)] = &[
    ("ADMIN", Role::Admin),
    ("STAFF", Role::Admin),
    ("RESIDENT", Role::Resident),
];

impl Role {
    /// Parses a role string through the legacy alias table.
    ///
    /// # Errors
    /// Returns `Error::Config` for a spelling the alias table does not know.
    pub fn parse(value: &str) -> Result<Self> {
        let normalized = value.trim().to_uppercase();
        LEGACY_ROLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|&(_, role)| role)
            .ok_or_else(|| Error::Config {
                message: format!("unknown role {value:?}"),
            })
    }
}

/// Subscription tier gating access to financial-management features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanTier {
    /// Base tier
    Free,
    /// Paid tier, unlocks expense management and settlement confirmation
    Pro,
}

impl PlanTier {
    /// Parses a plan string (`"FREE"` / `"PRO"`).
    ///
    /// # Errors
    /// Returns `Error::Config` for any other value.
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "FREE" => Ok(Self::Free),
            "PRO" => Ok(Self::Pro),
            other => Err(Error::Config {
                message: format!("unknown plan tier {other:?}"),
            }),
        }
    }

    /// Canonical string form, as stored on the condominium row.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Pro => "PRO",
        }
    }
}

/// Operations guarded by a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Record/delete expenses and confirm settlements
    ManageExpenses,
    /// Create and edit units
    ManageUnits,
    /// Register payments received from units
    RecordPayments,
    /// Read expenses, settlements and account statements
    ViewFinancials,
}

/// Permissions held by administrators (everything).
const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ManageExpenses,
    Permission::ManageUnits,
    Permission::RecordPayments,
    Permission::ViewFinancials,
];

/// Permissions held by residents (read-only financial access).
const RESIDENT_PERMISSIONS: &[Permission] = &[Permission::ViewFinancials];

/// Permissions that additionally require the PRO plan.
const PRO_PERMISSIONS: &[Permission] = &[Permission::ManageExpenses];

/// Checks whether `role` may perform `permission` under `plan`.
///
/// The role table decides what the role holds at all; the plan table then
/// gates the financial-management subset behind PRO.
#[must_use]
pub fn can(role: Role, permission: Permission, plan: PlanTier) -> bool {
    let granted = match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Resident => RESIDENT_PERMISSIONS,
    };
    if !granted.contains(&permission) {
        return false;
    }
    if PRO_PERMISSIONS.contains(&permission) && plan != PlanTier::Pro {
        return false;
    }
    true
}

/// An authenticated session scoped to one condominium.
///
/// Every operation receives one of these explicitly; there is no ambient
/// "current user" anywhere in the crate.
#[derive(Debug, Clone)]
pub struct Session {
    /// Condominium the session is bound to
    pub condominium_id: String,
    /// Role of the authenticated actor
    pub role: Role,
    /// Plan tier of the condominium's subscription
    pub plan: PlanTier,
}

impl Session {
    /// Fails unless the session is bound to `condominium_id`.
    ///
    /// # Errors
    /// Returns `Error::Forbidden` on a tenant mismatch.
    pub fn require_condominium(&self, condominium_id: &str) -> Result<()> {
        if self.condominium_id == condominium_id {
            Ok(())
        } else {
            Err(Error::Forbidden {
                reason: "session is not authorized for this condominium".to_string(),
            })
        }
    }

    /// Fails unless the session's role and plan grant `permission`.
    ///
    /// # Errors
    /// Returns `Error::Forbidden` when the permission is not granted.
    pub fn require_permission(&self, permission: Permission) -> Result<()> {
        if can(self.role, permission, self.plan) {
            Ok(())
        } else {
            Err(Error::Forbidden {
                reason: format!("{permission:?} requires a different role or plan"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_legacy_admin_and_staff_are_the_same_role() {
        let admin = Role::parse("ADMIN").unwrap();
        let staff = Role::parse("STAFF").unwrap();
        assert_eq!(admin, staff);
        assert_eq!(admin, Role::Admin);
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("admin").unwrap(), Role::Admin);
        assert_eq!(Role::parse(" Resident ").unwrap(), Role::Resident);
    }

    #[test]
    fn test_unknown_role_is_a_config_error() {
        let err = Role::parse("SUPERUSER").unwrap_err();
        assert!(matches!(err, Error::Config { message: _ }));
    }

    #[test]
    fn test_plan_parse_round_trips() {
        assert_eq!(PlanTier::parse("PRO").unwrap(), PlanTier::Pro);
        assert_eq!(PlanTier::parse("free").unwrap(), PlanTier::Free);
        assert_eq!(PlanTier::Pro.as_str(), "PRO");
        assert!(PlanTier::parse("ENTERPRISE").is_err());
    }

    #[test]
    fn test_manage_expenses_requires_pro_plan() {
        assert!(can(Role::Admin, Permission::ManageExpenses, PlanTier::Pro));
        assert!(!can(Role::Admin, Permission::ManageExpenses, PlanTier::Free));
    }

    #[test]
    fn test_non_financial_permissions_work_on_free_plan() {
        assert!(can(Role::Admin, Permission::ManageUnits, PlanTier::Free));
        assert!(can(Role::Admin, Permission::RecordPayments, PlanTier::Free));
        assert!(can(Role::Admin, Permission::ViewFinancials, PlanTier::Free));
    }

    #[test]
    fn test_residents_only_view() {
        assert!(can(Role::Resident, Permission::ViewFinancials, PlanTier::Pro));
        assert!(!can(Role::Resident, Permission::ManageExpenses, PlanTier::Pro));
        assert!(!can(Role::Resident, Permission::ManageUnits, PlanTier::Pro));
        assert!(!can(Role::Resident, Permission::RecordPayments, PlanTier::Pro));
    }

    #[test]
    fn test_session_tenant_check() {
        let session = Session {
            condominium_id: "condo-1".to_string(),
            role: Role::Admin,
            plan: PlanTier::Pro,
        };
        assert!(session.require_condominium("condo-1").is_ok());
        let err = session.require_condominium("condo-2").unwrap_err();
        assert!(matches!(err, Error::Forbidden { reason: _ }));
    }

    #[test]
    fn test_session_permission_check() {
        let session = Session {
            condominium_id: "condo-1".to_string(),
            role: Role::Resident,
            plan: PlanTier::Pro,
        };
        assert!(session.require_permission(Permission::ViewFinancials).is_ok());
        assert!(
            session
                .require_permission(Permission::ManageExpenses)
                .is_err()
        );
    }
}
