//! Permission Definitions
//!
//! Static role-based access matrix for the inventory dashboard.
//!
//! Design rules:
//! - The table is build-time configuration, loaded once, never mutated.
//! - An absent (role, module) entry means zero access for that role.
//! - Actions are explicit per module; `delete` never implies `edit`.
//! - A session holding several roles gets the union of their grants.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// User role
///
/// Closed set. Raw strings are validated into this enum once, at the session
/// boundary; the rest of the system never re-normalizes casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Pharmacy,
    Warehouse,
    Doctor,
    Nurse,
    Auditor,
    User,
}

impl Role {
    /// Parse a raw role string, case-insensitively
    ///
    /// Accepts the legacy Spanish aliases still emitted by older backend
    /// versions (`FARMACIA`, `BODEGA`). Unknown strings parse to `None` and
    /// contribute no permission anywhere.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "pharmacy" | "farmacia" => Some(Role::Pharmacy),
            "warehouse" | "bodega" => Some(Role::Warehouse),
            "doctor" => Some(Role::Doctor),
            "nurse" => Some(Role::Nurse),
            "auditor" => Some(Role::Auditor),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Pharmacy => "pharmacy",
            Role::Warehouse => "warehouse",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Auditor => "auditor",
            Role::User => "user",
        }
    }
}

/// Functional area permissions are scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Dashboard,
    Profile,
    Products,
    Categories,
    Providers,
    Pharmacy,
    Users,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Profile => "profile",
            Module::Products => "products",
            Module::Categories => "categories",
            Module::Providers => "providers",
            Module::Pharmacy => "pharmacy",
            Module::Users => "users",
        }
    }
}

/// Granularity at which permissions are granted within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

/// All four actions, for roles with full module access
const ALL_ACTIONS: &[Action] = &[Action::View, Action::Create, Action::Edit, Action::Delete];
const VIEW_ONLY: &[Action] = &[Action::View];
const VIEW_EDIT: &[Action] = &[Action::View, Action::Edit];

/// One role's grants: module plus its explicit action set
type Grant = (Module, &'static [Action]);

/// Admin: every module, every action
const ADMIN_GRANTS: &[Grant] = &[
    (Module::Dashboard, ALL_ACTIONS),
    (Module::Profile, ALL_ACTIONS),
    (Module::Products, ALL_ACTIONS),
    (Module::Categories, ALL_ACTIONS),
    (Module::Providers, ALL_ACTIONS),
    (Module::Pharmacy, ALL_ACTIONS),
    (Module::Users, ALL_ACTIONS),
];

/// Pharmacy staff: run dispensations, read the catalog
const PHARMACY_GRANTS: &[Grant] = &[
    (Module::Dashboard, VIEW_ONLY),
    (Module::Profile, VIEW_EDIT),
    (Module::Products, VIEW_ONLY),
    (Module::Categories, VIEW_ONLY),
    (Module::Providers, VIEW_ONLY),
    (
        Module::Pharmacy,
        &[Action::View, Action::Create, Action::Edit],
    ),
];

/// Warehouse staff: manage the catalog, no user administration
const WAREHOUSE_GRANTS: &[Grant] = &[
    (Module::Dashboard, VIEW_ONLY),
    (Module::Profile, VIEW_EDIT),
    (Module::Products, ALL_ACTIONS),
    (
        Module::Categories,
        &[Action::View, Action::Create, Action::Edit],
    ),
    (
        Module::Providers,
        &[Action::View, Action::Create, Action::Edit],
    ),
    (Module::Pharmacy, VIEW_ONLY),
];

/// Doctors: consult stock and open dispensation requests
const DOCTOR_GRANTS: &[Grant] = &[
    (Module::Dashboard, VIEW_ONLY),
    (Module::Profile, VIEW_EDIT),
    (Module::Products, VIEW_ONLY),
    (Module::Pharmacy, &[Action::View, Action::Create]),
];

/// Nurses: consult only
const NURSE_GRANTS: &[Grant] = &[
    (Module::Dashboard, VIEW_ONLY),
    (Module::Profile, VIEW_EDIT),
    (Module::Products, VIEW_ONLY),
    (Module::Pharmacy, VIEW_ONLY),
];

/// Auditors: read everything, change nothing
const AUDITOR_GRANTS: &[Grant] = &[
    (Module::Dashboard, VIEW_ONLY),
    (Module::Profile, VIEW_ONLY),
    (Module::Products, VIEW_ONLY),
    (Module::Categories, VIEW_ONLY),
    (Module::Providers, VIEW_ONLY),
    (Module::Pharmacy, VIEW_ONLY),
    (Module::Users, VIEW_ONLY),
];

/// Plain users: their own dashboard and profile
const USER_GRANTS: &[Grant] = &[
    (Module::Dashboard, VIEW_ONLY),
    (Module::Profile, VIEW_EDIT),
];

/// Grants for a single role
fn grants_for(role: Role) -> &'static [Grant] {
    match role {
        Role::Admin => ADMIN_GRANTS,
        Role::Pharmacy => PHARMACY_GRANTS,
        Role::Warehouse => WAREHOUSE_GRANTS,
        Role::Doctor => DOCTOR_GRANTS,
        Role::Nurse => NURSE_GRANTS,
        Role::Auditor => AUDITOR_GRANTS,
        Role::User => USER_GRANTS,
    }
}

/// Check whether any of the held roles grants `action` on `module`
///
/// Union semantics: a user with several roles gets the most permissive
/// combination. An empty role slice grants nothing. Pure lookup, no I/O.
pub fn has_permission(roles: &[Role], module: Module, action: Action) -> bool {
    roles.iter().any(|role| {
        grants_for(*role)
            .iter()
            .any(|(m, actions)| *m == module && actions.contains(&action))
    })
}

/// Union of modules the held roles may reach
///
/// A module counts as accessible with any grant at all, even view-only.
pub fn accessible_modules(roles: &[Role]) -> BTreeSet<Module> {
    roles
        .iter()
        .flat_map(|role| grants_for(*role).iter().map(|(m, _)| *m))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("FARMACIA"), Some(Role::Pharmacy));
        assert_eq!(Role::parse("bodega"), Some(Role::Warehouse));
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_empty_roles_grant_nothing() {
        assert!(!has_permission(&[], Module::Dashboard, Action::View));
        assert!(accessible_modules(&[]).is_empty());
    }

    #[test]
    fn test_union_semantics_across_roles() {
        let nurse = [Role::Nurse];
        let warehouse = [Role::Warehouse];
        let both = [Role::Nurse, Role::Warehouse];

        for module in [
            Module::Dashboard,
            Module::Profile,
            Module::Products,
            Module::Categories,
            Module::Providers,
            Module::Pharmacy,
            Module::Users,
        ] {
            for action in [Action::View, Action::Create, Action::Edit, Action::Delete] {
                let expected = has_permission(&nurse, module, action)
                    || has_permission(&warehouse, module, action);
                assert_eq!(
                    has_permission(&both, module, action),
                    expected,
                    "union mismatch for {:?}/{:?}",
                    module,
                    action
                );
            }
        }
    }

    #[test]
    fn test_pharmacy_role_grants() {
        let roles = [Role::Pharmacy];
        assert!(!has_permission(&roles, Module::Products, Action::Create));
        assert!(has_permission(&roles, Module::Products, Action::View));
        assert!(has_permission(&roles, Module::Pharmacy, Action::Edit));
        assert!(!has_permission(&roles, Module::Users, Action::View));
    }

    #[test]
    fn test_auditor_is_view_only_everywhere() {
        let roles = [Role::Auditor];
        let modules = accessible_modules(&roles);
        assert_eq!(modules.len(), 7);
        for module in modules {
            assert!(has_permission(&roles, module, Action::View));
            assert!(!has_permission(&roles, module, Action::Create));
            assert!(!has_permission(&roles, module, Action::Edit));
            assert!(!has_permission(&roles, module, Action::Delete));
        }
    }

    #[test]
    fn test_has_permission_is_idempotent() {
        let roles = [Role::Doctor];
        let first = has_permission(&roles, Module::Pharmacy, Action::Create);
        let second = has_permission(&roles, Module::Pharmacy, Action::Create);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_duplicate_roles_are_harmless() {
        let dup = [Role::Nurse, Role::Nurse];
        assert_eq!(
            has_permission(&dup, Module::Products, Action::View),
            has_permission(&[Role::Nurse], Module::Products, Action::View)
        );
    }

    #[test]
    fn test_accessible_modules_counts_view_only_access() {
        let modules = accessible_modules(&[Role::User]);
        assert!(modules.contains(&Module::Dashboard));
        assert!(modules.contains(&Module::Profile));
        assert!(!modules.contains(&Module::Products));
    }
}
