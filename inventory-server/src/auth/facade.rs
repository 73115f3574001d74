//! Permission Query Facade
//!
//! The single integration point callers use to ask "is this allowed". Wraps
//! one session snapshot together with the permission table and the route
//! classifier. Pure given that snapshot, no I/O.
//!
//! Reactivity contract: a facade is built from one snapshot and must be
//! rebuilt whenever the snapshot changes (another tab logging out, a role
//! change). Never cache verdicts across session identity.

use std::collections::BTreeSet;

use super::permissions::{self, Action, Module, Role};
use super::routes::{self, Classification};
use super::session::Session;

/// Permission queries over one session snapshot
#[derive(Debug, Clone)]
pub struct PermissionFacade {
    session: Option<Session>,
}

impl PermissionFacade {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    /// The snapshot this facade answers for
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn roles(&self) -> &[Role] {
        self.session.as_ref().map(|s| s.roles.as_slice()).unwrap_or(&[])
    }

    /// Can the session perform `action` on `module`?
    ///
    /// Always false without a session.
    pub fn can(&self, module: Module, action: Action) -> bool {
        if self.session.is_none() {
            return false;
        }
        permissions::has_permission(self.roles(), module, action)
    }

    /// Can the session reach `path`?
    ///
    /// Classifies the path first; unmapped paths are denied for every
    /// session, admin included.
    pub fn can_access(&self, path: &str) -> bool {
        if self.session.is_none() {
            return false;
        }
        match routes::classify(path) {
            Classification::Matched { module, action } => self.can(module, action),
            Classification::Unmapped => false,
        }
    }

    pub fn can_view(&self, module: Module) -> bool {
        self.can(module, Action::View)
    }

    pub fn can_create(&self, module: Module) -> bool {
        self.can(module, Action::Create)
    }

    pub fn can_edit(&self, module: Module) -> bool {
        self.can(module, Action::Edit)
    }

    pub fn can_delete(&self, module: Module) -> bool {
        self.can(module, Action::Delete)
    }

    /// Modules the session may reach at all
    pub fn accessible_modules(&self) -> BTreeSet<Module> {
        permissions::accessible_modules(self.roles())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles().contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_auditor(&self) -> bool {
        self.has_role(Role::Auditor)
    }

    /// Auditor without admin: the dashboard renders read-only controls
    ///
    /// Deliberately a hardcoded special case, not "only view grants
    /// everywhere". An auditor who also holds admin is not read-only because
    /// admin's broader grants win under union semantics.
    pub fn is_read_only(&self) -> bool {
        self.is_auditor() && !self.is_admin()
    }
}
