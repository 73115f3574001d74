//! Route Guard
//!
//! Gates a protected subtree on the facade's verdict. The guard is a small
//! state machine because session availability is asynchronous: on the first
//! pass the session may be neither confirmed present nor confirmed absent,
//! and nothing protected may render until it settles.
//!
//! Contract with callers: render nothing while `Checking`, render children
//! only in `Granted`, navigate away in `DeniedRedirect`, render a denial view
//! in `DeniedShown`. Children are all-or-nothing; denial is a normal terminal
//! state, never an error.

use super::facade::PermissionFacade;
use super::permissions::{Action, Module};
use super::session::Session;

/// Default route to send denied sessions to
pub const DEFAULT_FALLBACK: &str = "/dashboard";

/// Settlement state of the session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Not yet confirmed either way; the guard stays in `Checking`
    Unknown,
    /// Definitively logged out
    Absent,
    /// Definitively present
    Present(Session),
}

/// What the guard protects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardRequirement {
    /// A concrete path, classified through the route table
    Path(String),
    /// An explicit module/action pair
    ModuleAction(Module, Action),
}

/// How a denial is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialMode {
    /// Navigate to the fallback route
    Redirect,
    /// Render an access-denied view in place
    ShowMessage,
}

/// Guard verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Session not yet settled; render nothing
    Checking,
    /// Render the protected children
    Granted,
    /// Render nothing and navigate to the contained route
    DeniedRedirect(String),
    /// Render an access-denied view in place
    DeniedShown,
}

/// Route-guard state machine
#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirement: GuardRequirement,
    mode: DenialMode,
    fallback: String,
    state: GuardState,
}

impl RouteGuard {
    pub fn new(requirement: GuardRequirement, mode: DenialMode) -> Self {
        Self {
            requirement,
            mode,
            fallback: DEFAULT_FALLBACK.to_string(),
            state: GuardState::Checking,
        }
    }

    /// Guard a path, redirecting on denial
    pub fn for_path(path: impl Into<String>) -> Self {
        Self::new(GuardRequirement::Path(path.into()), DenialMode::Redirect)
    }

    /// Guard a module/action pair, redirecting on denial
    pub fn for_module(module: Module, action: Action) -> Self {
        Self::new(
            GuardRequirement::ModuleAction(module, action),
            DenialMode::Redirect,
        )
    }

    /// Override the redirect target
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Feed a session settlement and evaluate
    ///
    /// `Unknown` keeps (or resets) the guard in `Checking`. A settled status
    /// always re-evaluates from scratch, so a stale verdict can never
    /// survive a logout/login that happens while mounted.
    pub fn on_session(&mut self, status: &SessionStatus) -> &GuardState {
        self.state = match status {
            SessionStatus::Unknown => GuardState::Checking,
            SessionStatus::Absent => self.denied(),
            SessionStatus::Present(session) => {
                let facade = PermissionFacade::new(Some(session.clone()));
                if self.allowed(&facade) {
                    GuardState::Granted
                } else {
                    self.denied()
                }
            }
        };
        &self.state
    }

    /// Change what is protected; resets to `Checking`
    ///
    /// Callers must feed the next session settlement before rendering again.
    pub fn set_requirement(&mut self, requirement: GuardRequirement) {
        self.requirement = requirement;
        self.state = GuardState::Checking;
    }

    fn allowed(&self, facade: &PermissionFacade) -> bool {
        match &self.requirement {
            GuardRequirement::Path(path) => facade.can_access(path),
            GuardRequirement::ModuleAction(module, action) => facade.can(*module, *action),
        }
    }

    fn denied(&self) -> GuardState {
        match self.mode {
            DenialMode::Redirect => GuardState::DeniedRedirect(self.fallback.clone()),
            DenialMode::ShowMessage => GuardState::DeniedShown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::permissions::Role;

    fn session_with(roles: Vec<Role>) -> Session {
        Session {
            id: "u-1".to_string(),
            email: "u@hospital.test".to_string(),
            username: "u".to_string(),
            full_name: "U".to_string(),
            is_active: true,
            roles,
            must_reset_password: false,
        }
    }

    #[test]
    fn test_guard_starts_checking_and_stays_while_unknown() {
        let mut guard = RouteGuard::for_path("/dashboard/users");
        assert_eq!(guard.state(), &GuardState::Checking);
        guard.on_session(&SessionStatus::Unknown);
        assert_eq!(guard.state(), &GuardState::Checking);
    }

    #[test]
    fn test_absent_session_never_grants() {
        let mut guard = RouteGuard::for_path("/dashboard/users");
        guard.on_session(&SessionStatus::Absent);
        assert_eq!(
            guard.state(),
            &GuardState::DeniedRedirect(DEFAULT_FALLBACK.to_string())
        );
    }

    #[test]
    fn test_admin_is_granted_on_users_edit_route() {
        let mut guard = RouteGuard::for_path("/dashboard/users/42/edit");
        guard.on_session(&SessionStatus::Present(session_with(vec![Role::Admin])));
        assert_eq!(guard.state(), &GuardState::Granted);
    }

    #[test]
    fn test_show_message_mode_denies_in_place() {
        let mut guard = RouteGuard::new(
            GuardRequirement::ModuleAction(Module::Users, Action::View),
            DenialMode::ShowMessage,
        );
        guard.on_session(&SessionStatus::Present(session_with(vec![Role::Nurse])));
        assert_eq!(guard.state(), &GuardState::DeniedShown);
    }

    #[test]
    fn test_custom_fallback_route() {
        let mut guard = RouteGuard::for_module(Module::Users, Action::Delete)
            .with_fallback("/dashboard/profile");
        guard.on_session(&SessionStatus::Present(session_with(vec![Role::Pharmacy])));
        assert_eq!(
            guard.state(),
            &GuardState::DeniedRedirect("/dashboard/profile".to_string())
        );
    }

    #[test]
    fn test_session_change_reevaluates_from_checking() {
        let mut guard = RouteGuard::for_module(Module::Products, Action::Edit);
        guard.on_session(&SessionStatus::Present(session_with(vec![Role::Warehouse])));
        assert_eq!(guard.state(), &GuardState::Granted);

        // Logout in another tab: the settled verdict must not survive
        guard.on_session(&SessionStatus::Absent);
        assert!(matches!(guard.state(), GuardState::DeniedRedirect(_)));

        // And back through the unknown window on the next mount
        guard.on_session(&SessionStatus::Unknown);
        assert_eq!(guard.state(), &GuardState::Checking);
    }

    #[test]
    fn test_requirement_change_resets_to_checking() {
        let mut guard = RouteGuard::for_module(Module::Dashboard, Action::View);
        guard.on_session(&SessionStatus::Present(session_with(vec![Role::User])));
        assert_eq!(guard.state(), &GuardState::Granted);

        guard.set_requirement(GuardRequirement::Path("/dashboard/users".to_string()));
        assert_eq!(guard.state(), &GuardState::Checking);

        guard.on_session(&SessionStatus::Present(session_with(vec![Role::User])));
        assert!(matches!(guard.state(), GuardState::DeniedRedirect(_)));
    }
}
