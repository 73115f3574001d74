//! Authentication and authorization
//!
//! The permission core of the gateway:
//!
//! - [`permissions`] - static role/module/action matrix and pure queries
//! - [`routes`] - path → (module, action) classifier, fail-closed
//! - [`session`] - advisory session derived from the profile cookie
//! - [`facade`] - per-snapshot permission query facade
//! - [`guard`] - route-guard state machine for protected subtrees
//! - [`jwt`] - the secret credential (HttpOnly cookie)
//! - [`cookies`] - the session cookie pair, always written/cleared together
//! - [`middleware`] - axum-side enforcement

pub mod cookies;
pub mod facade;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod routes;
pub mod session;

pub use cookies::{CookieConfig, SessionCookies};
pub use facade::PermissionFacade;
pub use guard::{DenialMode, GuardState, RouteGuard, SessionStatus};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use middleware::{SessionExt, require_auth, require_permission};
pub use permissions::{Action, Module, Role, accessible_modules, has_permission};
pub use routes::{Classification, classify, infer_action};
pub use session::{CookieSessionProvider, Session, SessionProvider};
