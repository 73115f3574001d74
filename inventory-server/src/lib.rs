//! Hospital Inventory Gateway
//!
//! # Architecture overview
//!
//! The gateway fronts the inventory backend REST API for the hospital
//! dashboard. It owns the session-cookie flow and the role-based permission
//! model; the backend owns persistence and the real business rules.
//!
//! - **Auth** (`auth`): permission matrix, route classifier, session
//!   derivation, route guard, JWT credential, cookie pair, middleware
//! - **HTTP API** (`api`): auth endpoints plus guarded proxies for the
//!   inventory resources
//! - **Backend client** (`client`): reqwest proxy to the inventory backend
//!
//! # Module structure
//!
//! ```text
//! inventory-server/src/
//! ├── core/          # configuration, state, server
//! ├── auth/          # permissions, sessions, guard, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── client/        # inventory backend client
//! ├── routes/        # router assembly and middleware stack
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod core;
pub mod routes;
pub mod utils;

// Re-export common types
pub use auth::{
    Action, Classification, GuardState, JwtService, Module, PermissionFacade, Role, RouteGuard,
    Session, SessionProvider, SessionStatus,
};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - tracing with a fixed target so auth events can be
// filtered and shipped separately
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____                      __
   /  _/___ _   _____  ____  / /_____  _______  __
   / // __ \ | / / _ \/ __ \/ __/ __ \/ ___/ / / /
 _/ // / / / |/ /  __/ / / / /_/ /_/ / /  / /_/ /
/___/_/ /_/|___/\___/_/ /_/\__/\____/_/   \__, /
                                         /____/
    "#
    );
}
