//! Authentication Handlers
//!
//! Login delegates the credential check to the inventory backend, then owns
//! the session locally: it mints the JWT credential and issues the cookie
//! pair. Logout clears both cookies. The pair is always written and cleared
//! together; handlers never touch one cookie alone.

use axum::{Extension, Json, extract::State, response::AppendHeaders};
use http::header::SET_COOKIE;

use shared::client::{BackendLoginResponse, LoginRequest, LoginResponse, SessionInfo};

use crate::AppError;
use crate::auth::{PermissionFacade, Session};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppResponse, ok};

type SetCookiePair = AppendHeaders<[(http::HeaderName, String); 2]>;

/// Login handler
///
/// Proxies the credential check to the backend; on success mints the secret
/// credential and establishes the session cookie pair.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<(SetCookiePair, Json<AppResponse<LoginResponse>>), AppError> {
    let email = req.email.clone();

    let backend_resp: BackendLoginResponse = state
        .backend()
        .post("/auth/login", &req)
        .await
        .map_err(|e| match e {
            // Unified message regardless of which part the backend rejected,
            // to prevent account enumeration
            AppError::Invalid(_) | AppError::NotFound(_) | AppError::Unauthorized => {
                security_log!("WARN", "login_failed", email = email.clone());
                AppError::invalid_credentials()
            }
            other => other,
        })?;

    let session = Session::from_profile(backend_resp.user);

    if !session.is_active {
        security_log!(
            "WARN",
            "login_inactive_account",
            user_id = session.id.clone(),
            email = email.clone()
        );
        return Err(AppError::forbidden("Account has been disabled"));
    }

    let token = state
        .jwt_service()
        .generate_token(&session)
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    let [token_cookie, snapshot_cookie] = state.session_cookies().issue(&token, &session);

    security_log!(
        "INFO",
        "login_success",
        user_id = session.id.clone(),
        username = session.username.clone()
    );
    tracing::info!(user = %session.username, "session established");

    Ok((
        AppendHeaders([(SET_COOKIE, token_cookie), (SET_COOKIE, snapshot_cookie)]),
        ok(LoginResponse {
            user: session.to_profile(),
        }),
    ))
}

/// Logout handler
///
/// Clears both session cookies. Always succeeds, even when the session was
/// already gone.
pub async fn logout(
    State(state): State<ServerState>,
    session: Option<Extension<Session>>,
) -> (SetCookiePair, Json<AppResponse<()>>) {
    if let Some(Extension(session)) = session {
        security_log!(
            "INFO",
            "logout",
            user_id = session.id.clone(),
            username = session.username.clone()
        );
    }

    let [token_cookie, snapshot_cookie] = state.session_cookies().clear();

    (
        AppendHeaders([(SET_COOKIE, token_cookie), (SET_COOKIE, snapshot_cookie)]),
        ok(()),
    )
}

/// Current session info
///
/// Echoes the verified session plus its permission summary, so the dashboard
/// can rebuild its advisory state after a reload.
pub async fn me(Extension(session): Extension<Session>) -> Json<AppResponse<SessionInfo>> {
    let facade = PermissionFacade::new(Some(session.clone()));

    let accessible_modules = facade
        .accessible_modules()
        .into_iter()
        .map(|m| m.as_str().to_string())
        .collect();

    ok(SessionInfo {
        user: session.to_profile(),
        accessible_modules,
        is_admin: facade.is_admin(),
        is_read_only: facade.is_read_only(),
    })
}
