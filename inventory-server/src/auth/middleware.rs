//! Authentication middleware
//!
//! Server-side enforcement of the session and permission model. The
//! client-readable snapshot is never trusted here: every protected request
//! re-validates the JWT in the HttpOnly cookie.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::cookies::{self, TOKEN_COOKIE};
use crate::auth::permissions::{Action, Module, has_permission};
use crate::auth::session::Session;
use crate::core::ServerState;
use crate::security_log;

/// Authentication middleware - requires a valid session credential
///
/// Extracts the JWT from the `hospital_token` cookie and validates it. On
/// success the verified [`Session`] is injected into request extensions.
///
/// # Paths that skip authentication
///
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths
/// - `/api/auth/login`
/// - `/api/health`
///
/// `/api/auth/logout` is validated best-effort: a missing or expired
/// credential still reaches the handler so the browser can clear its cookie
/// pair, but a valid one is attached for the audit log.
///
/// # Errors
///
/// | Failure | Status |
/// |---------|--------|
/// | missing cookie | 401 Unauthorized |
/// | expired token | 401 TokenExpired |
/// | invalid token | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes pass through (they 404 on their own)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_public_api_route = path == "/api/auth/login" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let best_effort = path == "/api/auth/logout";

    let token = req
        .headers()
        .get(http::header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|header| cookies::extract_cookie(header, TOKEN_COOKIE));

    let token = match token {
        Some(t) => t,
        None => {
            if best_effort {
                return Ok(next.run(req).await);
            }
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service().validate_token(token) {
        Ok(session) => {
            if !session.is_active && !best_effort {
                security_log!(
                    "WARN",
                    "auth_inactive_account",
                    user_id = session.id.clone(),
                    username = session.username.clone()
                );
                return Err(AppError::Forbidden("Account has been disabled".to_string()));
            }
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Err(e) => {
            if best_effort {
                return Ok(next.run(req).await);
            }
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            }
        }
    }
}

/// Permission middleware - requires a grant on (module, action)
///
/// Consults the static permission table with the verified session's roles.
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/products", get(handler::list))
///     .layer(middleware::from_fn(require_permission(Module::Products, Action::View)));
/// ```
///
/// # Errors
///
/// 403 Forbidden when the session lacks the grant.
pub fn require_permission(
    module: Module,
    action: Action,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let session = req
                .extensions()
                .get::<Session>()
                .ok_or(AppError::Unauthorized)?;

            if !has_permission(&session.roles, module, action) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = session.id.clone(),
                    username = session.username.clone(),
                    module = module.as_str(),
                    action = format!("{:?}", action)
                );
                return Err(AppError::Forbidden(format!(
                    "Permission denied: {}",
                    module.as_str()
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// Extension accessor for the verified session
///
/// # Example
///
/// ```ignore
/// async fn handler(req: Request) -> Result<Json<()>, AppError> {
///     let session = req.session()?;
///     tracing::info!(user = %session.username, "handling");
///     Ok(Json(()))
/// }
/// ```
pub trait SessionExt {
    /// Verified session from request extensions
    ///
    /// # Errors
    ///
    /// 401 Unauthorized when the request never passed `require_auth`.
    fn session(&self) -> Result<&Session, AppError>;
}

impl SessionExt for Request {
    fn session(&self) -> Result<&Session, AppError> {
        self.extensions().get::<Session>().ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::middleware as axum_middleware;
    use axum::routing::get;
    use http::{Method, Request as HttpRequest, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::jwt::{JwtConfig, JwtService};
    use crate::auth::permissions::Role;
    use crate::auth::CookieConfig;
    use crate::core::Config;

    const TEST_SECRET: &str = "middleware-test-secret-0123456789abcdef";

    fn test_config() -> Config {
        Config {
            http_port: 0,
            backend_api_url: "http://localhost:9".to_string(),
            backend_api_token: None,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_dir: None,
            jwt: JwtConfig {
                secret: TEST_SECRET.to_string(),
                expiration_minutes: 60,
                issuer: "inventory-server".to_string(),
                audience: "inventory-dashboard".to_string(),
            },
            cookies: CookieConfig::default(),
        }
    }

    fn session_with_roles(roles: Vec<Role>) -> Session {
        Session {
            id: "u-1".to_string(),
            email: "ana@hospital.test".to_string(),
            username: "ana".to_string(),
            full_name: "Ana Torres".to_string(),
            is_active: true,
            roles,
            must_reset_password: false,
        }
    }

    fn test_app(state: &ServerState) -> Router {
        let users = Router::new()
            .route("/api/users-list", get(|| async { "users" }))
            .layer(axum_middleware::from_fn(require_permission(
                Module::Users,
                Action::View,
            )));

        Router::new()
            .route("/api/ping", get(|| async { "pong" }))
            .merge(users)
            .merge(crate::api::auth::router())
            .layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state.clone())
    }

    fn request(method: Method, path: &str, cookie: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn envelope_code(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["code"].as_str().unwrap().to_string()
    }

    fn token_cookie(token: &str) -> String {
        format!("{}={}", TOKEN_COOKIE, token)
    }

    #[tokio::test]
    async fn test_missing_cookie_is_unauthorized() {
        let state = ServerState::initialize(&test_config());
        let resp = test_app(&state)
            .oneshot(request(Method::GET, "/api/ping", None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(envelope_code(resp).await, "E3001");
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected_as_expired() {
        let state = ServerState::initialize(&test_config());
        let expired_issuer = JwtService::with_config(JwtConfig {
            expiration_minutes: -5,
            ..test_config().jwt
        });
        let token = expired_issuer
            .generate_token(&session_with_roles(vec![Role::Admin]))
            .unwrap();

        let resp = test_app(&state)
            .oneshot(request(Method::GET, "/api/ping", Some(&token_cookie(&token))))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(envelope_code(resp).await, "E3003");
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected_as_invalid() {
        let state = ServerState::initialize(&test_config());
        let token = state
            .jwt_service()
            .generate_token(&session_with_roles(vec![Role::Admin]))
            .unwrap();
        let tampered = format!("{}x", token);

        let resp = test_app(&state)
            .oneshot(request(
                Method::GET,
                "/api/ping",
                Some(&token_cookie(&tampered)),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(envelope_code(resp).await, "E3002");
    }

    #[tokio::test]
    async fn test_valid_session_without_grant_is_forbidden() {
        let state = ServerState::initialize(&test_config());
        let token = state
            .jwt_service()
            .generate_token(&session_with_roles(vec![Role::Nurse]))
            .unwrap();

        let resp = test_app(&state)
            .oneshot(request(
                Method::GET,
                "/api/users-list",
                Some(&token_cookie(&token)),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(envelope_code(resp).await, "E2001");
    }

    #[tokio::test]
    async fn test_granted_session_passes_both_layers() {
        let state = ServerState::initialize(&test_config());
        let token = state
            .jwt_service()
            .generate_token(&session_with_roles(vec![Role::Admin]))
            .unwrap();

        let resp = test_app(&state)
            .oneshot(request(
                Method::GET,
                "/api/users-list",
                Some(&token_cookie(&token)),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logout_clears_cookies_without_a_credential() {
        let state = ServerState::initialize(&test_config());
        let resp = test_app(&state)
            .oneshot(request(Method::POST, "/api/auth/logout", None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let cleared: Vec<String> = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn test_logout_still_works_after_the_token_expires() {
        let state = ServerState::initialize(&test_config());
        let expired_issuer = JwtService::with_config(JwtConfig {
            expiration_minutes: -5,
            ..test_config().jwt
        });
        let token = expired_issuer
            .generate_token(&session_with_roles(vec![Role::Pharmacy]))
            .unwrap();

        let resp = test_app(&state)
            .oneshot(request(
                Method::POST,
                "/api/auth/logout",
                Some(&token_cookie(&token)),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
