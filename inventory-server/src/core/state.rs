//! Shared server state

use std::sync::Arc;

use crate::api::pharmacy::CartStore;
use crate::auth::{JwtService, SessionCookies};
use crate::client::BackendClient;
use crate::core::Config;

/// Shared application state
///
/// Cheap to clone; all services live behind one `Arc`.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<Inner>,
}

struct Inner {
    config: Config,
    jwt: JwtService,
    cookies: SessionCookies,
    backend: BackendClient,
    carts: CartStore,
}

impl ServerState {
    /// Build the state from configuration
    pub fn initialize(config: &Config) -> Self {
        let jwt = JwtService::with_config(config.jwt.clone());
        let cookies = SessionCookies::new(config.cookies.clone());
        let backend = BackendClient::new(
            &config.backend_api_url,
            config.backend_api_token.as_deref(),
        );
        if config.backend_api_token.is_none() && config.is_production() {
            tracing::warn!("BACKEND_API_TOKEN not set, backend calls go out unauthenticated");
        }

        Self {
            inner: Arc::new(Inner {
                config: config.clone(),
                jwt,
                cookies,
                backend,
                carts: CartStore::new(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.inner.jwt
    }

    pub fn session_cookies(&self) -> &SessionCookies {
        &self.inner.cookies
    }

    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
