//! Inventory backend client
//!
//! Thin reqwest wrapper around the backend REST API. The gateway
//! authenticates to the backend with a service credential (configured via
//! `BACKEND_API_TOKEN`) sent as a bearer token on every request; user-level
//! authorization already happened in the gateway's own middleware before a
//! proxy call is made.
//!
//! Every helper decodes the backend's JSON body on success and translates
//! failures into [`AppError`]: 404 becomes `NotFound`, other 4xx become
//! `Invalid` with the backend's message when one is present, 5xx and
//! transport faults become `Upstream`.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::utils::{AppError, AppResult};

/// Error body shape the backend uses for failures
#[derive(Debug, serde::Deserialize)]
struct BackendError {
    message: Option<String>,
}

/// HTTP client for the inventory backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(|t| t.to_string()),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder with the service credential attached
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let resp = self.request(Method::GET, path).send().await?;
        Self::decode(resp).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let resp = self.request(Method::GET, path).query(query).send().await?;
        Self::decode(resp).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let resp = self.request(Method::POST, path).json(body).send().await?;
        Self::decode(resp).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let resp = self.request(Method::PUT, path).json(body).send().await?;
        Self::decode(resp).await
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        let resp = self.request(Method::DELETE, path).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status, resp).await)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> AppResult<T> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .map_err(|e| AppError::upstream(format!("Malformed backend response: {}", e)));
        }
        Err(Self::error_from(status, resp).await)
    }

    async fn error_from(status: StatusCode, resp: reqwest::Response) -> AppError {
        let message = resp
            .json::<BackendError>()
            .await
            .ok()
            .and_then(|e| e.message);

        match status {
            StatusCode::NOT_FOUND => {
                AppError::not_found(message.unwrap_or_else(|| "Resource not found".to_string()))
            }
            StatusCode::CONFLICT => AppError::Conflict(
                message.unwrap_or_else(|| "Resource already exists".to_string()),
            ),
            s if s.is_client_error() => {
                AppError::Invalid(message.unwrap_or_else(|| "Request rejected".to_string()))
            }
            s => AppError::upstream(format!(
                "Backend returned {}: {}",
                s,
                message.unwrap_or_default()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_credential_is_attached_to_requests() {
        let client = BackendClient::new("http://backend.test", Some("svc-token"));
        let request = client
            .request(Method::GET, "/products")
            .build()
            .expect("buildable request");

        let auth = request
            .headers()
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(auth, Some("Bearer svc-token"));
        assert_eq!(request.url().as_str(), "http://backend.test/products");
    }

    #[test]
    fn test_requests_without_credential_carry_no_auth_header() {
        let client = BackendClient::new("http://backend.test/", None);
        let request = client
            .request(Method::DELETE, "/products/p-1")
            .build()
            .expect("buildable request");

        assert!(request.headers().get(http::header::AUTHORIZATION).is_none());
        assert_eq!(request.url().as_str(), "http://backend.test/products/p-1");
    }
}
