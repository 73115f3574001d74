//! Session cookie pair
//!
//! Two cookies carry a session:
//!
//! - `hospital_token` — HttpOnly, holds the JWT credential. Browsers send it
//!   back on every request; scripts can never read it.
//! - `hospital_session` — client-readable, holds the base64url profile
//!   snapshot the dashboard derives its advisory session from. It never
//!   contains the credential.
//!
//! The pair is written and cleared only through [`SessionCookies::issue`] and
//! [`SessionCookies::clear`], each returning both Set-Cookie values. There is
//! deliberately no way to set or drop one cookie alone: a half-written pair
//! would leave the client looking authenticated while the server rejects it,
//! or the reverse.

use chrono::Utc;

use super::session::{self, Session};

/// Name of the HttpOnly credential cookie
pub const TOKEN_COOKIE: &str = "hospital_token";
/// Name of the client-readable profile cookie
pub const SESSION_COOKIE: &str = "hospital_session";

/// Cookie attribute configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Secure flag (HTTPS only); disable only for local development
    pub secure: bool,
    /// Cookie path
    pub path: String,
    /// Max-Age in seconds for both cookies
    pub max_age_seconds: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            path: "/".to_string(),
            max_age_seconds: 8 * 3600,
        }
    }
}

/// Builder for the session cookie pair
#[derive(Debug, Clone)]
pub struct SessionCookies {
    config: CookieConfig,
}

impl SessionCookies {
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    /// Set-Cookie values establishing a session: `[token, snapshot]`
    ///
    /// Both must be attached to the same response.
    pub fn issue(&self, token: &str, session: &Session) -> [String; 2] {
        let snapshot = session::encode_snapshot(session);
        [
            self.build(TOKEN_COOKIE, token, self.config.max_age_seconds, true),
            self.build(SESSION_COOKIE, &snapshot, self.config.max_age_seconds, false),
        ]
    }

    /// Set-Cookie values destroying a session: `[token, snapshot]`
    pub fn clear(&self) -> [String; 2] {
        [
            self.build(TOKEN_COOKIE, "", 0, true),
            self.build(SESSION_COOKIE, "", 0, false),
        ]
    }

    fn build(&self, name: &str, value: &str, max_age: i64, http_only: bool) -> String {
        let mut parts = vec![format!("{}={}", name, value)];

        parts.push(format!("Path={}", self.config.path));
        parts.push(format!("Max-Age={}", max_age));

        if max_age == 0 {
            // Expired date makes deletion stick on agents ignoring Max-Age
            parts.push("Expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string());
        } else {
            let expires = Utc::now() + chrono::Duration::seconds(max_age);
            parts.push(format!(
                "Expires={}",
                expires.format("%a, %d %b %Y %H:%M:%S GMT")
            ));
        }

        if self.config.secure {
            parts.push("Secure".to_string());
        }
        if http_only {
            parts.push("HttpOnly".to_string());
        }
        parts.push("SameSite=Lax".to_string());

        parts.join("; ")
    }
}

impl Default for SessionCookies {
    fn default() -> Self {
        Self::new(CookieConfig::default())
    }
}

/// Extract one cookie's value from a Cookie header
pub fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|cookie| {
        let cookie = cookie.trim();
        let (n, v) = cookie.split_once('=')?;
        (n == name).then_some(v)
    })
}
