//! Session Derivation
//!
//! Rebuilds a typed [`Session`] from the client-readable profile cookie.
//! The snapshot is advisory: it decides what UI to offer, never whether a
//! request is authorized. Real authorization re-validates the secret
//! credential in the HttpOnly cookie (see [`super::middleware`]).
//!
//! Any failure to read or parse the snapshot derives to "no session". A
//! corrupted cookie must look exactly like being logged out, never like an
//! error and never like being authenticated.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use shared::client::UserProfile;

use super::permissions::Role;

/// Advisory view of the current user, derived from the profile cookie
///
/// Raw role strings are validated into [`Role`] here, at the boundary.
/// Unknown strings are dropped; a session can therefore exist with an empty
/// role list, which simply grants nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub roles: Vec<Role>,
    pub must_reset_password: bool,
}

impl Session {
    /// Build a session from a backend profile, validating roles
    pub fn from_profile(profile: UserProfile) -> Self {
        let roles = profile
            .roles
            .iter()
            .filter_map(|raw| {
                let role = Role::parse(raw);
                if role.is_none() {
                    tracing::debug!(role = %raw, "dropping unknown role from session");
                }
                role
            })
            .collect();

        Self {
            id: profile.id,
            email: profile.email,
            username: profile.username,
            full_name: profile.full_name,
            is_active: profile.is_active,
            roles,
            must_reset_password: profile.must_reset_password.unwrap_or(false),
        }
    }

    /// Case-insensitive role membership
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Profile snapshot in the wire shape (roles as canonical strings)
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            is_active: self.is_active,
            roles: self.roles.iter().map(|r| r.as_str().to_string()).collect(),
            must_reset_password: self.must_reset_password.then_some(true),
        }
    }
}

/// Source of the current session snapshot
///
/// Injectable so callers (and tests) can supply isolated sessions instead of
/// reading shared global state.
pub trait SessionProvider {
    /// Current session, or `None` when logged out or unreadable
    fn session(&self) -> Option<Session>;
}

/// Derives the session from a request's Cookie header
pub struct CookieSessionProvider<'a> {
    cookie_header: Option<&'a str>,
    cookie_name: &'a str,
}

impl<'a> CookieSessionProvider<'a> {
    pub fn new(cookie_header: Option<&'a str>, cookie_name: &'a str) -> Self {
        Self {
            cookie_header,
            cookie_name,
        }
    }
}

impl SessionProvider for CookieSessionProvider<'_> {
    fn session(&self) -> Option<Session> {
        let header = self.cookie_header?;
        let value = super::cookies::extract_cookie(header, self.cookie_name)?;
        decode_snapshot(value)
    }
}

/// Fixed session for tests and tooling
pub struct StaticSessionProvider(pub Option<Session>);

impl SessionProvider for StaticSessionProvider {
    fn session(&self) -> Option<Session> {
        self.0.clone()
    }
}

/// Decode a profile-cookie value (base64url JSON) into a session
///
/// Returns `None` on any decode or shape failure.
pub fn decode_snapshot(value: &str) -> Option<Session> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    let profile: UserProfile = serde_json::from_slice(&bytes).ok()?;
    Some(Session::from_profile(profile))
}

/// Encode a session into the profile-cookie value
pub fn encode_snapshot(session: &Session) -> String {
    // UserProfile serialization cannot fail: all fields are plain data
    let json = serde_json::to_vec(&session.to_profile()).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> Session {
        Session {
            id: "u-1".to_string(),
            email: "ana@hospital.test".to_string(),
            username: "ana".to_string(),
            full_name: "Ana Diaz".to_string(),
            is_active: true,
            roles: vec![Role::Pharmacy],
            must_reset_password: false,
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let session = sample_session();
        let decoded = decode_snapshot(&encode_snapshot(&session)).expect("decodable");
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_malformed_snapshot_derives_to_none() {
        assert!(decode_snapshot("not-base64!!!").is_none());
        // Valid base64, not JSON
        let garbage = URL_SAFE_NO_PAD.encode(b"garbage");
        assert!(decode_snapshot(&garbage).is_none());
        // Valid JSON, wrong shape
        let wrong = URL_SAFE_NO_PAD.encode(br#"{"hello": "world"}"#);
        assert!(decode_snapshot(&wrong).is_none());
        // Truncated payload
        let full = encode_snapshot(&sample_session());
        assert!(decode_snapshot(&full[..full.len() / 2]).is_none());
    }

    #[test]
    fn test_unknown_roles_are_dropped_at_the_boundary() {
        let profile = UserProfile {
            id: "u-2".to_string(),
            email: "b@hospital.test".to_string(),
            username: "b".to_string(),
            full_name: "B".to_string(),
            is_active: true,
            roles: vec![
                "FARMACIA".to_string(),
                "intern".to_string(),
                "Admin".to_string(),
            ],
            must_reset_password: None,
        };
        let session = Session::from_profile(profile);
        assert_eq!(session.roles, vec![Role::Pharmacy, Role::Admin]);
    }

    #[test]
    fn test_cookie_provider_without_header_is_logged_out() {
        let provider = CookieSessionProvider::new(None, "hospital_session");
        assert!(provider.session().is_none());
    }

    #[test]
    fn test_cookie_provider_reads_the_named_cookie() {
        let session = sample_session();
        let header = format!(
            "theme=dark; hospital_session={}; lang=es",
            encode_snapshot(&session)
        );
        let provider = CookieSessionProvider::new(Some(&header), "hospital_session");
        assert_eq!(provider.session(), Some(session));
    }
}
