//! JWT token service
//!
//! Mints and validates the server-only session credential carried in the
//! HttpOnly cookie. The claims duplicate the profile snapshot so the
//! middleware can rebuild a verified [`Session`] without consulting the
//! client-readable cookie.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::session::Session;
use crate::auth::permissions::Role;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(480), // one shift
            issuer: std::env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "inventory-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "inventory-dashboard".to_string()),
        }
    }
}

/// Claims stored in the session credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub active: bool,
    /// Comma-joined canonical role names
    pub roles: String,
    pub must_reset_password: bool,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("token generation failed: {0}")]
    GenerationFailed(String),
}

/// Load the signing secret from the environment
///
/// Production refuses to start without `JWT_SECRET`; development generates a
/// throwaway key so sessions simply reset on restart.
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            #[cfg(not(debug_assertions))]
            panic!("JWT_SECRET must be at least 32 characters long");
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET too short, generating a temporary development key");
                generate_dev_secret()
            }
        }
        Err(_) => {
            #[cfg(not(debug_assertions))]
            panic!("JWT_SECRET environment variable must be set in production");
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating a temporary development key");
                generate_dev_secret()
            }
        }
    }
}

/// Random printable 64-character secret for development runs
fn generate_dev_secret() -> String {
    const ALPHABET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    if rng.fill(&mut bytes).is_err() {
        // Random source failure only happens in badly broken environments;
        // a fixed dev key keeps the process usable there.
        return "inventory-server-development-fallback-key-0000".to_string();
    }
    bytes
        .iter()
        .map(|b| ALPHABET[(*b as usize) % ALPHABET.len()] as char)
        .collect()
}

/// Session credential service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Mint a credential for a verified session
    pub fn generate_token(&self, session: &Session) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let roles = session
            .roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let claims = Claims {
            sub: session.id.clone(),
            email: session.email.clone(),
            username: session.username.clone(),
            full_name: session.full_name.clone(),
            active: session.is_active,
            roles,
            must_reset_password: session.must_reset_password,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate a credential and rebuild the verified session
    pub fn validate_token(&self, token: &str) -> Result<Session, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        Ok(session_from_claims(token_data.claims))
    }

    /// Seconds until the credential expires
    pub fn max_age_seconds(&self) -> i64 {
        self.config.expiration_minutes * 60
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

fn session_from_claims(claims: Claims) -> Session {
    let roles: Vec<Role> = if claims.roles.is_empty() {
        vec![]
    } else {
        claims.roles.split(',').filter_map(Role::parse).collect()
    };

    Session {
        id: claims.sub,
        email: claims.email,
        username: claims.username,
        full_name: claims.full_name,
        is_active: claims.active,
        roles,
        must_reset_password: claims.must_reset_password,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-key-0123456789abcdef".to_string(),
            expiration_minutes: 60,
            issuer: "inventory-server".to_string(),
            audience: "inventory-dashboard".to_string(),
        })
    }

    fn sample_session() -> Session {
        Session {
            id: "u-9".to_string(),
            email: "jose@hospital.test".to_string(),
            username: "jose".to_string(),
            full_name: "Jose Rios".to_string(),
            is_active: true,
            roles: vec![Role::Warehouse, Role::Auditor],
            must_reset_password: false,
        }
    }

    #[test]
    fn test_token_round_trip_preserves_the_session() {
        let service = test_service();
        let session = sample_session();

        let token = service.generate_token(&session).expect("token");
        let verified = service.validate_token(&token).expect("valid");

        assert_eq!(verified, session);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let service = test_service();
        let token = service.generate_token(&sample_session()).expect("token");

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });

        assert!(service.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_token_from_another_issuer_is_rejected() {
        let service = test_service();
        let other = JwtService::with_config(JwtConfig {
            issuer: "someone-else".to_string(),
            ..service.config.clone()
        });

        let token = other.generate_token(&sample_session()).expect("token");
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::with_config(JwtConfig {
            expiration_minutes: -5,
            ..test_service().config
        });

        let token = service.generate_token(&sample_session()).expect("token");
        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::ExpiredToken)
        ));
    }
}
