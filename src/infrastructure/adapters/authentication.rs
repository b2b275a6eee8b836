//! Authentication adapter for bearer tokens
//!
//! Decodes HS256 JWTs carrying the caller's role and exposes them to the
//! dispatcher as a [`Session`]. A missing or invalid token yields an
//! anonymous session; the dispatcher then answers 401 on protected routes.

use crate::config::app_config::JwtConfig;
use crate::domain::routing::{RoleId, Session};
use crate::shared::error::{AppError, AppResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// JWT claims issued to staff accounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject (account identifier)
    pub sub: String,

    /// Role id of the account
    pub role: u32,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at
    pub iat: usize,

    /// Expiration time
    pub exp: usize,
}

/// Session decoded from a request's bearer token
#[derive(Debug, Clone, Default)]
pub struct TokenSession {
    claims: Option<SessionClaims>,
}

impl TokenSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn claims(&self) -> Option<&SessionClaims> {
        self.claims.as_ref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.as_ref().map(|c| c.sub.as_str())
    }
}

impl Session for TokenSession {
    fn current_role(&self) -> Option<RoleId> {
        self.claims.as_ref().map(|c| RoleId(c.role))
    }
}

/// Adapter for issuing and validating session tokens
pub struct AuthenticationAdapter {
    config: JwtConfig,
}

impl AuthenticationAdapter {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    /// Build the session for an `Authorization` header value
    pub fn session_from_header(&self, header: Option<&str>) -> TokenSession {
        let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")) else {
            return TokenSession::anonymous();
        };

        match self.validate_token(token.trim()) {
            Ok(claims) => {
                debug!(subject = %claims.sub, role = claims.role, "Session token accepted");
                TokenSession { claims: Some(claims) }
            }
            Err(e) => {
                warn!("Rejected session token: {}", e);
                TokenSession::anonymous()
            }
        }
    }

    /// Decode and verify a raw JWT
    pub fn validate_token(&self, token: &str) -> AppResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret_key.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }

    /// Issue a token for `subject` holding `role`
    pub fn issue_token(&self, subject: &str, role: RoleId) -> AppResult<String> {
        if subject.trim().is_empty() {
            return Err(AppError::Authentication("Empty subject".to_string()));
        }
        let now = Utc::now().timestamp() as usize;
        let claims = SessionClaims {
            sub: subject.to_string(),
            role: role.0,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now,
            exp: now + self.config.expiration_seconds as usize,
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret_key.as_bytes()),
        )?)
    }
}
