//! Authentication for the restaurant service
//!
//! Handlers never see tokens. A protected route runs the
//! [`require_auth`](crate::server::builder::require_auth) middleware, which asks
//! the configured [`AuthProvider`] to turn the request token into an
//! [`AuthContext`] and stores it in the request extensions.
//!
//! Two providers ship with the crate:
//! - [`JwtAuthProvider`]: HS256 access/refresh tokens
//! - [`NoAuthProvider`]: accepts every request as anonymous (tests, local use)

use crate::core::error::{RequestError, ServiceError, ServiceResult};
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq)]
pub enum AuthContext {
    /// Authenticated user
    User {
        user_id: String,
        email: String,
        first_name: String,
        last_name: String,
    },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<&str> {
        match self {
            AuthContext::User { user_id, .. } => Some(user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, AuthContext::Anonymous)
    }
}

/// Identity embedded in issued tokens
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSubject {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Access and refresh token issued together on signup and login
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Trait for authentication providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve the caller from the raw request token
    async fn authenticate(&self, token: Option<&str>) -> ServiceResult<AuthContext>;

    /// Issue a fresh token pair for a user
    fn issue_tokens(&self, subject: &TokenSubject) -> ServiceResult<TokenPair>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Pull the request token from `Authorization: Bearer <t>` or the `token` header
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    bearer
        .or_else(|| headers.get("token").and_then(|v| v.to_str().ok()))
        .filter(|t| !t.is_empty())
}

/// No-op auth provider (allows everything)
#[derive(Debug, Clone, Default)]
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    async fn authenticate(&self, _token: Option<&str>) -> ServiceResult<AuthContext> {
        Ok(AuthContext::Anonymous)
    }

    fn issue_tokens(&self, _subject: &TokenSubject) -> ServiceResult<TokenPair> {
        Ok(TokenPair::default())
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Settings for [`JwtAuthProvider`]
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub issuer: String,
    pub access_token_minutes: i64,
    pub refresh_token_hours: i64,
}

/// Claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// "access" or "refresh"
    pub token_type: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
}

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

/// HS256 token provider
#[derive(Clone)]
pub struct JwtAuthProvider {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtAuthProvider {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
        Self {
            settings,
            encoding_key,
            decoding_key,
        }
    }

    fn sign(&self, subject: &TokenSubject, token_type: &str, ttl: Duration) -> ServiceResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.user_id.clone(),
            email: subject.email.clone(),
            first_name: subject.first_name.clone(),
            last_name: subject.last_name.clone(),
            token_type: token_type.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.settings.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify a token and return its claims
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            let message = match e.kind() {
                ErrorKind::ExpiredSignature => "token is expired".to_string(),
                ErrorKind::InvalidSignature => "invalid token signature".to_string(),
                _ => format!("the token is invalid: {}", e),
            };
            unauthorized(message)
        })?;

        Ok(data.claims)
    }
}

#[async_trait]
impl AuthProvider for JwtAuthProvider {
    async fn authenticate(&self, token: Option<&str>) -> ServiceResult<AuthContext> {
        let token = token.ok_or_else(|| unauthorized("no authorization header provided"))?;
        let claims = self.validate_token(token)?;

        if claims.token_type != ACCESS {
            return Err(unauthorized("refresh tokens cannot authorize requests"));
        }

        Ok(AuthContext::User {
            user_id: claims.sub,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
        })
    }

    fn issue_tokens(&self, subject: &TokenSubject) -> ServiceResult<TokenPair> {
        Ok(TokenPair {
            token: self.sign(
                subject,
                ACCESS,
                Duration::minutes(self.settings.access_token_minutes),
            )?,
            refresh_token: self.sign(
                subject,
                REFRESH,
                Duration::hours(self.settings.refresh_token_hours),
            )?,
        })
    }

    fn name(&self) -> &str {
        "jwt"
    }
}

fn unauthorized(message: impl Into<String>) -> ServiceError {
    RequestError::Unauthorized {
        message: message.into(),
    }
    .into()
}

/// Hash a password with Argon2id and a random salt
pub fn hash_password(password: &str) -> ServiceResult<String> {
    use argon2::password_hash::SaltString;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ServiceError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash; malformed hashes never verify
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
