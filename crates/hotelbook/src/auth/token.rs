use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;

use super::user::{AuthUser, Claims};
use crate::config::AuthConfig;

const SUPPORTED_ALGORITHM: &str = "HS256";

/// Reasons a request is refused by the auth guards.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("unsupported token algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("token signature mismatch")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("authentication is not configured")]
    NotConfigured,
    #[error("admin role required")]
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        match self {
            AuthError::Forbidden => (StatusCode::FORBIDDEN, body).into_response(),
            _ => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer")],
                body,
            )
                .into_response(),
        }
    }
}

#[derive(Deserialize)]
struct Header {
    alg: String,
}

/// Verifies access tokens signed with the provider's shared HS256 secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: Option<Vec<u8>>,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("configured", &self.key.is_some())
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: Some(secret.as_ref().to_vec()),
        }
    }

    /// A verifier that refuses every token.
    pub fn disabled() -> Self {
        Self { key: None }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        match &config.jwt_secret {
            Some(secret) => Self::new(secret),
            None => Self::disabled(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<AuthUser, AuthError> {
        let claims = self.decode(token)?;
        if claims.exp <= now.timestamp() {
            return Err(AuthError::Expired);
        }
        Ok(AuthUser::from_claims(claims))
    }

    /// Signs `claims` with the configured secret. Used to mint local development tokens.
    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = serde_json::to_vec(claims)
            .map_err(|_| AuthError::Malformed("claims are not serializable"))?;
        let signing_input = format!("{header}.{}", URL_SAFE_NO_PAD.encode(payload));

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{signing_input}.{signature}"))
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let token = token.trim();
        let (signing_input, signature) = token
            .rsplit_once('.')
            .ok_or(AuthError::Malformed("expected three segments"))?;
        let (header, payload) = signing_input
            .split_once('.')
            .filter(|(_, payload)| !payload.contains('.'))
            .ok_or(AuthError::Malformed("expected three segments"))?;

        let header: Header = serde_json::from_slice(&decode_segment(header)?)
            .map_err(|_| AuthError::Malformed("header is not valid JSON"))?;
        if header.alg != SUPPORTED_ALGORITHM {
            return Err(AuthError::UnsupportedAlgorithm(header.alg));
        }

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&decode_segment(signature)?)
            .map_err(|_| AuthError::InvalidSignature)?;

        serde_json::from_slice(&decode_segment(payload)?)
            .map_err(|_| AuthError::Malformed("claims are not valid JSON"))
    }

    fn mac(&self) -> Result<Hmac<Sha256>, AuthError> {
        let key = self.key.as_deref().ok_or(AuthError::NotConfigured)?;
        <Hmac<Sha256>>::new_from_slice(key).map_err(|_| AuthError::NotConfigured)
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, AuthError> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|_| AuthError::Malformed("segment is not base64url"))
}
