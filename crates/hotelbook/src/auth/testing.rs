use std::sync::Arc;

use axum::{Extension, Router};
use chrono::{Duration, Utc};

use super::token::TokenVerifier;
use super::user::{ClaimMetadata, Claims};

pub(crate) const TEST_SECRET: &str = "router-test-secret";

/// `Authorization` header value for a token signed with [`TEST_SECRET`].
pub(crate) fn bearer(uid: &str, role: &str) -> String {
    let token = TokenVerifier::new(TEST_SECRET)
        .issue(&Claims {
            sub: uid.to_string(),
            email: Some(format!("{uid}@example.com")),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: None,
            app_metadata: ClaimMetadata {
                role: Some(role.to_string()),
                ..ClaimMetadata::default()
            },
            user_metadata: ClaimMetadata::default(),
        })
        .expect("token issued");
    format!("Bearer {token}")
}

pub(crate) fn with_verifier(router: Router) -> Router {
    router.layer(Extension(Arc::new(TokenVerifier::new(TEST_SECRET))))
}
