use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use super::token::{AuthError, TokenVerifier};
use super::user::AuthUser;

/// Auth guard: the request must carry a valid token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

/// Admin guard: the request must carry a valid token with the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

/// Optional identity for public routes. An absent header yields `None`; a present but invalid
/// token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AuthError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| AuthError::Malformed("authorization header is not ASCII"))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim()))
        }
        _ => Err(AuthError::Malformed("expected 'Bearer <token>'")),
    }
}

fn authenticate(parts: &Parts) -> Result<Option<AuthUser>, AuthError> {
    let Some(token) = bearer_token(parts)? else {
        return Ok(None);
    };
    let verifier = parts
        .extensions
        .get::<Arc<TokenVerifier>>()
        .ok_or(AuthError::NotConfigured)?;
    verifier.verify(token).map(Some)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts)?
            .map(CurrentUser)
            .ok_or(AuthError::MissingToken)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticate(parts)?.ok_or(AuthError::MissingToken)?;
        if user.is_admin() {
            Ok(AdminUser(user))
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authenticate(parts).map(MaybeUser)
    }
}
