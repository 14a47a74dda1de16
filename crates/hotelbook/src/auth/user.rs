use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Unknown role strings fall back to the least privileged role.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Metadata objects attached by the provider. `user_metadata` is set at sign-up,
/// `app_metadata` only by the provider's admin API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(
        default,
        rename = "displayName",
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name_camel: Option<String>,
}

/// Access-token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default)]
    pub app_metadata: ClaimMetadata,
    #[serde(default)]
    pub user_metadata: ClaimMetadata,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Self {
        let email = claims.email.unwrap_or_default();
        let display_name = first_non_empty([
            claims.user_metadata.display_name.as_deref(),
            claims.user_metadata.display_name_camel.as_deref(),
        ])
        .map(str::to_string)
        .unwrap_or_else(|| email_local_part(&email).to_string());

        let role = claims
            .app_metadata
            .role
            .as_deref()
            .or(claims.user_metadata.role.as_deref())
            .map(Role::parse)
            .unwrap_or_default();

        Self {
            uid: claims.sub,
            email,
            display_name,
            role,
            issued_at: claims
                .iat
                .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0)),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name shown next to reviews and in notification e-mails.
    pub fn public_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }

    pub fn ensure_admin(&self) -> Result<(), ServiceError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("admin role required"))
        }
    }

    pub fn ensure_owner_or_admin(&self, owner_id: &str) -> Result<(), ServiceError> {
        if self.is_admin() || self.uid == owner_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden("only the owner or an admin may do this"))
        }
    }
}

fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(email: &str) -> Claims {
        Claims {
            sub: "user-1".to_string(),
            email: Some(email.to_string()),
            exp: 4_102_444_800,
            iat: Some(1_735_689_600),
            app_metadata: ClaimMetadata::default(),
            user_metadata: ClaimMetadata::default(),
        }
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let user = AuthUser::from_claims(claims("nadia.b@example.com"));
        assert_eq!(user.display_name, "nadia.b");
        assert_eq!(user.role, Role::User);
        assert!(user.issued_at.is_some());
    }

    #[test]
    fn display_name_prefers_snake_case_metadata() {
        let mut claims = claims("guest@example.com");
        claims.user_metadata.display_name_camel = Some("Camel Name".to_string());
        assert_eq!(AuthUser::from_claims(claims.clone()).display_name, "Camel Name");

        claims.user_metadata.display_name = Some("Snake Name".to_string());
        assert_eq!(AuthUser::from_claims(claims).display_name, "Snake Name");
    }

    #[test]
    fn app_metadata_role_wins_over_user_metadata() {
        let mut claims = claims("ops@example.com");
        claims.user_metadata.role = Some("admin".to_string());
        claims.app_metadata.role = Some("user".to_string());
        assert_eq!(AuthUser::from_claims(claims.clone()).role, Role::User);

        claims.app_metadata.role = None;
        assert_eq!(AuthUser::from_claims(claims).role, Role::Admin);
    }

    #[test]
    fn unknown_roles_are_plain_users() {
        assert_eq!(Role::parse("superuser"), Role::User);
        assert_eq!(Role::parse(" Admin "), Role::Admin);
    }

    #[test]
    fn ownership_checks() {
        let guest = AuthUser::from_claims(claims("guest@example.com"));
        assert!(guest.ensure_owner_or_admin("user-1").is_ok());
        assert!(matches!(
            guest.ensure_owner_or_admin("user-2"),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(guest.ensure_admin().is_err());
    }
}
