//! Identity comes from the hosted auth provider: requests carry its HS256 access token and the
//! service only verifies it and reads the role claim. Guards are expressed as extractors.

pub mod extract;
pub mod router;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use extract::{AdminUser, CurrentUser, MaybeUser};
pub use router::auth_router;
pub use token::{AuthError, TokenVerifier};
pub use user::{AuthUser, ClaimMetadata, Claims, Role};
