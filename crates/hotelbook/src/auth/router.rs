use axum::routing::get;
use axum::{Json, Router};

use super::extract::CurrentUser;
use super::user::AuthUser;

/// Session introspection for the front-end: who is calling and with which role.
pub fn auth_router() -> Router {
    Router::new().route("/api/v1/me", get(me_handler))
}

pub(crate) async fn me_handler(CurrentUser(user): CurrentUser) -> Json<SessionView> {
    Json(SessionView::from(user))
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    #[serde(flatten)]
    pub user: AuthUser,
    pub is_admin: bool,
}

impl From<AuthUser> for SessionView {
    fn from(user: AuthUser) -> Self {
        Self {
            is_admin: user.is_admin(),
            user,
        }
    }
}
