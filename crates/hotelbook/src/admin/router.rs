use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;

use super::AdminService;
use crate::auth::AdminUser;
use crate::error::ServiceError;
use crate::store::Database;

#[derive(Debug, Default, Deserialize)]
struct SeedParams {
    #[serde(default)]
    reset: bool,
}

/// Dashboard figures and demo-data management. Every route requires the admin role.
pub fn admin_router<D>(service: Arc<AdminService<D>>) -> Router
where
    D: Database + 'static,
{
    Router::new()
        .route("/api/v1/admin/stats", get(stats_handler::<D>))
        .route(
            "/api/v1/admin/seed",
            post(seed_handler::<D>).delete(clear_handler::<D>),
        )
        .with_state(service)
}

async fn stats_handler<D>(
    State(service): State<Arc<AdminService<D>>>,
    AdminUser(_admin): AdminUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    Ok(Json(service.dashboard_stats()?).into_response())
}

async fn seed_handler<D>(
    State(service): State<Arc<AdminService<D>>>,
    AdminUser(admin): AdminUser,
    Query(params): Query<SeedParams>,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    tracing::info!(admin = %admin.uid, reset = params.reset, "seeding demo data");
    let outcome = if params.reset {
        service.clear_and_seed(Utc::now())?
    } else {
        service.seed_all(Utc::now())?
    };
    Ok(Json(outcome).into_response())
}

async fn clear_handler<D>(
    State(service): State<Arc<AdminService<D>>>,
    AdminUser(admin): AdminUser,
) -> Result<Response, ServiceError>
where
    D: Database + 'static,
{
    tracing::warn!(admin = %admin.uid, "clearing demo data");
    Ok(Json(service.clear_all()?).into_response())
}
