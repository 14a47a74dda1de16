use crate::cli::ServeArgs;
use crate::infra::{select_mailer, AppState, Services};
use crate::routes::with_hotelbook_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use hotelbook::admin::SeedData;
use hotelbook::auth::TokenVerifier;
use hotelbook::config::AppConfig;
use hotelbook::error::AppError;
use hotelbook::notify::Notifier;
use hotelbook::store::InMemoryDatabase;
use hotelbook::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let verifier = TokenVerifier::from_config(&config.auth);
    if !verifier.is_configured() {
        warn!("AUTH_JWT_SECRET unset; authenticated routes will reject every request");
    }

    let mailer = select_mailer(&config.email, config.environment);
    let notifier = Arc::new(Notifier::from_config(mailer, &config.email));
    let services = Services::new(
        Arc::new(InMemoryDatabase::default()),
        notifier,
        SeedData::bundled()?,
    );

    if args.seed || config.seed_demo_data {
        let outcome = services.admin.seed_all(Utc::now())?;
        info!(message = %outcome.message, "demo data seeded");
    }

    let app = with_hotelbook_routes(services)
        .layer(Extension(Arc::new(verifier)))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hotelbook api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
