use chrono::NaiveDate;
use hotelbook::admin::{AdminService, SeedData};
use hotelbook::bookings::BookingService;
use hotelbook::catalog::HotelService;
use hotelbook::config::{AppEnvironment, EmailConfig};
use hotelbook::contacts::ContactService;
use hotelbook::notify::{LogMailer, Mailer, Notifier, ResendMailer};
use hotelbook::ratings::RatingService;
use hotelbook::store::Database;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every domain service, sharing one table backend and one notifier.
pub(crate) struct Services<D> {
    pub(crate) hotels: Arc<HotelService<D>>,
    pub(crate) bookings: Arc<BookingService<D>>,
    pub(crate) ratings: Arc<RatingService<D>>,
    pub(crate) contacts: Arc<ContactService<D>>,
    pub(crate) admin: Arc<AdminService<D>>,
    pub(crate) notifier: Arc<Notifier>,
}

impl<D> Services<D>
where
    D: Database + 'static,
{
    pub(crate) fn new(db: Arc<D>, notifier: Arc<Notifier>, seed: SeedData) -> Self {
        Self {
            hotels: Arc::new(HotelService::new(db.clone())),
            bookings: Arc::new(BookingService::new(db.clone(), notifier.clone())),
            ratings: Arc::new(RatingService::new(db.clone())),
            contacts: Arc::new(ContactService::new(db.clone(), notifier.clone())),
            admin: Arc::new(AdminService::new(db, seed)),
            notifier,
        }
    }
}

/// Without an API key, development and test runs log outbound mail. Production always talks to
/// the provider, which reports itself not ready until a key is configured.
pub(crate) fn select_mailer(config: &EmailConfig, environment: AppEnvironment) -> Arc<dyn Mailer> {
    if config.api_key.is_none() && !environment.is_production() {
        tracing::warn!("RESEND_API_KEY unset; outbound email will only be logged");
        return Arc::new(LogMailer);
    }
    Arc::new(ResendMailer::from_config(config))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
