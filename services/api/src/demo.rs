use chrono::{Duration, NaiveDate, Utc};
use clap::Args;
use hotelbook::admin::{AdminService, SeedData};
use hotelbook::auth::{ClaimMetadata, Claims, TokenVerifier};
use hotelbook::bookings::calculate_total_price;
use hotelbook::catalog::{Hotel, HotelFilter, HotelService, HotelSort};
use hotelbook::config::AppConfig;
use hotelbook::error::AppError;
use hotelbook::store::InMemoryDatabase;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct HotelsArgs {
    /// Lowest star rating to include
    #[arg(long)]
    pub(crate) min_stars: Option<u8>,
    /// Highest star rating to include
    #[arg(long)]
    pub(crate) max_stars: Option<u8>,
    /// Lowest nightly price to include
    #[arg(long)]
    pub(crate) min_price: Option<f64>,
    /// Highest nightly price to include
    #[arg(long)]
    pub(crate) max_price: Option<f64>,
    /// price-asc, price-desc, stars-asc or stars-desc
    #[arg(long)]
    pub(crate) sort_by: Option<HotelSort>,
}

impl From<HotelsArgs> for HotelFilter {
    fn from(args: HotelsArgs) -> Self {
        HotelFilter {
            min_stars: args.min_stars,
            max_stars: args.max_stars,
            min_price: args.min_price,
            max_price: args.max_price,
            sort_by: args.sort_by,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Nightly rate of the room
    #[arg(long)]
    pub(crate) price_per_night: f64,
    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) check_in: NaiveDate,
    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) check_out: NaiveDate,
}

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// Subject (user id) of the token
    #[arg(long)]
    pub(crate) sub: String,
    #[arg(long)]
    pub(crate) email: String,
    /// Display name shown next to reviews
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// `user` or `admin`
    #[arg(long, default_value = "user")]
    pub(crate) role: String,
    #[arg(long, default_value_t = 60)]
    pub(crate) ttl_minutes: i64,
}

pub(crate) fn run_hotels(args: HotelsArgs) -> Result<(), AppError> {
    let hotels = demo_catalog(&HotelFilter::from(args))?;
    println!("{} hotel(s)", hotels.len());
    for hotel in &hotels {
        println!(
            "- {} ({} stars) from ${:.2}/night{}",
            hotel.name,
            hotel.stars,
            hotel.price,
            hotel
                .location
                .as_deref()
                .map(|location| format!(" | {location}"))
                .unwrap_or_default()
        );
        for room in hotel.room_types.iter().flatten() {
            println!(
                "    {}: ${:.2} (up to {} guests)",
                room.name, room.price, room.capacity
            );
        }
    }
    Ok(())
}

/// Bundled hotels loaded into a scratch store and passed through the API's filter.
pub(crate) fn demo_catalog(filter: &HotelFilter) -> Result<Vec<Hotel>, AppError> {
    let db = Arc::new(InMemoryDatabase::default());
    AdminService::new(db.clone(), SeedData::bundled()?).seed_hotels()?;
    Ok(HotelService::new(db).get_filtered_hotels(filter)?)
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let quote = Quote::new(args.price_per_night, args.check_in, args.check_out);
    println!(
        "{} night(s) from {} to {} at ${:.2}/night",
        quote.nights, args.check_in, args.check_out, args.price_per_night
    );
    println!("Total: ${:.2}", quote.total);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Quote {
    pub(crate) nights: i64,
    pub(crate) total: f64,
}

impl Quote {
    pub(crate) fn new(price_per_night: f64, check_in: NaiveDate, check_out: NaiveDate) -> Self {
        let nights = (check_out - check_in).num_days().abs().max(1);
        Self {
            nights,
            total: calculate_total_price(price_per_night, check_in, check_out),
        }
    }
}

pub(crate) fn run_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let verifier = TokenVerifier::from_config(&config.auth);
    println!("{}", mint_token(&verifier, args)?);
    Ok(())
}

pub(crate) fn mint_token(verifier: &TokenVerifier, args: TokenArgs) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: args.sub,
        email: Some(args.email),
        exp: (now + Duration::minutes(args.ttl_minutes)).timestamp(),
        iat: Some(now.timestamp()),
        app_metadata: ClaimMetadata {
            role: Some(args.role),
            ..ClaimMetadata::default()
        },
        user_metadata: ClaimMetadata {
            display_name: args.name,
            ..ClaimMetadata::default()
        },
    };
    Ok(verifier.issue(&claims)?)
}
