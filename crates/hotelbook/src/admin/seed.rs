use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AdminService;
use crate::bookings::{calculate_total_price, BookingStatus};
use crate::catalog::{Hotel, HotelDraft};
use crate::error::ServiceError;
use crate::store::{self, Database, Query, Table};

const BUNDLED_SEED: &str = include_str!("../../fixtures/seed.json");

/// Rate used when a seeded booking names a room type the hotel does not list.
const FALLBACK_NIGHTLY_RATE: f64 = 100.0;

/// Matches every row: no stored id equals the nil UUID.
const NIL_ID: &str = "00000000-0000-0000-0000-000000000000";

const HOTELS_PRESENT: &str = "Hotels already exist in database. Clear the data first to reseed.";

/// Demo catalog, bookings and reviews shipped with the crate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    pub hotels: Vec<HotelDraft>,
    #[serde(default)]
    pub bookings: Vec<SeedHotelBookings>,
    #[serde(default)]
    pub ratings: Vec<SeedHotelRatings>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedHotelBookings {
    pub hotel_name: String,
    pub bookings: Vec<SeedBooking>,
}

/// Stay expressed as day offsets from the seeding date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedBooking {
    pub guest_name: String,
    pub check_in_offset_days: i64,
    pub check_out_offset_days: i64,
    pub guests: u32,
    pub room_type: String,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedHotelRatings {
    pub hotel_name: String,
    pub ratings: Vec<SeedRating>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRating {
    pub stars: u8,
    pub comment: String,
    pub user_name: String,
}

impl SeedData {
    pub fn bundled() -> Result<Self, ServiceError> {
        serde_json::from_str(BUNDLED_SEED)
            .map_err(|error| ServiceError::invalid(format!("bundled seed data is invalid: {error}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub success: bool,
    pub message: String,
}

impl SeedOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeededHotel<'a> {
    #[serde(flatten)]
    draft: &'a HotelDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeededBooking<'a> {
    user_id: String,
    hotel_id: &'a str,
    hotel_name: &'a str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
    room_type: &'a str,
    total_price: f64,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SeededRating<'a> {
    hotel_id: &'a str,
    user_id: String,
    user_name: &'a str,
    stars: u8,
    comment: &'a str,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

fn demo_user_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("demo-user-{}", &suffix[..6])
}

impl<D> AdminService<D>
where
    D: Database + 'static,
{
    /// Inserts the demo catalog unless the table already holds hotels.
    pub fn seed_hotels(&self) -> Result<SeedOutcome, ServiceError> {
        Ok(match self.insert_demo_hotels()? {
            None => SeedOutcome::ok(HOTELS_PRESENT),
            Some(inserted) => SeedOutcome::ok(format!("{inserted} hotels added successfully!")),
        })
    }

    /// Number of hotels inserted, or `None` when the catalog was already populated.
    fn insert_demo_hotels(&self) -> Result<Option<usize>, ServiceError> {
        if self.db.count(Table::Hotels, &Query::new().limit(1))? > 0 {
            tracing::info!("hotels already present, skipping seed");
            return Ok(None);
        }

        let now = Utc::now();
        for draft in &self.seed.hotels {
            store::insert_as::<_, _, Hotel>(
                self.db.as_ref(),
                Table::Hotels,
                &SeededHotel {
                    draft,
                    created_at: now,
                    updated_at: now,
                },
            )?;
        }
        let inserted = self.seed.hotels.len();
        tracing::info!(inserted, "demo hotels seeded");
        Ok(Some(inserted))
    }

    /// Adds demo bookings to seeded hotels, dated relative to `today`.
    pub fn seed_bookings(&self, today: NaiveDate) -> Result<SeedOutcome, ServiceError> {
        let hotels: Vec<Hotel> = store::fetch_all(self.db.as_ref(), Table::Hotels, &Query::new())?;
        if hotels.is_empty() {
            return Ok(SeedOutcome::failed("No hotels found. Please seed hotels first."));
        }

        let now = Utc::now();
        let mut inserted = 0;
        for group in &self.seed.bookings {
            let Some(hotel) = hotels.iter().find(|hotel| hotel.name == group.hotel_name) else {
                continue;
            };
            for booking in &group.bookings {
                let check_in = today + Duration::days(booking.check_in_offset_days);
                let check_out = today + Duration::days(booking.check_out_offset_days);
                let rate = hotel
                    .room_type(&booking.room_type)
                    .map_or(FALLBACK_NIGHTLY_RATE, |room| room.price);
                let row = store::to_row(&SeededBooking {
                    user_id: demo_user_id(),
                    hotel_id: &hotel.id,
                    hotel_name: &hotel.name,
                    check_in,
                    check_out,
                    guests: booking.guests,
                    room_type: &booking.room_type,
                    total_price: calculate_total_price(rate, check_in, check_out),
                    status: booking.status,
                    created_at: now,
                    updated_at: now,
                })?;
                match self.db.insert(Table::Bookings, row) {
                    Ok(_) => inserted += 1,
                    Err(error) => {
                        tracing::error!(guest = %booking.guest_name, error = %error, "demo booking skipped")
                    }
                }
            }
        }
        tracing::info!(inserted, "demo bookings seeded");
        Ok(SeedOutcome::ok(format!("{inserted} bookings added successfully!")))
    }

    /// Adds demo reviews, their dates spread over the 30 days before `now`.
    pub fn seed_ratings(&self, now: DateTime<Utc>) -> Result<SeedOutcome, ServiceError> {
        let hotels: Vec<Hotel> = store::fetch_all(self.db.as_ref(), Table::Hotels, &Query::new())?;
        if hotels.is_empty() {
            return Ok(SeedOutcome::failed("No hotels found. Please seed hotels first."));
        }

        let mut inserted: i64 = 0;
        for group in &self.seed.ratings {
            let Some(hotel) = hotels.iter().find(|hotel| hotel.name == group.hotel_name) else {
                continue;
            };
            for rating in &group.ratings {
                let days_ago = (inserted * 7) % 30;
                let row = store::to_row(&SeededRating {
                    hotel_id: &hotel.id,
                    user_id: demo_user_id(),
                    user_name: &rating.user_name,
                    stars: rating.stars,
                    comment: &rating.comment,
                    date: now - Duration::days(days_ago),
                    created_at: now,
                })?;
                match self.db.insert(Table::Ratings, row) {
                    Ok(_) => inserted += 1,
                    Err(error) => {
                        tracing::error!(user = %rating.user_name, error = %error, "demo rating skipped")
                    }
                }
            }
        }
        tracing::info!(inserted, "demo ratings seeded");
        Ok(SeedOutcome::ok(format!("{inserted} ratings added successfully!")))
    }

    /// Removes ratings, bookings and hotels. Contact messages are kept.
    pub fn clear_all(&self) -> Result<SeedOutcome, ServiceError> {
        let everything = Query::new().neq("id", NIL_ID);
        let ratings = self.db.delete(Table::Ratings, &everything)?;
        let bookings = self.db.delete(Table::Bookings, &everything)?;
        let hotels = self.db.delete(Table::Hotels, &everything)?;
        tracing::info!(ratings, bookings, hotels, "demo data cleared");
        Ok(SeedOutcome::ok("All data cleared successfully!"))
    }

    /// Hotels first, then reviews and bookings; reports each step in one message. Reviews and
    /// bookings are only added alongside a freshly inserted catalog.
    pub fn seed_all(&self, now: DateTime<Utc>) -> Result<SeedOutcome, ServiceError> {
        let Some(inserted) = self.insert_demo_hotels()? else {
            return Ok(SeedOutcome::ok(HOTELS_PRESENT));
        };
        let ratings = self.seed_ratings(now)?;
        let bookings = self.seed_bookings(now.date_naive())?;

        let mut messages = vec![format!("{inserted} hotels added successfully!")];
        messages.extend(
            [ratings, bookings]
                .into_iter()
                .filter(|outcome| outcome.success)
                .map(|outcome| outcome.message),
        );
        Ok(SeedOutcome::ok(format!(
            "Database seeded successfully! {}",
            messages.join(" ")
        )))
    }

    pub fn clear_and_seed(&self, now: DateTime<Utc>) -> Result<SeedOutcome, ServiceError> {
        let cleared = self.clear_all()?;
        if !cleared.success {
            return Ok(cleared);
        }
        self.seed_all(now)
    }
}
