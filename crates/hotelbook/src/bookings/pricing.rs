use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::Hotel;

const SECONDS_PER_DAY: i64 = 86_400;

/// Surcharge applied to a `Deluxe` request at hotels that do not list room types.
pub const DELUXE_MULTIPLIER: f64 = 1.5;

/// Nights between two instants: the absolute difference in days, rounded up, never below one.
pub fn stay_nights(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    let seconds = (check_out - check_in).num_seconds().abs();
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    days.max(1)
}

pub fn calculate_total_price(price_per_night: f64, check_in: NaiveDate, check_out: NaiveDate) -> f64 {
    let nights = stay_nights(midnight(check_in), midnight(check_out));
    price_per_night * nights as f64
}

/// Rate for `room_type` at `hotel`: the listed room price, else the deluxe surcharge, else the
/// hotel's base price.
pub fn nightly_rate(hotel: &Hotel, room_type: &str) -> f64 {
    if let Some(room) = hotel.room_type(room_type) {
        return room.price;
    }
    if room_type == "Deluxe" {
        return hotel.price * DELUXE_MULTIPLIER;
    }
    hotel.price
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
