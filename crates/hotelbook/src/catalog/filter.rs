use std::cmp::Ordering;

use super::domain::{Hotel, HotelFilter, HotelSort};

/// Applies star/price bounds (inclusive) and the optional sort. Sorting is stable, so hotels
/// with equal keys keep their catalog order.
pub fn apply_filters(hotels: Vec<Hotel>, filter: &HotelFilter) -> Vec<Hotel> {
    let mut kept: Vec<Hotel> = hotels
        .into_iter()
        .filter(|hotel| filter.min_stars.map_or(true, |min| hotel.stars >= min))
        .filter(|hotel| filter.max_stars.map_or(true, |max| hotel.stars <= max))
        .filter(|hotel| filter.min_price.map_or(true, |min| hotel.price >= min))
        .filter(|hotel| filter.max_price.map_or(true, |max| hotel.price <= max))
        .collect();

    if let Some(sort) = filter.sort_by {
        kept.sort_by(|left, right| compare(sort, left, right));
    }
    kept
}

fn compare(sort: HotelSort, left: &Hotel, right: &Hotel) -> Ordering {
    match sort {
        HotelSort::PriceAsc => left.price.total_cmp(&right.price),
        HotelSort::PriceDesc => right.price.total_cmp(&left.price),
        HotelSort::StarsAsc => left.stars.cmp(&right.stars),
        HotelSort::StarsDesc => right.stars.cmp(&left.stars),
    }
}
