//! Reservations: server-side pricing, the booking lifecycle and the admin/guest notifications
//! that follow a new booking.

pub mod domain;
pub mod pricing;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Booking, BookingConfirmation, BookingRequest, BookingStatus, StatusUpdate};
pub use pricing::{calculate_total_price, nightly_rate, stay_nights};
pub use router::booking_router;
pub use service::BookingService;
