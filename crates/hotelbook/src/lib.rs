//! HotelBook: hotel catalog, bookings, ratings and contact messages served over HTTP, with a
//! transactional e-mail function for booking and contact notifications.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod config;
pub mod contacts;
pub mod error;
pub mod notify;
pub mod ratings;
pub mod store;
pub mod telemetry;
