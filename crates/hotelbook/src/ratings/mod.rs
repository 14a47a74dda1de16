//! Guest reviews and per-hotel averages.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{AverageRating, Rating, RatingForm, RatingStatus};
pub use router::rating_router;
pub use service::{average_stars, RatingService};
