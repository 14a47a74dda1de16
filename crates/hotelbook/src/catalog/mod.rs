//! Hotel catalog: listing, lookup, in-memory filtering and admin maintenance.

pub mod domain;
pub mod filter;
pub mod router;
pub mod service;

pub use domain::{Coordinates, Hotel, HotelDraft, HotelFilter, HotelPatch, HotelSort, RoomType};
pub use filter::apply_filters;
pub use router::hotel_router;
pub use service::HotelService;
