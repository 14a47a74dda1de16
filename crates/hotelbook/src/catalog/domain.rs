use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Row of the `hotels` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub stars: u8,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_types: Option<Vec<RoomType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Hotel {
    pub fn room_type(&self, name: &str) -> Option<&RoomType> {
        self.room_types
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|room| room.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub name: String,
    pub price: f64,
    pub capacity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Admin input for a new hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDraft {
    pub name: String,
    pub stars: u8,
    pub price: f64,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_types: Option<Vec<RoomType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl HotelDraft {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        validate_stars(self.stars)?;
        validate_price("price", self.price)?;
        if let Some(rooms) = &self.room_types {
            validate_rooms(rooms)?;
        }
        Ok(())
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_types: Option<Vec<RoomType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl HotelPatch {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(stars) = self.stars {
            validate_stars(stars)?;
        }
        if let Some(price) = self.price {
            validate_price("price", price)?;
        }
        if let Some(rooms) = &self.room_types {
            validate_rooms(rooms)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        Err(ServiceError::invalid(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn validate_stars(stars: u8) -> Result<(), ServiceError> {
    if (1..=5).contains(&stars) {
        Ok(())
    } else {
        Err(ServiceError::invalid("stars must be between 1 and 5"))
    }
}

fn validate_price(field: &str, price: f64) -> Result<(), ServiceError> {
    if price.is_finite() && price >= 1.0 {
        Ok(())
    } else {
        Err(ServiceError::invalid(format!("{field} must be at least 1")))
    }
}

fn validate_rooms(rooms: &[RoomType]) -> Result<(), ServiceError> {
    for room in rooms {
        require_text("room type name", &room.name)?;
        validate_price(&format!("price of room type '{}'", room.name), room.price)?;
        if room.capacity < 1 {
            return Err(ServiceError::invalid(format!(
                "capacity of room type '{}' must be at least 1",
                room.name
            )));
        }
    }
    Ok(())
}

/// Catalog filter as posted by the hotel list view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelFilter {
    #[serde(default)]
    pub min_stars: Option<u8>,
    #[serde(default)]
    pub max_stars: Option<u8>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort_by: Option<HotelSort>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HotelSort {
    PriceAsc,
    PriceDesc,
    StarsAsc,
    StarsDesc,
}

impl HotelSort {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::StarsAsc => "stars-asc",
            Self::StarsDesc => "stars-desc",
        }
    }
}

impl fmt::Display for HotelSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HotelSort {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "stars-asc" => Ok(Self::StarsAsc),
            "stars-desc" => Ok(Self::StarsDesc),
            other => Err(format!(
                "unknown sort '{other}' (expected price-asc, price-desc, stars-asc or stars-desc)"
            )),
        }
    }
}
