use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

pub const MIN_COMMENT_CHARS: usize = 10;

/// Row of the `ratings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub hotel_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub stars: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingForm {
    pub stars: u8,
    pub comment: String,
}

impl RatingForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if !(1..=5).contains(&self.stars) {
            return Err(ServiceError::invalid("stars must be between 1 and 5"));
        }
        if self.comment.trim().chars().count() < MIN_COMMENT_CHARS {
            return Err(ServiceError::invalid(format!(
                "comment must be at least {MIN_COMMENT_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRating {
    pub hotel_id: String,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingStatus {
    pub hotel_id: String,
    pub has_rated: bool,
}
