use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{AverageRating, Rating, RatingForm};
use crate::auth::AuthUser;
use crate::error::ServiceError;
use crate::store::{self, Database, Query, StoreError, Table};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewRating<'a> {
    hotel_id: &'a str,
    user_id: &'a str,
    user_name: &'a str,
    stars: u8,
    comment: &'a str,
    date: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

/// Mean of the star values rounded to one decimal; zero when there are no ratings.
pub fn average_stars(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|rating| f64::from(rating.stars)).sum();
    (sum / ratings.len() as f64 * 10.0).round() / 10.0
}

pub struct RatingService<D> {
    db: Arc<D>,
}

impl<D> RatingService<D>
where
    D: Database + 'static,
{
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    pub fn get_all_ratings(&self) -> Result<Vec<Rating>, ServiceError> {
        Ok(store::fetch_all(self.db.as_ref(), Table::Ratings, &Query::new())?)
    }

    pub fn get_hotel_ratings(&self, hotel_id: &str) -> Result<Vec<Rating>, ServiceError> {
        let query = Query::new().eq("hotelId", hotel_id);
        Ok(store::fetch_all(self.db.as_ref(), Table::Ratings, &query)?)
    }

    pub fn get_user_ratings(&self, user_id: &str) -> Result<Vec<Rating>, ServiceError> {
        let query = Query::new().eq("userId", user_id);
        Ok(store::fetch_all(self.db.as_ref(), Table::Ratings, &query)?)
    }

    pub fn get_average_rating(&self, hotel_id: &str) -> Result<AverageRating, ServiceError> {
        let ratings = self.get_hotel_ratings(hotel_id)?;
        Ok(AverageRating {
            hotel_id: hotel_id.to_string(),
            average: average_stars(&ratings),
            count: ratings.len(),
        })
    }

    pub fn add_rating(
        &self,
        user: &AuthUser,
        hotel_id: &str,
        form: RatingForm,
    ) -> Result<Rating, ServiceError> {
        form.validate()?;
        if self.db.count(Table::Hotels, &Query::by_id(hotel_id))? == 0 {
            return Err(ServiceError::NotFound("hotel"));
        }

        let now = Utc::now();
        let rating: Rating = store::insert_as(
            self.db.as_ref(),
            Table::Ratings,
            &NewRating {
                hotel_id,
                user_id: &user.uid,
                user_name: user.public_name(),
                stars: form.stars,
                comment: form.comment.trim(),
                date: now,
                created_at: now,
            },
        )?;
        tracing::info!(rating_id = %rating.id, hotel_id, stars = rating.stars, "rating added");
        Ok(rating)
    }

    /// Replaces stars and comment. Only the author or an admin may edit.
    pub fn update_rating(
        &self,
        user: &AuthUser,
        id: &str,
        form: RatingForm,
    ) -> Result<Rating, ServiceError> {
        form.validate()?;
        let existing = self.get_rating(id)?;
        user.ensure_owner_or_admin(&existing.user_id)?;

        let patch = store::to_row(&RatingForm {
            stars: form.stars,
            comment: form.comment.trim().to_string(),
        })?;
        if self.db.update(Table::Ratings, &Query::by_id(id), patch)? == 0 {
            return Err(ServiceError::NotFound("rating"));
        }
        self.get_rating(id)
    }

    pub fn delete_rating(&self, user: &AuthUser, id: &str) -> Result<(), ServiceError> {
        let existing = self.get_rating(id)?;
        user.ensure_owner_or_admin(&existing.user_id)?;
        if self.db.delete(Table::Ratings, &Query::by_id(id))? == 0 {
            return Err(ServiceError::NotFound("rating"));
        }
        tracing::info!(rating_id = %id, "rating deleted");
        Ok(())
    }

    pub fn has_user_rated(&self, user: &AuthUser, hotel_id: &str) -> Result<bool, ServiceError> {
        let query = Query::new()
            .eq("hotelId", hotel_id)
            .eq("userId", user.uid.as_str());
        Ok(self.db.count(Table::Ratings, &query)? > 0)
    }

    fn get_rating(&self, id: &str) -> Result<Rating, ServiceError> {
        store::fetch_single(self.db.as_ref(), Table::Ratings, &Query::by_id(id)).map_err(
            |error| match error {
                StoreError::NotFound => ServiceError::NotFound("rating"),
                other => other.into(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::store::{to_row, InMemoryDatabase, Row, StoreError};
    use serde_json::json;

    /// Reads from the wrapped store but writes match nothing, as when a row is
    /// removed between the ownership check and the write.
    struct VanishingWrites(InMemoryDatabase);

    impl Database for VanishingWrites {
        fn select(&self, table: Table, query: &Query) -> Result<Vec<Row>, StoreError> {
            self.0.select(table, query)
        }

        fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
            self.0.insert(table, row)
        }

        fn update(&self, _: Table, _: &Query, _: Row) -> Result<usize, StoreError> {
            Ok(0)
        }

        fn delete(&self, _: Table, _: &Query) -> Result<usize, StoreError> {
            Ok(0)
        }
    }

    fn reviewer(uid: &str, role: Role) -> AuthUser {
        AuthUser {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            display_name: String::new(),
            role,
            issued_at: None,
        }
    }

    fn form(stars: u8) -> RatingForm {
        RatingForm {
            stars,
            comment: "Spotless rooms and a great breakfast.".to_string(),
        }
    }

    fn service() -> RatingService<InMemoryDatabase> {
        let db = InMemoryDatabase::default();
        db.insert(
            Table::Hotels,
            to_row(&json!({ "id": "h-1", "name": "Seaside Resort & Spa" })).expect("row"),
        )
        .expect("hotel");
        RatingService::new(Arc::new(db))
    }

    #[test]
    fn average_is_rounded_to_one_decimal() {
        let service = service();
        for (uid, stars) in [("a", 5), ("b", 4), ("c", 4)] {
            service
                .add_rating(&reviewer(uid, Role::User), "h-1", form(stars))
                .expect("rating added");
        }
        let average = service.get_average_rating("h-1").expect("average");
        assert_eq!(average.average, 4.3);
        assert_eq!(average.count, 3);
        assert_eq!(service.get_average_rating("h-2").expect("average").average, 0.0);
    }

    #[test]
    fn add_rating_uses_public_name_and_requires_hotel() {
        let service = service();
        let rating = service
            .add_rating(&reviewer("lena", Role::User), "h-1", form(5))
            .expect("rating added");
        assert_eq!(rating.user_name.as_deref(), Some("lena@example.com"));
        assert!(rating.created_at.is_some());

        assert!(matches!(
            service.add_rating(&reviewer("lena", Role::User), "missing", form(5)),
            Err(ServiceError::NotFound("hotel"))
        ));
    }

    #[test]
    fn short_comments_and_bad_stars_are_rejected() {
        let service = service();
        let short = RatingForm {
            stars: 4,
            comment: "   nice    ".to_string(),
        };
        assert!(matches!(
            service.add_rating(&reviewer("lena", Role::User), "h-1", short),
            Err(ServiceError::Validation(_))
        ));
        assert!(service
            .add_rating(&reviewer("lena", Role::User), "h-1", form(6))
            .is_err());
    }

    #[test]
    fn only_authors_and_admins_edit_or_delete() {
        let service = service();
        let author = reviewer("lena", Role::User);
        let rating = service.add_rating(&author, "h-1", form(3)).expect("added");

        assert!(matches!(
            service.update_rating(&reviewer("noah", Role::User), &rating.id, form(1)),
            Err(ServiceError::Forbidden(_))
        ));
        let updated = service
            .update_rating(&author, &rating.id, form(5))
            .expect("author edits");
        assert_eq!(updated.stars, 5);
        assert_eq!(updated.date, rating.date);

        service
            .delete_rating(&reviewer("ops", Role::Admin), &rating.id)
            .expect("admin deletes");
        assert!(matches!(
            service.delete_rating(&author, &rating.id),
            Err(ServiceError::NotFound("rating"))
        ));
    }

    #[test]
    fn writes_that_touch_no_row_report_not_found() {
        let db = InMemoryDatabase::default();
        db.insert(
            Table::Ratings,
            to_row(&json!({
                "id": "r-1",
                "hotelId": "h-1",
                "userId": "lena",
                "stars": 4,
                "comment": "Spotless rooms and a great breakfast.",
                "date": "2025-05-01T10:00:00Z"
            }))
            .expect("row"),
        )
        .expect("rating");
        let service = RatingService::new(Arc::new(VanishingWrites(db)));
        let author = reviewer("lena", Role::User);

        assert!(matches!(
            service.update_rating(&author, "r-1", form(5)),
            Err(ServiceError::NotFound("rating"))
        ));
        assert!(matches!(
            service.delete_rating(&author, "r-1"),
            Err(ServiceError::NotFound("rating"))
        ));
    }

    #[test]
    fn has_user_rated_is_scoped_to_hotel_and_user() {
        let service = service();
        let author = reviewer("lena", Role::User);
        assert!(!service.has_user_rated(&author, "h-1").expect("status"));

        service.add_rating(&author, "h-1", form(4)).expect("added");
        assert!(service.has_user_rated(&author, "h-1").expect("status"));
        assert!(!service
            .has_user_rated(&reviewer("noah", Role::User), "h-1")
            .expect("status"));
        assert_eq!(service.get_user_ratings("lena").expect("mine").len(), 1);
        assert_eq!(service.get_all_ratings().expect("all").len(), 1);
    }
}
