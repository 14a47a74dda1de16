use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Hotel, HotelDraft, HotelFilter, HotelPatch};
use super::filter::apply_filters;
use crate::error::ServiceError;
use crate::store::{self, Database, Query, StoreError, Table};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewHotel<'a> {
    #[serde(flatten)]
    draft: &'a HotelDraft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StampedPatch<'a> {
    #[serde(flatten)]
    patch: &'a HotelPatch,
    updated_at: DateTime<Utc>,
}

/// Read and maintenance operations over the `hotels` table.
pub struct HotelService<D> {
    db: Arc<D>,
}

impl<D> HotelService<D>
where
    D: Database + 'static,
{
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    pub fn get_hotels(&self) -> Result<Vec<Hotel>, ServiceError> {
        Ok(store::fetch_all(self.db.as_ref(), Table::Hotels, &Query::new())?)
    }

    pub fn get_hotel_by_id(&self, id: &str) -> Result<Hotel, ServiceError> {
        store::fetch_single(self.db.as_ref(), Table::Hotels, &Query::by_id(id)).map_err(
            |error| match error {
                StoreError::NotFound => ServiceError::NotFound("hotel"),
                other => other.into(),
            },
        )
    }

    pub fn get_filtered_hotels(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, ServiceError> {
        Ok(apply_filters(self.get_hotels()?, filter))
    }

    pub fn add_hotel(&self, draft: HotelDraft) -> Result<Hotel, ServiceError> {
        draft.validate()?;
        let now = Utc::now();
        let hotel: Hotel = store::insert_as(
            self.db.as_ref(),
            Table::Hotels,
            &NewHotel {
                draft: &draft,
                created_at: now,
                updated_at: now,
            },
        )?;
        tracing::info!(hotel_id = %hotel.id, name = %hotel.name, "hotel added");
        Ok(hotel)
    }

    pub fn update_hotel(&self, id: &str, patch: HotelPatch) -> Result<Hotel, ServiceError> {
        patch.validate()?;
        let row = store::to_row(&StampedPatch {
            patch: &patch,
            updated_at: Utc::now(),
        })?;
        if self.db.update(Table::Hotels, &Query::by_id(id), row)? == 0 {
            return Err(ServiceError::NotFound("hotel"));
        }
        tracing::info!(hotel_id = %id, "hotel updated");
        self.get_hotel_by_id(id)
    }

    pub fn delete_hotel(&self, id: &str) -> Result<(), ServiceError> {
        if self.db.delete(Table::Hotels, &Query::by_id(id))? == 0 {
            return Err(ServiceError::NotFound("hotel"));
        }
        tracing::info!(hotel_id = %id, "hotel deleted");
        Ok(())
    }
}
