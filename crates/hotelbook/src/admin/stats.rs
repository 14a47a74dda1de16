use serde::{Deserialize, Serialize};

use super::AdminService;
use crate::bookings::{Booking, BookingStatus};
use crate::contacts::{ContactMessage, ContactStatus};
use crate::error::ServiceError;
use crate::store::{self, Database, Query, Table};

/// Figures shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_hotels: usize,
    pub total_bookings: usize,
    pub pending_bookings: usize,
    /// Sum of `totalPrice` over bookings that were not cancelled.
    pub total_revenue: f64,
    pub total_messages: usize,
    pub unread_messages: usize,
    pub tables: TableCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub hotels: usize,
    pub ratings: usize,
    pub bookings: usize,
}

impl<D> AdminService<D>
where
    D: Database + 'static,
{
    pub fn table_counts(&self) -> Result<TableCounts, ServiceError> {
        let all = Query::new();
        Ok(TableCounts {
            hotels: self.db.count(Table::Hotels, &all)?,
            ratings: self.db.count(Table::Ratings, &all)?,
            bookings: self.db.count(Table::Bookings, &all)?,
        })
    }

    pub fn dashboard_stats(&self) -> Result<DashboardStats, ServiceError> {
        let bookings: Vec<Booking> =
            store::fetch_all(self.db.as_ref(), Table::Bookings, &Query::new())?;
        let messages: Vec<ContactMessage> =
            store::fetch_all(self.db.as_ref(), Table::Contacts, &Query::new())?;
        let tables = self.table_counts()?;

        let total_revenue: f64 = bookings
            .iter()
            .filter(|booking| booking.status != BookingStatus::Cancelled)
            .filter_map(|booking| booking.total_price)
            .sum();

        Ok(DashboardStats {
            total_hotels: tables.hotels,
            total_bookings: bookings.len(),
            pending_bookings: bookings
                .iter()
                .filter(|booking| booking.status == BookingStatus::Pending)
                .count(),
            total_revenue,
            total_messages: messages.len(),
            unread_messages: messages
                .iter()
                .filter(|message| message.status == ContactStatus::Unread)
                .count(),
            tables,
        })
    }
}
