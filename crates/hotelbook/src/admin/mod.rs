//! Back-office operations: dashboard figures and demo data management.

pub mod router;
pub mod seed;
pub mod stats;

pub use router::admin_router;
pub use seed::{SeedData, SeedOutcome};
pub use stats::{DashboardStats, TableCounts};

use std::sync::Arc;

use crate::store::Database;

/// Admin-only service spanning every table.
pub struct AdminService<D> {
    db: Arc<D>,
    seed: SeedData,
}

impl<D> AdminService<D>
where
    D: Database + 'static,
{
    pub fn new(db: Arc<D>, seed: SeedData) -> Self {
        Self { db, seed }
    }

    pub fn seed_data(&self) -> &SeedData {
        &self.seed
    }
}
