//! services/api/src/adapters/catalog.rs
//!
//! The catalog adapter: the concrete implementation of the `CourseCatalog`
//! port over the read-only section-blocks table maintained by the catalog
//! import pipeline.

use async_trait::async_trait;
use schedule_core::day;
use schedule_core::domain::TimeBlock;
use schedule_core::ports::{CourseCatalog, PortError, PortResult};
use schedule_core::time::TimeOfDay;
use sqlx::{FromRow, PgPool};

/// A database adapter that implements the `CourseCatalog` port.
#[derive(Clone)]
pub struct PgCatalogAdapter {
    pool: PgPool,
}

impl PgCatalogAdapter {
    /// Creates a new `PgCatalogAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BlockRecord {
    section_code: String,
    day: String,
    start_time: String,
    end_time: String,
    room: Option<String>,
    building: Option<String>,
}

impl BlockRecord {
    /// Day names are normalized here, at the boundary; a malformed time
    /// string in a catalog row is rejected rather than propagated.
    fn to_domain(self) -> PortResult<TimeBlock> {
        let bad_time = |e: schedule_core::error::ValidationError| {
            PortError::Storage(format!("catalog row for section {}: {}", self.section_code, e))
        };
        let start: TimeOfDay = self.start_time.parse().map_err(bad_time)?;
        let end: TimeOfDay = self.end_time.parse().map_err(bad_time)?;
        Ok(TimeBlock {
            day: day::normalize(&self.day),
            section_code: self.section_code,
            start,
            end,
            room: self.room,
            building: self.building,
        })
    }
}

#[async_trait]
impl CourseCatalog for PgCatalogAdapter {
    async fn blocks_for_section(&self, section_code: &str) -> PortResult<Vec<TimeBlock>> {
        let records = sqlx::query_as::<_, BlockRecord>(
            "SELECT section_code, day, start_time, end_time, room, building \
             FROM section_blocks WHERE section_code = $1 ORDER BY id",
        )
        .bind(section_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        records.into_iter().map(BlockRecord::to_domain).collect()
    }
}
