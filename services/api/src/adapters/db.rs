//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `ScheduleRepository` port from the `core` crate. It handles all
//! interactions with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schedule_core::domain::{Enrollment, Schedule};
use schedule_core::ports::{PortError, PortResult, ScheduleRepository};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ScheduleRepository` port.
#[derive(Clone)]
pub struct PgScheduleRepository {
    pool: PgPool,
}

impl PgScheduleRepository {
    /// Creates a new `PgScheduleRepository`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn storage(err: sqlx::Error) -> PortError {
    PortError::Storage(err.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct ScheduleRecord {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    semester: Option<String>,
    total_credits: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScheduleRecord {
    fn to_domain(self) -> Schedule {
        Schedule {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name,
            semester: self.semester,
            total_credits: self.total_credits.max(0) as u32,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct EnrollmentRecord {
    id: Uuid,
    schedule_id: Uuid,
    subject_id: Uuid,
    instructor_id: Uuid,
    section_code: String,
    subject_name: String,
    instructor_name: String,
    credits: i32,
    color: String,
}

impl EnrollmentRecord {
    fn to_domain(self) -> Enrollment {
        Enrollment {
            id: self.id,
            schedule_id: self.schedule_id,
            subject_id: self.subject_id,
            instructor_id: self.instructor_id,
            section_code: self.section_code,
            subject_name: self.subject_name,
            instructor_name: self.instructor_name,
            credits: self.credits.max(0) as u32,
            color: self.color,
            // Time blocks are attached from the catalog, keyed by section
            // code; they are not stored on the enrollment row.
            blocks: Vec::new(),
        }
    }
}

//=========================================================================================
// `ScheduleRepository` Trait Implementation
//=========================================================================================

#[async_trait]
impl ScheduleRepository for PgScheduleRepository {
    async fn insert_schedule(&self, schedule: &Schedule) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO schedules \
             (id, owner_id, name, semester, total_credits, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(schedule.id)
        .bind(schedule.owner_id)
        .bind(&schedule.name)
        .bind(&schedule.semester)
        .bind(schedule.total_credits as i32)
        .bind(schedule.is_active)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await
        .map_err(storage)?;
        Ok(())
    }

    async fn schedule_by_id(&self, schedule_id: Uuid) -> PortResult<Schedule> {
        let record = sqlx::query_as::<_, ScheduleRecord>(
            "SELECT id, owner_id, name, semester, total_credits, is_active, created_at, updated_at \
             FROM schedules WHERE id = $1",
        )
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?
        .ok_or_else(|| PortError::NotFound(format!("Schedule {} not found", schedule_id)))?;

        Ok(record.to_domain())
    }

    async fn schedules_by_owner(&self, owner_id: Uuid) -> PortResult<Vec<Schedule>> {
        let records = sqlx::query_as::<_, ScheduleRecord>(
            "SELECT id, owner_id, name, semester, total_credits, is_active, created_at, updated_at \
             FROM schedules WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(records.into_iter().map(ScheduleRecord::to_domain).collect())
    }

    async fn delete_schedule(&self, schedule_id: Uuid) -> PortResult<()> {
        // Enrollment rows go with it via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(schedule_id)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Schedule {} not found",
                schedule_id
            )));
        }
        Ok(())
    }

    async fn enrollments_for_schedule(&self, schedule_id: Uuid) -> PortResult<Vec<Enrollment>> {
        let records = sqlx::query_as::<_, EnrollmentRecord>(
            "SELECT id, schedule_id, subject_id, instructor_id, section_code, \
                    subject_name, instructor_name, credits, color \
             FROM schedule_enrollments WHERE schedule_id = $1 ORDER BY position",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;

        Ok(records
            .into_iter()
            .map(EnrollmentRecord::to_domain)
            .collect())
    }

    async fn insert_enrollment(
        &self,
        enrollment: &Enrollment,
        new_total_credits: u32,
    ) -> PortResult<()> {
        // Row insert and credit-total update land in one transaction so the
        // caller never observes a half-applied add.
        let mut tx = self.pool.begin().await.map_err(storage)?;

        sqlx::query(
            "INSERT INTO schedule_enrollments \
             (id, schedule_id, subject_id, instructor_id, section_code, \
              subject_name, instructor_name, credits, color) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(enrollment.id)
        .bind(enrollment.schedule_id)
        .bind(enrollment.subject_id)
        .bind(enrollment.instructor_id)
        .bind(&enrollment.section_code)
        .bind(&enrollment.subject_name)
        .bind(&enrollment.instructor_name)
        .bind(enrollment.credits as i32)
        .bind(&enrollment.color)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        let updated = sqlx::query(
            "UPDATE schedules SET total_credits = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(new_total_credits as i32)
        .bind(enrollment.schedule_id)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        if updated.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Schedule {} not found",
                enrollment.schedule_id
            )));
        }

        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn delete_enrollment(
        &self,
        schedule_id: Uuid,
        enrollment_id: Uuid,
        new_total_credits: u32,
    ) -> PortResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        let deleted = sqlx::query(
            "DELETE FROM schedule_enrollments WHERE id = $1 AND schedule_id = $2",
        )
        .bind(enrollment_id)
        .bind(schedule_id)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        if deleted.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Enrollment {} not found",
                enrollment_id
            )));
        }

        sqlx::query("UPDATE schedules SET total_credits = $1, updated_at = NOW() WHERE id = $2")
            .bind(new_total_credits as i32)
            .bind(schedule_id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        tx.commit().await.map_err(storage)?;
        Ok(())
    }

    async fn clear_enrollments(&self, schedule_id: Uuid) -> PortResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage)?;

        sqlx::query("DELETE FROM schedule_enrollments WHERE schedule_id = $1")
            .bind(schedule_id)
            .execute(&mut *tx)
            .await
            .map_err(storage)?;

        let updated = sqlx::query(
            "UPDATE schedules SET total_credits = 0, updated_at = NOW() WHERE id = $1",
        )
        .bind(schedule_id)
        .execute(&mut *tx)
        .await
        .map_err(storage)?;

        if updated.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Schedule {} not found",
                schedule_id
            )));
        }

        tx.commit().await.map_err(storage)?;
        Ok(())
    }
}
