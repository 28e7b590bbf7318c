//! crates/schedule_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the engine's collaborators.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the specific persistence and catalog backends.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Enrollment, Schedule, TimeBlock};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Persistence for schedules and their enrollments.
///
/// Mutations that touch both an enrollment row and the schedule's cached
/// credit total take the new total as a parameter so the adapter can commit
/// both in one atomic step; per-call success or failure is reported, never
/// partial success.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    // --- Schedule Management ---
    async fn insert_schedule(&self, schedule: &Schedule) -> PortResult<()>;

    async fn schedule_by_id(&self, schedule_id: Uuid) -> PortResult<Schedule>;

    /// All schedules owned by a user, newest first.
    async fn schedules_by_owner(&self, owner_id: Uuid) -> PortResult<Vec<Schedule>>;

    /// Deletes a schedule, cascading to its enrollments.
    async fn delete_schedule(&self, schedule_id: Uuid) -> PortResult<()>;

    // --- Enrollment Management ---
    /// Enrollment rows in insertion order, without time blocks attached.
    async fn enrollments_for_schedule(&self, schedule_id: Uuid) -> PortResult<Vec<Enrollment>>;

    /// Inserts the enrollment and writes the schedule's new credit total in
    /// the same atomic step.
    async fn insert_enrollment(
        &self,
        enrollment: &Enrollment,
        new_total_credits: u32,
    ) -> PortResult<()>;

    /// Deletes the enrollment and writes the schedule's new credit total in
    /// the same atomic step.
    async fn delete_enrollment(
        &self,
        schedule_id: Uuid,
        enrollment_id: Uuid,
        new_total_credits: u32,
    ) -> PortResult<()>;

    /// Removes every enrollment from the schedule and resets the credit
    /// total to zero.
    async fn clear_enrollments(&self, schedule_id: Uuid) -> PortResult<()>;
}

/// Read-only lookup into the external course catalog.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// All weekly recurring meetings published for a section code, in the
    /// catalog's natural order. A section with no published blocks yields an
    /// empty list, not an error.
    async fn blocks_for_section(&self, section_code: &str) -> PortResult<Vec<TimeBlock>>;
}
