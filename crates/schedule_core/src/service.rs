//! crates/schedule_core/src/service.rs
//!
//! The schedule aggregate: composes validation, color assignment, credit
//! recomputation and conflict detection over the repository and catalog
//! ports. Mutations on one schedule are serialized against each other; pure
//! detection reads need no synchronization.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::conflict;
use crate::domain::{
    Conflict, Enrollment, NewEnrollment, Schedule, ScheduleView, TimeBlock, COLOR_PALETTE,
};
use crate::error::{ScheduleError, ValidationError};
use crate::ports::{CourseCatalog, PortError, ScheduleRepository};

/// Maximum length of a schedule display name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Semester codes are Spring (`PA`) or Fall-Winter (`OI`) plus a 4-digit
/// year, e.g. `PA2025`.
static SEMESTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(PA|OI)\d{4}$").expect("semester pattern is valid"));

/// The schedule aggregate service.
///
/// All mutating operations on a given schedule id are serialized through a
/// per-id async mutex: each one is a read-modify-write over the enrollment
/// set (credits, color slot, conflicts), and two interleaved additions would
/// race. Different schedules proceed fully in parallel.
pub struct ScheduleService {
    repository: Arc<dyn ScheduleRepository>,
    catalog: Arc<dyn CourseCatalog>,
    // Per-schedule mutation locks. Entries are tiny and schedules few per
    // process, so stale entries are never reaped.
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ScheduleService {
    pub fn new(repository: Arc<dyn ScheduleRepository>, catalog: Arc<dyn CourseCatalog>) -> Self {
        Self {
            repository,
            catalog,
            locks: Mutex::new(HashMap::new()),
        }
    }

    async fn mutation_lock(&self, schedule_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(schedule_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    //=====================================================================================
    // Schedule Lifecycle
    //=====================================================================================

    /// Creates a new, empty schedule for a user.
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        semester: Option<&str>,
    ) -> Result<Schedule, ScheduleError> {
        validate_name(name)?;
        if let Some(code) = semester {
            validate_semester(code)?;
        }

        let now = chrono::Utc::now();
        let schedule = Schedule {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            semester: semester.map(str::to_string),
            total_credits: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_schedule(&schedule).await?;
        info!(schedule_id = %schedule.id, owner_id = %owner_id, "created schedule");
        Ok(schedule)
    }

    /// All schedules owned by a user, newest first.
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Schedule>, ScheduleError> {
        Ok(self.repository.schedules_by_owner(owner_id).await?)
    }

    /// A schedule with its enrollments (blocks attached) and their current
    /// conflicts.
    pub async fn get(&self, schedule_id: Uuid) -> Result<ScheduleView, ScheduleError> {
        let schedule = self.repository.schedule_by_id(schedule_id).await?;
        let enrollments = self.load_enrollments(schedule_id).await?;
        let conflicts = conflict::detect_all(&enrollments);
        Ok(ScheduleView {
            schedule,
            enrollments,
            conflicts,
        })
    }

    /// Deletes a schedule, cascading to its enrollments. Deleting a schedule
    /// that no longer exists is a no-op success.
    pub async fn delete(&self, schedule_id: Uuid) -> Result<(), ScheduleError> {
        let lock = self.mutation_lock(schedule_id).await;
        let _guard = lock.lock().await;

        match self.repository.delete_schedule(schedule_id).await {
            Ok(()) => {
                info!(schedule_id = %schedule_id, "deleted schedule");
                Ok(())
            }
            Err(PortError::NotFound(_)) => {
                debug!(schedule_id = %schedule_id, "delete of absent schedule, no-op");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    //=====================================================================================
    // Enrollment Mutations
    //=====================================================================================

    /// Adds a course section to a schedule.
    ///
    /// Overlaps with existing enrollments are advisory: they are logged and
    /// reflected in the returned conflict list, but the section is committed
    /// regardless. Duplicate section codes are likewise not rejected here;
    /// callers pre-filter with [`contains_section`](Self::contains_section).
    ///
    /// Returns the committed enrollment and the *full* refreshed conflict
    /// list for the schedule, not just conflicts involving the new entry.
    pub async fn add_enrollment(
        &self,
        schedule_id: Uuid,
        candidate: NewEnrollment,
    ) -> Result<(Enrollment, Vec<Conflict>), ScheduleError> {
        let lock = self.mutation_lock(schedule_id).await;
        let _guard = lock.lock().await;

        // Existence check so a bad id surfaces as NotFound, not a storage
        // integrity error.
        self.repository.schedule_by_id(schedule_id).await?;

        let existing = self.load_enrollments(schedule_id).await?;
        let blocks = self
            .catalog
            .blocks_for_section(&candidate.section_code)
            .await?;

        // Positional palette slot: only the next appended entry's color is
        // deterministic, a remove in the middle shifts future slots.
        let color = COLOR_PALETTE[existing.len() % COLOR_PALETTE.len()].to_string();

        let enrollment = Enrollment {
            id: Uuid::new_v4(),
            schedule_id,
            subject_id: candidate.subject_id,
            instructor_id: candidate.instructor_id,
            section_code: candidate.section_code,
            subject_name: candidate.subject_name,
            instructor_name: candidate.instructor_name,
            credits: candidate.credits,
            color,
            blocks,
        };

        let advisory = conflict::check_candidate(&existing, &enrollment);
        if !advisory.is_empty() {
            warn!(
                schedule_id = %schedule_id,
                section_code = %enrollment.section_code,
                overlaps = advisory.len(),
                "candidate section overlaps existing enrollments, adding anyway"
            );
        }

        let new_total: u32 = existing.iter().map(|e| e.credits).sum::<u32>() + enrollment.credits;
        self.repository
            .insert_enrollment(&enrollment, new_total)
            .await?;
        info!(
            schedule_id = %schedule_id,
            enrollment_id = %enrollment.id,
            section_code = %enrollment.section_code,
            total_credits = new_total,
            "added enrollment"
        );

        let mut refreshed = existing;
        refreshed.push(enrollment.clone());
        Ok((enrollment, conflict::detect_all(&refreshed)))
    }

    /// Removes an enrollment and returns the refreshed full conflict list.
    ///
    /// Removing an enrollment that is already gone is a no-op success
    /// (idempotent delete), so UI undo/retry flows stay simple.
    pub async fn remove_enrollment(
        &self,
        schedule_id: Uuid,
        enrollment_id: Uuid,
    ) -> Result<Vec<Conflict>, ScheduleError> {
        let lock = self.mutation_lock(schedule_id).await;
        let _guard = lock.lock().await;

        let mut enrollments = self.load_enrollments(schedule_id).await?;
        let Some(index) = enrollments.iter().position(|e| e.id == enrollment_id) else {
            debug!(
                schedule_id = %schedule_id,
                enrollment_id = %enrollment_id,
                "remove of absent enrollment, no-op"
            );
            return Ok(conflict::detect_all(&enrollments));
        };

        enrollments.remove(index);
        let new_total: u32 = enrollments.iter().map(|e| e.credits).sum();
        match self
            .repository
            .delete_enrollment(schedule_id, enrollment_id, new_total)
            .await
        {
            // NotFound here means a concurrent delete won; the end state is
            // the one we wanted.
            Ok(()) | Err(PortError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }
        info!(
            schedule_id = %schedule_id,
            enrollment_id = %enrollment_id,
            total_credits = new_total,
            "removed enrollment"
        );

        Ok(conflict::detect_all(&enrollments))
    }

    /// Removes every enrollment from a schedule in one batched step; the end
    /// state is identical to removing them one at a time.
    pub async fn clear(&self, schedule_id: Uuid) -> Result<(), ScheduleError> {
        let lock = self.mutation_lock(schedule_id).await;
        let _guard = lock.lock().await;

        match self.repository.clear_enrollments(schedule_id).await {
            Ok(()) => {
                info!(schedule_id = %schedule_id, "cleared schedule");
                Ok(())
            }
            Err(PortError::NotFound(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    //=====================================================================================
    // Queries Used by Callers to Enforce Their Own Invariants
    //=====================================================================================

    /// Whether the schedule already contains a section code. The engine does
    /// not reject duplicate adds itself; presentation code uses this to
    /// pre-filter.
    pub async fn contains_section(
        &self,
        schedule_id: Uuid,
        section_code: &str,
    ) -> Result<bool, ScheduleError> {
        let enrollments = self.repository.enrollments_for_schedule(schedule_id).await?;
        Ok(enrollments.iter().any(|e| e.section_code == section_code))
    }

    /// Catalog passthrough for the grid preview.
    pub async fn section_blocks(&self, section_code: &str) -> Result<Vec<TimeBlock>, ScheduleError> {
        Ok(self.catalog.blocks_for_section(section_code).await?)
    }

    /// Reads the enrollment rows and attaches each one's weekly blocks from
    /// the catalog, keyed by section code.
    async fn load_enrollments(&self, schedule_id: Uuid) -> Result<Vec<Enrollment>, ScheduleError> {
        let mut enrollments = self.repository.enrollments_for_schedule(schedule_id).await?;
        for enrollment in &mut enrollments {
            enrollment.blocks = self
                .catalog
                .blocks_for_section(&enrollment.section_code)
                .await?;
        }
        Ok(enrollments)
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
    }
    Ok(())
}

fn validate_semester(code: &str) -> Result<(), ValidationError> {
    if SEMESTER_PATTERN.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::BadSemester(code.to_string()))
    }
}
