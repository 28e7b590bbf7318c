//! crates/schedule_core/src/domain.rs
//!
//! Defines the pure, core data structures for the schedule engine.
//! These structs are independent of any database or transport format.

use crate::day::DayLabel;
use crate::time::TimeOfDay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed display palette for enrollments, assigned positionally:
/// `COLOR_PALETTE[existing_count % 8]`. See `service` for the assignment
/// rule; the palette itself mirrors the product's.
pub const COLOR_PALETTE: [&str; 8] = [
    "#2b8cee", // primary blue
    "#10b981", // emerald
    "#8b5cf6", // violet
    "#f59e0b", // amber
    "#ef4444", // red
    "#ec4899", // pink
    "#06b6d4", // cyan
    "#84cc16", // lime
];

/// A named collection of enrollments owned by exactly one user.
///
/// `total_credits` is derived: it always equals the sum of `credits` over the
/// schedule's current enrollments and is recomputed on every add/remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    /// Free-form, or a `{PA|OI}YYYY` code when validated at creation.
    pub semester: Option<String>,
    pub total_credits: u32,
    /// At most one active schedule per user is a UI convention; the engine
    /// does not enforce it.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One weekly recurring meeting of a section.
///
/// Sourced read-only from the catalog; the engine only reads and compares
/// blocks. Times are same-day wall-clock values, no overnight blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub section_code: String,
    pub day: DayLabel,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub room: Option<String>,
    pub building: Option<String>,
}

/// One course section placed into exactly one schedule.
///
/// The section code is the catalog-unique key: two enrollments with the same
/// code are the same physical class, and the code (not the row id) is what
/// time blocks are fetched by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub subject_id: Uuid,
    pub instructor_id: Uuid,
    pub section_code: String,
    pub subject_name: String,
    pub instructor_name: String,
    pub credits: u32,
    /// Display color assigned by the store when the enrollment is added.
    pub color: String,
    /// Weekly meetings, attached from the catalog after the row is read.
    pub blocks: Vec<TimeBlock>,
}

/// Candidate data for adding a section to a schedule. The engine assigns the
/// id, color and blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub subject_id: Uuid,
    pub instructor_id: Uuid,
    pub section_code: String,
    pub subject_name: String,
    pub instructor_name: String,
    pub credits: u32,
}

/// A detected pairwise overlap between two enrollments.
///
/// The window is the *intersection* of the two blocks (later start, earlier
/// end), not either side's own window. Conflicts are ephemeral: computed on
/// demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub first: Enrollment,
    pub second: Enrollment,
    pub day: DayLabel,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// A schedule together with its enrollments and their current conflicts:
/// everything a presentation layer needs to render a grid and a conflict
/// banner without recomputing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleView {
    pub schedule: Schedule,
    pub enrollments: Vec<Enrollment>,
    pub conflicts: Vec<Conflict>,
}
