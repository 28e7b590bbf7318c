//! crates/schedule_core/src/conflict.rs
//!
//! Pure conflict detection over a set of enrollments. No I/O, no mutation,
//! never errors: an enrollment with an empty block list simply cannot
//! conflict with anything. Safe to call repeatedly and from presentation
//! code.
//!
//! Schedules are small (around eight enrollments with a few blocks each), so
//! both entry points are plain nested loops. Iteration is insertion order for
//! enrollments and natural order for blocks, which keeps the output order
//! stable across repeated calls on unchanged input.

use crate::domain::{Conflict, Enrollment};
use crate::time;

/// Checks a candidate enrollment against the existing set before it is
/// committed.
///
/// The result is advisory only: the caller may (and the aggregate does) add
/// the section anyway. Existing entries with the candidate's own section code
/// are skipped, since the same physical class never conflicts with itself.
pub fn check_candidate(existing: &[Enrollment], candidate: &Enrollment) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for enrollment in existing {
        if enrollment.section_code == candidate.section_code {
            continue;
        }
        push_pair_conflicts(enrollment, candidate, &mut conflicts);
    }
    conflicts
}

/// Finds every pairwise day/time overlap in a schedule's enrollment set.
///
/// Each unordered pair of distinct enrollments is considered exactly once, in
/// insertion order. Pairs sharing a section code are skipped, so a duplicated
/// section never reports a conflict against itself.
pub fn detect_all(enrollments: &[Enrollment]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (i, first) in enrollments.iter().enumerate() {
        for second in &enrollments[i + 1..] {
            if first.section_code == second.section_code {
                continue;
            }
            push_pair_conflicts(first, second, &mut conflicts);
        }
    }
    conflicts
}

/// Emits one conflict per overlapping same-day block pair, carrying the
/// intersection window (later start, earlier end).
fn push_pair_conflicts(first: &Enrollment, second: &Enrollment, out: &mut Vec<Conflict>) {
    for block1 in &first.blocks {
        for block2 in &second.blocks {
            if block1.day != block2.day {
                continue;
            }
            if let Some((start, end)) =
                time::intersection(block1.start, block1.end, block2.start, block2.end)
            {
                out.push(Conflict {
                    first: first.clone(),
                    second: second.clone(),
                    day: block1.day.clone(),
                    start,
                    end,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::{self, Weekday};
    use crate::domain::TimeBlock;
    use uuid::Uuid;

    fn block(section: &str, day: &str, start: &str, end: &str) -> TimeBlock {
        TimeBlock {
            section_code: section.to_string(),
            day: day::normalize(day),
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            room: None,
            building: None,
        }
    }

    fn enrollment(section: &str, blocks: Vec<TimeBlock>) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            schedule_id: Uuid::nil(),
            subject_id: Uuid::new_v4(),
            instructor_id: Uuid::new_v4(),
            section_code: section.to_string(),
            subject_name: format!("Subject {section}"),
            instructor_name: "N. Docente".to_string(),
            credits: 6,
            color: "#2b8cee".to_string(),
            blocks,
        }
    }

    #[test]
    fn overlapping_blocks_yield_the_intersection_window() {
        let a = enrollment("1001", vec![block("1001", "lunes", "07:00", "09:00")]);
        let b = enrollment("1002", vec![block("1002", "lunes", "08:00", "10:00")]);

        let conflicts = detect_all(&[a.clone(), b.clone()]);
        assert_eq!(conflicts.len(), 1);
        let c = &conflicts[0];
        assert_eq!(c.first.id, a.id);
        assert_eq!(c.second.id, b.id);
        assert_eq!(c.day, Weekday::Lunes.into());
        assert_eq!(c.start, "08:00".parse().unwrap());
        assert_eq!(c.end, "09:00".parse().unwrap());
    }

    #[test]
    fn touching_blocks_do_not_conflict() {
        let a = enrollment("1001", vec![block("1001", "lunes", "07:00", "09:00")]);
        let b = enrollment("1002", vec![block("1002", "lunes", "09:00", "10:00")]);
        assert!(detect_all(&[a, b]).is_empty());
    }

    #[test]
    fn same_times_on_different_days_do_not_conflict() {
        let a = enrollment("1001", vec![block("1001", "lunes", "07:00", "09:00")]);
        let b = enrollment("1002", vec![block("1002", "martes", "07:00", "09:00")]);
        assert!(detect_all(&[a, b]).is_empty());
    }

    #[test]
    fn a_single_enrollment_never_conflicts_with_itself() {
        let a = enrollment(
            "1001",
            vec![
                block("1001", "lunes", "07:00", "09:00"),
                block("1001", "lunes", "10:00", "12:00"),
                block("1001", "miercoles", "07:00", "09:00"),
            ],
        );
        assert!(detect_all(&[a]).is_empty());
    }

    #[test]
    fn duplicated_section_codes_are_not_self_conflicts() {
        let blocks = vec![block("1001", "lunes", "07:00", "09:00")];
        let a = enrollment("1001", blocks.clone());
        let b = enrollment("1001", blocks);
        assert!(detect_all(&[a, b]).is_empty());
    }

    #[test]
    fn every_unordered_pair_is_considered_once() {
        // Three mutually overlapping sections on the same morning.
        let a = enrollment("1001", vec![block("1001", "jueves", "07:00", "10:00")]);
        let b = enrollment("1002", vec![block("1002", "jueves", "08:00", "11:00")]);
        let c = enrollment("1003", vec![block("1003", "jueves", "09:00", "12:00")]);

        let conflicts = detect_all(&[a.clone(), b.clone(), c.clone()]);
        let pairs: Vec<(String, String)> = conflicts
            .iter()
            .map(|c| (c.first.section_code.clone(), c.second.section_code.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("1001".to_string(), "1002".to_string()),
                ("1001".to_string(), "1003".to_string()),
                ("1002".to_string(), "1003".to_string()),
            ]
        );
    }

    #[test]
    fn multi_block_pairs_emit_one_conflict_per_overlap() {
        let a = enrollment(
            "1001",
            vec![
                block("1001", "lunes", "07:00", "09:00"),
                block("1001", "miercoles", "07:00", "09:00"),
            ],
        );
        let b = enrollment(
            "1002",
            vec![
                block("1002", "lunes", "08:00", "10:00"),
                block("1002", "miercoles", "08:00", "10:00"),
                block("1002", "viernes", "08:00", "10:00"),
            ],
        );
        let conflicts = detect_all(&[a, b]);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].day, Weekday::Lunes.into());
        assert_eq!(conflicts[1].day, Weekday::Miercoles.into());
    }

    #[test]
    fn detection_is_idempotent_and_order_stable() {
        let set = vec![
            enrollment("1001", vec![block("1001", "lunes", "07:00", "10:00")]),
            enrollment("1002", vec![block("1002", "lunes", "08:00", "11:00")]),
            enrollment("1003", vec![block("1003", "lunes", "09:00", "12:00")]),
        ];
        let first = detect_all(&set);
        let second = detect_all(&set);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_block_lists_yield_zero_conflicts() {
        let a = enrollment("1001", vec![]);
        let b = enrollment("1002", vec![block("1002", "lunes", "07:00", "09:00")]);
        assert!(detect_all(&[a, b]).is_empty());
    }

    #[test]
    fn check_candidate_matches_post_insert_detection() {
        let existing = vec![
            enrollment("1001", vec![block("1001", "lunes", "07:00", "09:00")]),
            enrollment("1002", vec![block("1002", "martes", "07:00", "09:00")]),
        ];
        let candidate = enrollment("1003", vec![block("1003", "lunes", "08:00", "10:00")]);

        let pre = check_candidate(&existing, &candidate);

        let mut all = existing;
        all.push(candidate.clone());
        let post: Vec<Conflict> = detect_all(&all)
            .into_iter()
            .filter(|c| c.first.id == candidate.id || c.second.id == candidate.id)
            .collect();

        assert_eq!(pre, post);
        assert_eq!(pre.len(), 1);
    }

    #[test]
    fn check_candidate_skips_the_same_section() {
        let existing = vec![enrollment(
            "1001",
            vec![block("1001", "lunes", "07:00", "09:00")],
        )];
        let duplicate = enrollment("1001", vec![block("1001", "lunes", "07:00", "09:00")]);
        assert!(check_candidate(&existing, &duplicate).is_empty());
    }
}
