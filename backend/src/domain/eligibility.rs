//! Task availability rules.
//!
//! Pure functions deciding which catalog entries a user may submit against.
//! The programme day is derived from the registration timestamp; the stored
//! `current_day` counter on the user record is a dashboard projection and is
//! never consulted here.
//!
//! Unlocking policy: a day-`d` task is available when `d == 0` (orientation
//! is always visible) or `d <= current_day + 1`. Days the user skipped stay
//! submittable, so ambassadors can catch up. Completed tasks always report
//! as completed, overriding the window.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::task::{Task, TaskId};

/// Availability of one catalog entry for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Submittable now.
    Available,
    /// Already has an authoritative submission.
    Completed,
    /// Not yet reachable.
    Locked,
}

/// A catalog entry annotated with its availability for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EligibleTask {
    /// The catalog entry.
    pub task: Task,
    /// Availability for the user in question.
    pub status: TaskStatus,
}

/// Programme day for a user registered at `registered_at`, observed at `now`.
///
/// Day counting starts at 1 on the registration day: `max(1, whole days
/// elapsed + 1)`. A clock observed before the registration instant clamps
/// to day 1 rather than going negative.
#[must_use]
pub fn current_day(registered_at: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
    let elapsed_days = (now - registered_at).num_days().max(0);
    let elapsed_days = i32::try_from(elapsed_days).unwrap_or(i32::MAX - 1);
    elapsed_days.saturating_add(1).max(1)
}

/// Classify a single task for a user on the given programme day.
#[must_use]
pub fn classify(task: &Task, day: i32, completed: &HashSet<TaskId>) -> TaskStatus {
    if completed.contains(&task.id) {
        TaskStatus::Completed
    } else if task.day == 0 || task.day <= day.saturating_add(1) {
        TaskStatus::Available
    } else {
        TaskStatus::Locked
    }
}

/// Annotate a catalog with per-task availability, sorted ascending by day.
///
/// Missing catalog data behaves as the empty set; this function never fails
/// for well-formed inputs.
#[must_use]
pub fn available_tasks(
    registered_at: DateTime<Utc>,
    now: DateTime<Utc>,
    catalog: Vec<Task>,
    completed: &HashSet<TaskId>,
) -> Vec<EligibleTask> {
    let day = current_day(registered_at, now);
    let mut annotated: Vec<EligibleTask> = catalog
        .into_iter()
        .map(|task| {
            let status = classify(&task, day, completed);
            EligibleTask { task, status }
        })
        .collect();
    annotated.sort_by_key(|entry| entry.task.day);
    annotated
}

/// Tasks the user may submit against right now.
///
/// Completed tasks remain submittable so resubmission can adjust an earlier
/// report; only locked tasks are rejected.
#[must_use]
pub fn is_submittable(task: &Task, registered_at: DateTime<Utc>, now: DateTime<Utc>, completed: &HashSet<TaskId>) -> bool {
    classify(task, current_day(registered_at, now), completed) != TaskStatus::Locked
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the unlocking policy.
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    use super::*;
    use crate::domain::task::TaskKind;

    fn task(day: i32) -> Task {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid time");
        Task {
            id: TaskId::generate(),
            day,
            title: format!("Day {day}"),
            description: "promote the brand".to_owned(),
            task_type: if day == 0 { TaskKind::Orientation } else { TaskKind::Daily },
            points_reward: 50,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn registration() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).single().expect("valid time")
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 2)]
    #[case(6, 7)]
    fn current_day_counts_from_one(#[case] elapsed_days: i64, #[case] expected: i32) {
        let registered = registration();
        let now = registered + Duration::days(elapsed_days);
        assert_eq!(current_day(registered, now), expected);
    }

    #[test]
    fn current_day_at_registration_instant_is_one() {
        let registered = registration();
        assert_eq!(current_day(registered, registered), 1);
    }

    #[test]
    fn clock_before_registration_clamps_to_day_one() {
        let registered = registration();
        let now = registered - Duration::days(3);
        assert_eq!(current_day(registered, now), 1);
    }

    #[test]
    fn day_zero_is_never_locked() {
        let orientation = task(0);
        for day in [1, 2, 50] {
            assert_eq!(
                classify(&orientation, day, &HashSet::new()),
                TaskStatus::Available
            );
        }
        let completed = HashSet::from([orientation.id]);
        assert_eq!(classify(&orientation, 9, &completed), TaskStatus::Completed);
    }

    #[rstest]
    #[case(1, 1, TaskStatus::Available)]
    #[case(2, 1, TaskStatus::Available)]
    #[case(3, 1, TaskStatus::Locked)]
    #[case(3, 2, TaskStatus::Available)]
    // Skipped days stay open under the catch-up rule.
    #[case(1, 5, TaskStatus::Available)]
    #[case(4, 5, TaskStatus::Available)]
    #[case(7, 5, TaskStatus::Locked)]
    fn window_follows_catch_up_rule(
        #[case] task_day: i32,
        #[case] programme_day: i32,
        #[case] expected: TaskStatus,
    ) {
        assert_eq!(
            classify(&task(task_day), programme_day, &HashSet::new()),
            expected
        );
    }

    #[test]
    fn completion_overrides_the_window() {
        let entry = task(9);
        let completed = HashSet::from([entry.id]);
        assert_eq!(classify(&entry, 1, &completed), TaskStatus::Completed);
    }

    #[test]
    fn fresh_registration_sees_days_zero_one_and_two() {
        let registered = registration();
        let catalog = vec![task(3), task(0), task(2), task(1)];
        let annotated = available_tasks(registered, registered, catalog, &HashSet::new());

        let statuses: Vec<(i32, TaskStatus)> = annotated
            .iter()
            .map(|entry| (entry.task.day, entry.status))
            .collect();
        assert_eq!(
            statuses,
            vec![
                (0, TaskStatus::Available),
                (1, TaskStatus::Available),
                (2, TaskStatus::Available),
                (3, TaskStatus::Locked),
            ]
        );
    }

    #[test]
    fn output_is_sorted_by_day() {
        let registered = registration();
        let catalog = vec![task(5), task(1), task(3)];
        let annotated = available_tasks(registered, registered, catalog, &HashSet::new());
        let days: Vec<i32> = annotated.iter().map(|entry| entry.task.day).collect();
        assert_eq!(days, vec![1, 3, 5]);
    }

    #[test]
    fn empty_catalog_yields_empty_output() {
        let registered = registration();
        assert!(available_tasks(registered, registered, Vec::new(), &HashSet::new()).is_empty());
    }

    #[test]
    fn completed_tasks_remain_submittable() {
        let registered = registration();
        let entry = task(1);
        let completed = HashSet::from([entry.id]);
        assert!(is_submittable(&entry, registered, registered, &completed));
        assert!(!is_submittable(&task(9), registered, registered, &HashSet::new()));
    }
}
