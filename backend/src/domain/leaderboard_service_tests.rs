//! Tests for the leaderboard service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use super::*;
use crate::domain::ports::{MockSubmissionLedger, MockTaskRepository, MockUserRepository};
use crate::domain::task::{Task, TaskId, TaskKind};
use crate::domain::user::{AccountStatus, EmailAddress, Role, UserId};

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0)
        .single()
        .expect("valid time")
}

fn ranked_user(name: &str, points: i32, referrals: i32) -> User {
    User {
        id: UserId::generate(),
        email: EmailAddress::new(format!("{name}@example.com")).expect("valid email"),
        password_hash: "digest".to_owned(),
        name: name.to_owned(),
        college: "Lovelace College".to_owned(),
        group_leader: String::new(),
        role: Role::Ambassador,
        current_day: 3,
        total_points: points,
        total_referrals: referrals,
        registered_at: fixed_now(),
        last_login_at: None,
        is_active: true,
        status: AccountStatus::Active,
    }
}

fn service(
    users: MockUserRepository,
    tasks: MockTaskRepository,
    ledger: MockSubmissionLedger,
) -> LeaderboardQueryImpl<MockUserRepository, MockTaskRepository, MockSubmissionLedger> {
    LeaderboardQueryImpl::new(Arc::new(users), Arc::new(tasks), Arc::new(ledger))
}

#[tokio::test]
async fn leaderboard_assigns_positional_ranks() {
    let mut users = MockUserRepository::new();
    users.expect_leaderboard().times(1).return_once(|limit| {
        assert_eq!(limit, 10);
        Ok(vec![
            ranked_user("ada", 200, 5),
            ranked_user("grace", 200, 3),
            ranked_user("edsger", 150, 1),
        ])
    });

    let entries = service(users, MockTaskRepository::new(), MockSubmissionLedger::new())
        .leaderboard(10)
        .await
        .expect("leaderboard succeeds");

    let ranks: Vec<(String, i64)> = entries
        .iter()
        .map(|entry| (entry.name.clone(), entry.rank))
        .collect();
    // Equal points still occupy distinct rows.
    assert_eq!(
        ranks,
        vec![
            ("ada".to_owned(), 1),
            ("grace".to_owned(), 2),
            ("edsger".to_owned(), 3),
        ]
    );
}

#[tokio::test]
async fn dashboard_reloads_user_and_reports_progress() {
    let stale = ranked_user("ada", 0, 0);
    let mut fresh = stale.clone();
    fresh.total_points = 180;
    fresh.total_referrals = 4;
    fresh.current_day = 3;

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(fresh)));
    users
        .expect_count_active_with_more_points()
        .times(1)
        .return_once(|points| {
            assert_eq!(points, 180);
            Ok(1)
        });

    let mut ledger = MockSubmissionLedger::new();
    ledger.expect_count_for_user().times(1).return_once(|_| Ok(2));

    let mut tasks = MockTaskRepository::new();
    tasks.expect_find_by_day().times(1).return_once(|day| {
        assert_eq!(day, 3);
        Ok(Some(Task {
            id: TaskId::generate(),
            day: 3,
            title: "Day 3: Create engaging content".to_owned(),
            description: "promote the brand".to_owned(),
            task_type: TaskKind::Daily,
            points_reward: 65,
            is_active: true,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }))
    });

    let stats = service(users, tasks, ledger)
        .dashboard_stats(&stale)
        .await
        .expect("dashboard succeeds");

    assert_eq!(stats.total_points, 180);
    assert_eq!(stats.rank_position, 2);
    assert_eq!(stats.total_tasks_completed, 2);
    // 2 of 4 unlocked tasks (days 0..=3) completed.
    assert!((stats.completion_percentage - 50.0).abs() < f64::EPSILON);
    assert_eq!(
        stats.next_task.as_deref(),
        Some("Day 3: Create engaging content")
    );
}

#[tokio::test]
async fn dashboard_handles_missing_next_task() {
    let user = ranked_user("ada", 0, 0);

    let mut users = MockUserRepository::new();
    let reloaded = user.clone();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(reloaded)));
    users
        .expect_count_active_with_more_points()
        .times(1)
        .return_once(|_| Ok(0));

    let mut ledger = MockSubmissionLedger::new();
    ledger.expect_count_for_user().times(1).return_once(|_| Ok(0));

    let mut tasks = MockTaskRepository::new();
    tasks.expect_find_by_day().times(1).return_once(|_| Ok(None));

    let stats = service(users, tasks, ledger)
        .dashboard_stats(&user)
        .await
        .expect("dashboard succeeds");

    assert!(stats.next_task.is_none());
    assert!(stats.completion_percentage.abs() < f64::EPSILON);
}

#[test]
fn completion_percentage_rounds_to_one_decimal() {
    // 1 of 3 unlocked tasks: 33.333… → 33.3.
    assert!((completion_percentage(1, 2) - 33.3).abs() < f64::EPSILON);
    // Never divides by zero.
    assert!(completion_percentage(0, -5).abs() < f64::EPSILON);
}
