//! Tests for the admin service.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    CollegePoints, FixedClock, MockReportingRepository, MockSubmissionLedger, MockUserRepository,
    SubmissionCounts, UserCounts,
};
use crate::domain::user::{EmailAddress, Role};

fn fixed_clock() -> FixedClock {
    FixedClock(
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0)
            .single()
            .expect("valid time"),
    )
}

fn registered_user(name: &str, days_ago: i64) -> User {
    User {
        id: UserId::generate(),
        email: EmailAddress::new(format!("{name}@example.com")).expect("valid email"),
        password_hash: "digest".to_owned(),
        name: name.to_owned(),
        college: "Lovelace College".to_owned(),
        group_leader: String::new(),
        role: Role::Ambassador,
        current_day: 1,
        total_points: 0,
        total_referrals: 0,
        registered_at: fixed_clock().0 - Duration::days(days_ago),
        last_login_at: None,
        is_active: true,
        status: AccountStatus::Active,
    }
}

fn service(
    users: MockUserRepository,
    ledger: MockSubmissionLedger,
    reporting: MockReportingRepository,
) -> AdminServiceImpl<MockUserRepository, MockSubmissionLedger, MockReportingRepository, FixedClock>
{
    AdminServiceImpl::new(
        Arc::new(users),
        Arc::new(ledger),
        Arc::new(reporting),
        Arc::new(fixed_clock()),
    )
}

#[tokio::test]
async fn analytics_assembles_reporting_projections() {
    let expected_now = fixed_clock().0;

    let mut reporting = MockReportingRepository::new();
    reporting.expect_user_counts().times(1).return_once(|| {
        Ok(UserCounts {
            ambassadors: 12,
            admins: 1,
            active: 10,
            inactive: 2,
            suspended: 1,
        })
    });
    reporting
        .expect_submission_counts()
        .times(1)
        .return_once(move |now| {
            assert_eq!(now, expected_now);
            Ok(SubmissionCounts {
                total: 40,
                last_day: 4,
                last_week: 18,
            })
        });
    reporting.expect_college_points().times(1).return_once(|| {
        Ok(vec![CollegePoints {
            college: "Lovelace College".to_owned(),
            total_points: 900,
        }])
    });
    reporting
        .expect_active_point_totals()
        .times(1)
        .return_once(|| Ok(vec![0, 99, 100, 499, 500, 1200]));

    let analytics = service(
        MockUserRepository::new(),
        MockSubmissionLedger::new(),
        reporting,
    )
    .analytics()
    .await
    .expect("analytics succeeds");

    assert_eq!(analytics.users.ambassadors, 12);
    assert_eq!(analytics.submissions.last_week, 18);
    assert_eq!(analytics.colleges.len(), 1);
    assert_eq!(analytics.performance.starting, 2);
    assert_eq!(analytics.performance.growing, 2);
    assert_eq!(analytics.performance.leading, 2);
}

#[tokio::test]
async fn list_users_orders_newest_first() {
    let mut users = MockUserRepository::new();
    users.expect_list_all().times(1).return_once(|| {
        Ok(vec![
            registered_user("oldest", 30),
            registered_user("newest", 1),
            registered_user("middle", 10),
        ])
    });

    let listed = service(users, MockSubmissionLedger::new(), MockReportingRepository::new())
        .list_users()
        .await
        .expect("listing succeeds");

    let names: Vec<&str> = listed.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn empty_group_leader_is_reported_as_absent() {
    let mut with_leader = registered_user("ada", 1);
    with_leader.group_leader = "Grace".to_owned();

    let mut users = MockUserRepository::new();
    users
        .expect_list_all()
        .times(1)
        .return_once(move || Ok(vec![with_leader, registered_user("solo", 2)]));

    let listed = service(users, MockSubmissionLedger::new(), MockReportingRepository::new())
        .list_users()
        .await
        .expect("listing succeeds");

    assert_eq!(listed[0].group_leader.as_deref(), Some("Grace"));
    assert!(listed[1].group_leader.is_none());
}

#[tokio::test]
async fn set_user_status_returns_updated_summary() {
    let mut users = MockUserRepository::new();
    users
        .expect_set_status()
        .times(1)
        .return_once(|id, status| {
            assert_eq!(status, AccountStatus::Suspended);
            let mut user = registered_user("ada", 1);
            user.id = *id;
            user.status = status;
            user.is_active = false;
            Ok(user)
        });

    let summary = service(users, MockSubmissionLedger::new(), MockReportingRepository::new())
        .set_user_status(UserId::generate(), AccountStatus::Suspended)
        .await
        .expect("status change succeeds");

    assert_eq!(summary.status, AccountStatus::Suspended);
}

#[tokio::test]
async fn user_submissions_requires_existing_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let mut ledger = MockSubmissionLedger::new();
    ledger.expect_list_for_user().times(0);

    let error = service(users, ledger, MockReportingRepository::new())
        .user_submissions(UserId::generate())
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
