//! End-to-end engagement flows over the HTTP surface.
//!
//! Register, browse the catalog, submit tasks, and read the profile back,
//! with the real eligibility and scoring rules in the loop.

mod support;

use actix_web::http::StatusCode;
use serde_json::json;

use support::{get, harness, post_json, register, send};

#[actix_web::test]
async fn register_submit_and_read_profile_back() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (token, profile) = register(&app, "amber@example.edu", "Amber", "Hill College").await;
    assert_eq!(profile["total_points"], 0);
    assert_eq!(profile["rank_position"], 1);

    // Day 1 task is available on registration day.
    let (status, tasks) = send(&app, get("/api/tasks", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let day_one = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 1)
        .expect("day 1 task")
        .clone();
    assert_eq!(day_one["status"], "available");

    let (status, outcome) = send(
        &app,
        post_json(
            "/api/submit-task",
            Some(&token),
            json!({
                "task_id": day_one["task"]["id"],
                "status_text": "Spoke to my dorm floor",
                "people_connected": 3,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "submit failed: {outcome}");
    // 55 base for day 1 plus 3 referrals at 10 points each.
    assert_eq!(outcome["points_earned"], 85);

    let (status, profile) = send(&app, get("/api/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["total_points"], 85);
    assert_eq!(profile["total_referrals"], 3);
    assert_eq!(profile["rank_position"], 1);

    let (status, submissions) = send(&app, get("/api/my-submissions", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submissions.as_array().expect("submission list").len(), 1);
}

#[actix_web::test]
async fn duplicate_email_registration_conflicts() {
    let harness = harness();
    let app = harness.app().await;

    register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/register",
            None,
            json!({
                "email": "amber@example.edu",
                "password": "a strong passphrase",
                "name": "Impostor",
                "college": "Other College",
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "email already registered");
}

#[actix_web::test]
async fn locked_tasks_reject_submission_without_touching_totals() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (token, profile) = register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let user_id = serde_json::from_value(profile["id"].clone()).expect("user id");

    // A freshly registered user is on day 1; day 5 is beyond the catch-up
    // window.
    let (_, tasks) = send(&app, get("/api/tasks", Some(&token))).await;
    let day_five = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 5)
        .expect("day 5 task")
        .clone();
    assert_eq!(day_five["status"], "locked");

    let (status, body) = send(
        &app,
        post_json(
            "/api/submit-task",
            Some(&token),
            json!({ "task_id": day_five["task"]["id"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "task is not yet available");

    let stored = harness.backend.user(&user_id).expect("user exists");
    assert_eq!(stored.total_points, 0);
    assert_eq!(stored.total_referrals, 0);
}

#[actix_web::test]
async fn resubmission_replaces_totals_instead_of_stacking() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (token, profile) = register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let user_id = serde_json::from_value(profile["id"].clone()).expect("user id");

    let (_, tasks) = send(&app, get("/api/tasks", Some(&token))).await;
    let task_id = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 1)
        .expect("day 1 task")["task"]["id"]
        .clone();

    let submit = |people: i32| {
        post_json(
            "/api/submit-task",
            Some(&token),
            json!({ "task_id": task_id.clone(), "people_connected": people }),
        )
    };

    let (status, _) = send(&app, submit(10)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, outcome) = send(&app, submit(2)).await;
    assert_eq!(status, StatusCode::OK);
    // 55 base + 2 * 10.
    assert_eq!(outcome["points_earned"], 75);

    let stored = harness.backend.user(&user_id).expect("user exists");
    assert_eq!(stored.total_points, 75);
    assert_eq!(stored.total_referrals, 2);
}

#[actix_web::test]
async fn orientation_submission_is_always_accepted() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (token, _) = register(&app, "amber@example.edu", "Amber", "Hill College").await;

    let (_, tasks) = send(&app, get("/api/tasks", Some(&token))).await;
    let orientation = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 0)
        .expect("orientation task")
        .clone();
    assert_eq!(orientation["task"]["task_type"], "orientation");

    let (status, outcome) = send(
        &app,
        post_json(
            "/api/submit-task",
            Some(&token),
            json!({ "task_id": orientation["task"]["id"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["points_earned"], 100);
}

#[actix_web::test]
async fn login_returns_a_usable_token() {
    let harness = harness();
    let app = harness.app().await;

    register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/login",
            None,
            json!({ "email": "amber@example.edu", "password": "a strong passphrase" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token");

    let (status, _) = send(&app, get("/api/profile", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_is_rejected_without_detail() {
    let harness = harness();
    let app = harness.app().await;

    register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let (status, body) = send(
        &app,
        post_json(
            "/api/login",
            None,
            json!({ "email": "amber@example.edu", "password": "wrong password" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid email or password");
}

#[actix_web::test]
async fn requests_without_a_token_are_unauthorized() {
    let harness = harness();
    let app = harness.app().await;

    let (status, _) = send(&app, get("/api/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
