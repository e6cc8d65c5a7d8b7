//! Leaderboard and dashboard reads over the HTTP surface.

mod support;

use actix_web::http::StatusCode;
use serde_json::json;

use support::{get, harness, post_json, register, send};

async fn submit_day_one<S, B>(app: &S, token: &str, people: i32)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = actix_web::Error,
        >,
    B: actix_web::body::MessageBody,
{
    let (_, tasks) = send(app, get("/api/tasks", Some(token))).await;
    let task_id = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 1)
        .expect("day 1 task")["task"]["id"]
        .clone();
    let (status, _) = send(
        app,
        post_json(
            "/api/submit-task",
            Some(token),
            json!({ "task_id": task_id, "people_connected": people }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn leaderboard_orders_by_points_then_referrals() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (first, _) = register(&app, "first@example.edu", "First", "Hill College").await;
    let (second, _) = register(&app, "second@example.edu", "Second", "Valley College").await;
    let (third, _) = register(&app, "third@example.edu", "Third", "Hill College").await;

    submit_day_one(&app, &first, 5).await; // 105 points
    submit_day_one(&app, &second, 1).await; // 65 points
    submit_day_one(&app, &third, 3).await; // 85 points

    let (status, board) = send(&app, get("/api/leaderboard", Some(&first))).await;
    assert_eq!(status, StatusCode::OK);

    let entries = board.as_array().expect("leaderboard");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["name"], "First");
    assert_eq!(entries[0]["total_points"], 105);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[1]["name"], "Third");
    assert_eq!(entries[1]["rank"], 2);
    assert_eq!(entries[2]["name"], "Second");
    assert_eq!(entries[2]["rank"], 3);
}

#[actix_web::test]
async fn leaderboard_limit_is_honoured() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (first, _) = register(&app, "first@example.edu", "First", "Hill College").await;
    register(&app, "second@example.edu", "Second", "Valley College").await;

    let (status, board) = send(&app, get("/api/leaderboard?limit=1", Some(&first))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board.as_array().expect("leaderboard").len(), 1);
}

#[actix_web::test]
async fn dashboard_reports_progress_and_next_task() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (token, _) = register(&app, "amber@example.edu", "Amber", "Hill College").await;

    // Completing orientation (day 0) advances the stored day counter to 1.
    let (_, tasks) = send(&app, get("/api/tasks", Some(&token))).await;
    let orientation_id = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 0)
        .expect("orientation")["task"]["id"]
        .clone();
    send(
        &app,
        post_json(
            "/api/submit-task",
            Some(&token),
            json!({ "task_id": orientation_id }),
        ),
    )
    .await;

    let (status, stats) = send(&app, get("/api/dashboard-stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["current_day"], 1);
    assert_eq!(stats["total_tasks_completed"], 1);
    assert_eq!(stats["total_points"], 100);
    assert_eq!(stats["total_referrals"], 0);
    assert_eq!(stats["rank_position"], 1);
    // One of two unlocked tasks completed.
    assert_eq!(stats["completion_percentage"], 50.0);
    assert_eq!(stats["next_task"], "Day 1: Share brand story on social media");
    assert_eq!(stats["user_name"], "Amber");
    assert_eq!(stats["college"], "Hill College");
}
