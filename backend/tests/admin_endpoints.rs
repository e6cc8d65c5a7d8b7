//! Admin surface: catalog CRUD, user management, and analytics.

mod support;

use actix_web::http::StatusCode;
use serde_json::json;

use support::{delete, get, harness, post_json, put_json, register, send};

#[actix_web::test]
async fn non_admins_cannot_reach_the_admin_scope() {
    let harness = harness();
    let app = harness.app().await;

    let (token, _) = register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let (status, body) = send(&app, get("/api/admin/analytics", Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "admin access required");
}

#[actix_web::test]
async fn admins_manage_the_task_catalog() {
    let harness = harness();
    let app = harness.app().await;

    let (token, profile) = register(&app, "root@example.edu", "Root", "Hill College").await;
    let admin_id = serde_json::from_value(profile["id"].clone()).expect("user id");
    harness.backend.make_admin(&admin_id);

    let (status, created) = send(
        &app,
        post_json(
            "/api/admin/tasks",
            Some(&token),
            json!({
                "day": 3,
                "title": "Day 3: Tabling session",
                "description": "Run a table at the student union.",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {created}");
    assert_eq!(created["points_reward"], 50);
    assert_eq!(created["task_type"], "daily_task");
    assert_eq!(created["is_active"], true);

    let task_id = created["id"].clone();
    let (status, updated) = send(
        &app,
        put_json(
            &format!("/api/admin/tasks/{}", task_id.as_str().expect("task id")),
            Some(&token),
            json!({ "points_reward": 80, "is_active": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["points_reward"], 80);
    assert_eq!(updated["is_active"], false);

    let (status, listing) = send(&app, get("/api/admin/tasks", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().expect("task list").len(), 1);

    let (status, _) = send(
        &app,
        delete(
            &format!("/api/admin/tasks/{}", task_id.as_str().expect("task id")),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = send(&app, get("/api/admin/tasks", Some(&token))).await;
    assert!(listing.as_array().expect("task list").is_empty());
}

#[actix_web::test]
async fn suspending_a_user_locks_them_out() {
    let harness = harness();
    let app = harness.app().await;

    let (admin_token, admin_profile) =
        register(&app, "root@example.edu", "Root", "Hill College").await;
    let admin_id = serde_json::from_value(admin_profile["id"].clone()).expect("user id");
    harness.backend.make_admin(&admin_id);

    let (user_token, user_profile) =
        register(&app, "amber@example.edu", "Amber", "Hill College").await;
    let user_id = user_profile["id"].as_str().expect("user id").to_owned();

    let (status, summary) = send(
        &app,
        put_json(
            &format!("/api/admin/users/{user_id}/status"),
            Some(&admin_token),
            json!({ "status": "suspended" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["status"], "suspended");

    // The existing token stops working immediately.
    let (status, body) = send(&app, get("/api/profile", Some(&user_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "account is suspended");

    // So does a fresh login.
    let (status, _) = send(
        &app,
        post_json(
            "/api/login",
            None,
            json!({ "email": "amber@example.edu", "password": "a strong passphrase" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Reactivation restores access.
    let (status, _) = send(
        &app,
        put_json(
            &format!("/api/admin/users/{user_id}/status"),
            Some(&admin_token),
            json!({ "status": "active" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get("/api/profile", Some(&user_token))).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn analytics_reflect_registered_users_and_submissions() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (admin_token, admin_profile) =
        register(&app, "root@example.edu", "Root", "Hill College").await;
    let admin_id = serde_json::from_value(admin_profile["id"].clone()).expect("user id");
    harness.backend.make_admin(&admin_id);

    let (user_token, _) = register(&app, "amber@example.edu", "Amber", "Valley College").await;
    let (_, tasks) = send(&app, get("/api/tasks", Some(&user_token))).await;
    let task_id = tasks
        .as_array()
        .expect("task list")
        .iter()
        .find(|entry| entry["task"]["day"] == 1)
        .expect("day 1 task")["task"]["id"]
        .clone();
    let (status, _) = send(
        &app,
        post_json(
            "/api/submit-task",
            Some(&user_token),
            json!({ "task_id": task_id, "people_connected": 5 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, analytics) = send(&app, get("/api/admin/analytics", Some(&admin_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analytics["users"]["admins"], 1);
    assert_eq!(analytics["users"]["ambassadors"], 1);
    assert_eq!(analytics["users"]["active"], 2);
    assert_eq!(analytics["submissions"]["total"], 1);
    assert_eq!(analytics["submissions"]["last_day"], 1);
    // 55 base + 50 referral points keeps Amber in the "growing" bucket.
    assert_eq!(analytics["performance"]["growing"], 1);
    assert_eq!(
        analytics["colleges"][0],
        json!({ "college": "Valley College", "total_points": 105 })
    );
}

#[actix_web::test]
async fn admins_list_users_and_their_submissions() {
    let harness = harness();
    harness.seed_catalog().await;
    let app = harness.app().await;

    let (admin_token, admin_profile) =
        register(&app, "root@example.edu", "Root", "Hill College").await;
    let admin_id = serde_json::from_value(admin_profile["id"].clone()).expect("user id");
    harness.backend.make_admin(&admin_id);

    let (user_token, user_profile) =
        register(&app, "amber@example.edu", "Amber", "Valley College").await;
    let user_id = user_profile["id"].as_str().expect("user id").to_owned();

    let (_, tasks) = send(&app, get("/api/tasks", Some(&user_token))).await;
    let task_id = tasks
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
            Some(&user_token),
            json!({ "task_id": task_id }),
        ),
    )
    .await;

    let (status, users) = send(&app, get("/api/admin/users", Some(&admin_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().expect("user list").len(), 2);

    let (status, submissions) = send(
        &app,
        get(
            &format!("/api/admin/users/{user_id}/submissions"),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submissions.as_array().expect("submission list").len(), 1);

    let (status, body) = send(
        &app,
        get(
            &format!(
                "/api/admin/users/{}/submissions",
                uuid::Uuid::new_v4()
            ),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().expect("message").contains("user"));
}
