//! Admin HTTP handlers.
//!
//! ```text
//! GET    /api/admin/tasks
//! POST   /api/admin/tasks
//! PUT    /api/admin/tasks/{task_id}
//! DELETE /api/admin/tasks/{task_id}
//! GET    /api/admin/users
//! PUT    /api/admin/users/{user_id}/status
//! GET    /api/admin/users/{user_id}/submissions
//! GET    /api/admin/analytics
//! ```
//!
//! Every handler requires the [`AdminUser`] extractor; ambassadors receive
//! 403 before any state is touched.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    AdminUserSummary, CreateTaskRequest, ProgramAnalytics, UpdateTaskRequest,
};
use crate::domain::{AccountStatus, Error, Submission, Task, TaskId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AdminUser;
use crate::inbound::http::state::HttpState;

/// Payload for the account status transition endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target lifecycle status.
    pub status: AccountStatus,
}

fn parse_task_id(value: &str) -> Result<TaskId, Error> {
    Uuid::parse_str(value)
        .map(TaskId::from_uuid)
        .map_err(|_| Error::invalid_request("task_id must be a UUID"))
}

fn parse_user_id(value: &str) -> Result<UserId, Error> {
    UserId::parse(value).map_err(|_| Error::invalid_request("user_id must be a UUID"))
}

/// Full catalog, including inactive tasks.
#[utoipa::path(
    get,
    path = "/api/admin/tasks",
    responses(
        (status = 200, description = "All tasks", body = [Task]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<Task>>> {
    let tasks = state.catalog.admin_tasks().await?;
    Ok(web::Json(tasks))
}

/// Create a catalog task.
#[utoipa::path(
    post,
    path = "/api/admin/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Created task", body = Task),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminCreateTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<web::Json<Task>> {
    let task = state.catalog.create_task(payload.into_inner()).await?;
    Ok(web::Json(task))
}

/// Partially update a catalog task.
#[utoipa::path(
    put,
    path = "/api/admin/tasks/{task_id}",
    params(("task_id" = Uuid, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Task not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminUpdateTask"
)]
#[put("/tasks/{task_id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskRequest>,
) -> ApiResult<web::Json<Task>> {
    let task_id = parse_task_id(&path.into_inner())?;
    let task = state
        .catalog
        .update_task(task_id, payload.into_inner())
        .await?;
    Ok(web::Json(task))
}

/// Delete a catalog task.
#[utoipa::path(
    delete,
    path = "/api/admin/tasks/{task_id}",
    params(("task_id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 400, description = "Invalid task id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "Task not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminDeleteTask"
)]
#[delete("/tasks/{task_id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<serde_json::Value>> {
    let task_id = parse_task_id(&path.into_inner())?;
    state.catalog.delete_task(task_id).await?;
    Ok(web::Json(serde_json::json!({ "message": "Task deleted" })))
}

/// Every registered user, newest first.
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Users", body = [AdminUserSummary]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminListUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<Vec<AdminUserSummary>>> {
    let users = state.admin.list_users().await?;
    Ok(web::Json(users))
}

/// Transition a user's account status.
#[utoipa::path(
    put,
    path = "/api/admin/users/{user_id}/status",
    params(("user_id" = Uuid, Path, description = "User identifier")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated user", body = AdminUserSummary),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminSetUserStatus"
)]
#[put("/users/{user_id}/status")]
pub async fn set_user_status(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> ApiResult<web::Json<AdminUserSummary>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let summary = state.admin.set_user_status(user_id, payload.status).await?;
    Ok(web::Json(summary))
}

/// Submissions recorded for one user.
#[utoipa::path(
    get,
    path = "/api/admin/users/{user_id}/submissions",
    params(("user_id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Submissions", body = [Submission]),
        (status = 400, description = "Invalid user id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminUserSubmissions"
)]
#[get("/users/{user_id}/submissions")]
pub async fn user_submissions(
    state: web::Data<HttpState>,
    _admin: AdminUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Submission>>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let submissions = state.admin.user_submissions(user_id).await?;
    Ok(web::Json(submissions))
}

/// Programme-wide analytics snapshot.
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    responses(
        (status = 200, description = "Analytics", body = ProgramAnalytics),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminAnalytics"
)]
#[get("/analytics")]
pub async fn analytics(
    state: web::Data<HttpState>,
    _admin: AdminUser,
) -> ApiResult<web::Json<ProgramAnalytics>> {
    let analytics = state.admin.analytics().await?;
    Ok(web::Json(analytics))
}
