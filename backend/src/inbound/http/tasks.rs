//! Task catalog HTTP handlers.
//!
//! ```text
//! GET /api/tasks
//! GET /api/all-tasks
//! ```

use actix_web::{get, web};

use crate::domain::{EligibleTask, Error, Task};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Active catalog annotated with availability for the caller.
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Tasks with availability", body = [EligibleTask]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<EligibleTask>>> {
    let tasks = state.catalog.tasks_for_user(&user.0).await?;
    Ok(web::Json(tasks))
}

/// The full active catalog without availability annotations.
#[utoipa::path(
    get,
    path = "/api/all-tasks",
    responses(
        (status = 200, description = "Active tasks", body = [Task]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tasks"],
    operation_id = "listAllTasks"
)]
#[get("/all-tasks")]
pub async fn list_all_tasks(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Task>>> {
    let tasks = state.catalog.all_tasks().await?;
    Ok(web::Json(tasks))
}
