//! Submission HTTP handlers.
//!
//! ```text
//! POST /api/submit-task
//! POST /api/submit-task-with-files
//! GET  /api/my-submissions
//! GET  /api/submission/{task_id}
//! ```
//!
//! The multipart variant accepts the same fields as the JSON one plus any
//! number of `files` parts; uploads are spooled to temporary files by the
//! extractor and read back before being handed to the domain.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use actix_web::{get, post, web};
use uuid::Uuid;

use crate::domain::ports::{ProofUpload, SubmitTaskOutcome, SubmitTaskRequest};
use crate::domain::{Error, Submission, TaskId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart form mirroring [`SubmitTaskRequest`] plus proof files.
#[derive(Debug, MultipartForm)]
pub struct SubmitTaskForm {
    /// Task being submitted against, as a UUID string.
    pub task_id: Text<String>,
    /// Free-text status report.
    pub status_text: Option<Text<String>>,
    /// People connected during the activity.
    pub people_connected: Option<Text<i32>>,
    /// Proof artifacts accompanying the submission.
    #[multipart(limit = "10MiB")]
    pub files: Vec<TempFile>,
}

fn parse_task_id(value: &str) -> Result<TaskId, Error> {
    Uuid::parse_str(value)
        .map(TaskId::from_uuid)
        .map_err(|_| Error::invalid_request("task_id must be a UUID"))
}

fn read_upload(upload: &TempFile) -> Result<ProofUpload, Error> {
    if upload.size > MAX_UPLOAD_BYTES {
        return Err(Error::invalid_request("uploaded file exceeds 10 MiB"));
    }
    let bytes = std::fs::read(upload.file.path()).map_err(|err| {
        tracing::error!(error = %err, "failed to read spooled upload");
        Error::internal("failed to read uploaded file")
    })?;
    Ok(ProofUpload {
        bytes,
        filename: upload
            .file_name
            .clone()
            .unwrap_or_else(|| "upload".to_owned()),
        content_type: upload.content_type.as_ref().map(ToString::to_string),
    })
}

/// Submit a task report without proof files.
#[utoipa::path(
    post,
    path = "/api/submit-task",
    request_body = SubmitTaskRequest,
    responses(
        (status = 200, description = "Submission recorded", body = SubmitTaskOutcome),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Task not yet available", body = Error),
        (status = 404, description = "Task not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["submissions"],
    operation_id = "submitTask"
)]
#[post("/submit-task")]
pub async fn submit_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<SubmitTaskRequest>,
) -> ApiResult<web::Json<SubmitTaskOutcome>> {
    let outcome = state
        .submissions
        .submit(&user.0, payload.into_inner(), Vec::new())
        .await?;
    Ok(web::Json(outcome))
}

/// Submit a task report with one or more proof files.
#[utoipa::path(
    post,
    path = "/api/submit-task-with-files",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Submission recorded", body = SubmitTaskOutcome),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Task not yet available", body = Error),
        (status = 404, description = "Task not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["submissions"],
    operation_id = "submitTaskWithFiles"
)]
#[post("/submit-task-with-files")]
pub async fn submit_task_with_files(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    MultipartForm(form): MultipartForm<SubmitTaskForm>,
) -> ApiResult<web::Json<SubmitTaskOutcome>> {
    let request = SubmitTaskRequest {
        task_id: parse_task_id(&form.task_id)?,
        status_text: form.status_text.map(|text| text.0).unwrap_or_default(),
        people_connected: form.people_connected.map(|text| text.0).unwrap_or(0),
    };
    let files = form
        .files
        .iter()
        .map(read_upload)
        .collect::<Result<Vec<_>, _>>()?;

    let outcome = state.submissions.submit(&user.0, request, files).await?;
    Ok(web::Json(outcome))
}

/// The caller's submissions, day ascending.
#[utoipa::path(
    get,
    path = "/api/my-submissions",
    responses(
        (status = 200, description = "Submissions", body = [Submission]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["submissions"],
    operation_id = "mySubmissions"
)]
#[get("/my-submissions")]
pub async fn my_submissions(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Submission>>> {
    let submissions = state.submissions.my_submissions(&user.0).await?;
    Ok(web::Json(submissions))
}

/// The caller's submission for one task; `null` when none exists.
#[utoipa::path(
    get,
    path = "/api/submission/{task_id}",
    params(("task_id" = Uuid, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Submission or null", body = Option<Submission>),
        (status = 400, description = "Invalid task id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["submissions"],
    operation_id = "submissionForTask"
)]
#[get("/submission/{task_id}")]
pub async fn submission_for_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<Submission>>> {
    let task_id = parse_task_id(&path.into_inner())?;
    let submission = state
        .submissions
        .submission_for_task(&user.0, task_id)
        .await?;
    Ok(web::Json(submission))
}
