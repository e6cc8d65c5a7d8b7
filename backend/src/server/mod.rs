//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::Trace;
use crate::domain::ports::SystemClock;
use crate::domain::{
    AccountServiceImpl, AdminServiceImpl, LeaderboardQueryImpl, SubmissionServiceImpl,
    TaskCatalogServiceImpl,
};
use crate::inbound::http::admin;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::leaderboard::{dashboard_stats, leaderboard};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::submissions::{
    my_submissions, submission_for_task, submit_task, submit_task_with_files,
};
use crate::inbound::http::tasks::{list_all_tasks, list_tasks};
use crate::inbound::http::users::{change_password, get_profile, login, register, update_profile};
use crate::outbound::auth::{JwtTokenCodec, Sha256PasswordHasher};
use crate::outbound::persistence::{
    DbPool, DieselReportingRepository, DieselSubmissionLedger, DieselTaskRepository,
    DieselUserRepository,
};
use crate::outbound::storage::LocalFileStore;

/// Build the HTTP handler state from database-backed adapters.
pub fn build_http_state(
    pool: DbPool,
    jwt_secret: &[u8],
    upload_dir: impl Into<std::path::PathBuf>,
) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let tasks = Arc::new(DieselTaskRepository::new(pool.clone()));
    let ledger = Arc::new(DieselSubmissionLedger::new(pool.clone()));
    let reporting = Arc::new(DieselReportingRepository::new(pool));
    let hasher = Arc::new(Sha256PasswordHasher::new());
    let tokens = Arc::new(JwtTokenCodec::new(jwt_secret));
    let files = Arc::new(LocalFileStore::new(upload_dir));
    let clock = Arc::new(SystemClock);

    HttpState {
        accounts: Arc::new(AccountServiceImpl::new(
            users.clone(),
            hasher,
            tokens,
            clock.clone(),
        )),
        catalog: Arc::new(TaskCatalogServiceImpl::new(
            tasks.clone(),
            ledger.clone(),
            clock.clone(),
        )),
        submissions: Arc::new(SubmissionServiceImpl::new(
            tasks.clone(),
            ledger.clone(),
            files,
            clock.clone(),
        )),
        leaderboard: Arc::new(LeaderboardQueryImpl::new(
            users.clone(),
            tasks,
            ledger.clone(),
        )),
        admin: Arc::new(AdminServiceImpl::new(users, ledger, reporting, clock)),
    }
}

/// Assemble the Actix application: trace middleware, the `/api` scope with
/// its nested `/api/admin` scope, and the health probes.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let admin_scope = web::scope("/admin")
        .service(admin::list_tasks)
        .service(admin::create_task)
        .service(admin::update_task)
        .service(admin::delete_task)
        .service(admin::list_users)
        .service(admin::set_user_status)
        .service(admin::user_submissions)
        .service(admin::analytics);

    let api = web::scope("/api")
        .service(register)
        .service(login)
        .service(get_profile)
        .service(update_profile)
        .service(change_password)
        .service(list_tasks)
        .service(list_all_tasks)
        .service(submit_task)
        .service(submit_task_with_files)
        .service(my_submissions)
        .service(submission_for_task)
        .service(leaderboard)
        .service(dashboard_stats)
        .service(admin_scope);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server bound to the configured address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    bind_addr: std::net::SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
