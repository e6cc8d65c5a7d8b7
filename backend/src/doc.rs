//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated OpenAPI specification for the REST
//! API. Handlers are registered here together with the bearer-token
//! security scheme; Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token issued by POST /api/register or POST /api/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Ambassador programme API",
        description = "HTTP interface for ambassador task tracking, scoring, \
                       and administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_profile,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::change_password,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::list_all_tasks,
        crate::inbound::http::submissions::submit_task,
        crate::inbound::http::submissions::submit_task_with_files,
        crate::inbound::http::submissions::my_submissions,
        crate::inbound::http::submissions::submission_for_task,
        crate::inbound::http::leaderboard::leaderboard,
        crate::inbound::http::leaderboard::dashboard_stats,
        crate::inbound::http::admin::list_tasks,
        crate::inbound::http::admin::create_task,
        crate::inbound::http::admin::update_task,
        crate::inbound::http::admin::delete_task,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::set_user_status,
        crate::inbound::http::admin::user_submissions,
        crate::inbound::http::admin::analytics,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Task,
        crate::domain::TaskKind,
        crate::domain::EligibleTask,
        crate::domain::TaskStatus,
        crate::domain::Submission,
        crate::domain::SubmissionFile,
        crate::domain::AccountStatus,
        crate::domain::Role,
    )),
    tags(
        (name = "accounts", description = "Registration, login, and profiles"),
        (name = "tasks", description = "Task catalog and availability"),
        (name = "submissions", description = "Task submissions and proof files"),
        (name = "leaderboard", description = "Rankings and dashboards"),
        (name = "admin", description = "Catalog management, users, analytics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
