//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API. It
//! registers every HTTP endpoint from the inbound layer plus the schema
//! mirrors from [`crate::inbound::http::schemas`]. The generated document is
//! served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorSchema, TicketSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Support desk API",
        description = "Sessionless HTTP interface for account registration, login, and the support ticket workflow."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::tickets::submit_ticket,
        crate::inbound::http::tickets::list_owned,
        crate::inbound::http::tickets::list_all,
        crate::inbound::http::tickets::reply_to_ticket,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, TicketSchema)),
    tags(
        (name = "accounts", description = "Registration and login"),
        (name = "tickets", description = "Support ticket workflow"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
