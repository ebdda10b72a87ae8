//! Support ticket API handlers.
//!
//! ```text
//! POST /api/v1/tickets        {"title":"...","description":"...","category":"technical","userId":"..."}
//! POST /api/v1/tickets/list   {"userId":"..."}
//! POST /api/v1/tickets/all    {"userId":"..."}
//! POST /api/v1/tickets/reply  {"problemId":"...","reply":"...","userId":"..."}
//! ```
//!
//! The API is sessionless: identity travels in the request body, which is why
//! the listing operations are bodied `POST`s rather than `GET`s.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::error;

use crate::domain::ports::{
    AdminListError, ReplyCommand, ReplyError, TicketListError, TicketSubmission,
    TicketSubmissionError,
};
use crate::domain::{Error, TicketCategory, TicketId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TicketSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field, unknown_user_error};

/// Submission request body for `POST /api/v1/tickets`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTicketRequest {
    /// Short summary.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// `technical`, `billing`, or `other`.
    pub category: Option<String>,
    /// Identifier of the submitting user.
    pub user_id: Option<String>,
}

/// Listing request body carrying only the caller identifier.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketListRequest {
    /// Identifier of the caller.
    pub user_id: Option<String>,
}

/// Reply request body for `POST /api/v1/tickets/reply`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    /// Identifier of the ticket being answered.
    pub problem_id: Option<String>,
    /// Reply text.
    pub reply: Option<String>,
    /// Identifier of the replying administrator.
    pub user_id: Option<String>,
}

/// Open a new support ticket.
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = SubmitTicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = TicketSchema),
        (status = 400, description = "Missing field, invalid category, or unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "submitTicket"
)]
#[post("/tickets")]
pub async fn submit_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitTicketRequest>,
) -> ApiResult<HttpResponse> {
    let SubmitTicketRequest {
        title,
        description,
        category,
        user_id,
    } = payload.into_inner();

    let title = require_field(title, FieldName::new("title"))?;
    let description = require_field(description, FieldName::new("description"))?;
    let category_token = require_field(category, FieldName::new("category"))?;
    let user_id = require_field(user_id, FieldName::new("userId"))?;
    let category = TicketCategory::from_token(&category_token)
        .ok_or_else(|| invalid_category_error(&category_token))?;
    // An identifier that is not a UUID can match no account; report it the
    // same way as a lookup miss.
    let owner = UserId::from_str(&user_id).map_err(|_| unknown_user_error())?;

    let submission = TicketSubmission::new(title, description, category, owner);
    let ticket = state
        .tickets
        .submit(submission)
        .await
        .map_err(map_submission_error)?;
    Ok(HttpResponse::Created().json(ticket))
}

/// List the caller's own tickets.
#[utoipa::path(
    post,
    path = "/api/v1/tickets/list",
    request_body = TicketListRequest,
    responses(
        (status = 200, description = "Tickets owned by the caller", body = [TicketSchema]),
        (status = 400, description = "Missing field or unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listOwnTickets"
)]
#[post("/tickets/list")]
pub async fn list_owned(
    state: web::Data<HttpState>,
    payload: web::Json<TicketListRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = require_field(payload.into_inner().user_id, FieldName::new("userId"))?;
    let owner = UserId::from_str(&user_id).map_err(|_| unknown_user_error())?;

    let tickets = state
        .tickets
        .list_for_owner(owner)
        .await
        .map_err(map_list_error)?;
    Ok(HttpResponse::Ok().json(tickets))
}

/// List every ticket; administrators only.
#[utoipa::path(
    post,
    path = "/api/v1/tickets/all",
    request_body = TicketListRequest,
    responses(
        (status = 200, description = "Every ticket", body = [TicketSchema]),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "listAllTickets"
)]
#[post("/tickets/all")]
pub async fn list_all(
    state: web::Data<HttpState>,
    payload: web::Json<TicketListRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = require_field(payload.into_inner().user_id, FieldName::new("userId"))?;
    // Unresolvable identifiers fall through the admin gate like any unknown
    // caller.
    let requester = UserId::from_str(&user_id).map_err(|_| admin_list_denied())?;

    let tickets = state
        .tickets
        .list_all(requester)
        .await
        .map_err(map_admin_list_error)?;
    Ok(HttpResponse::Ok().json(tickets))
}

/// Record an administrator reply, closing the ticket.
#[utoipa::path(
    post,
    path = "/api/v1/tickets/reply",
    request_body = ReplyRequest,
    responses(
        (status = 200, description = "Updated ticket", body = TicketSchema),
        (status = 400, description = "Missing field or ticket already closed", body = ErrorSchema),
        (status = 403, description = "Caller is not an administrator", body = ErrorSchema),
        (status = 404, description = "Unknown ticket", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tickets"],
    operation_id = "replyToTicket"
)]
#[post("/tickets/reply")]
pub async fn reply_to_ticket(
    state: web::Data<HttpState>,
    payload: web::Json<ReplyRequest>,
) -> ApiResult<HttpResponse> {
    let ReplyRequest {
        problem_id,
        reply,
        user_id,
    } = payload.into_inner();

    let problem_id = require_field(problem_id, FieldName::new("problemId"))?;
    let reply = require_field(reply, FieldName::new("reply"))?;
    let user_id = require_field(user_id, FieldName::new("userId"))?;
    let admin = UserId::from_str(&user_id).map_err(|_| reply_denied())?;
    // Defer unresolvable ticket identifiers to the service so the admin gate
    // is checked first.
    let ticket_id = TicketId::from_str(&problem_id).ok();

    let ticket = state
        .tickets
        .reply(ReplyCommand::new(ticket_id, reply, admin))
        .await
        .map_err(map_reply_error)?;
    Ok(HttpResponse::Ok().json(ticket))
}

fn invalid_category_error(value: &str) -> Error {
    Error::invalid_request("category must be 'technical', 'billing', or 'other'").with_details(
        json!({
            "field": "category",
            "value": value,
            "code": "invalid_category",
        }),
    )
}

fn admin_list_denied() -> Error {
    Error::forbidden("only administrators may view every ticket")
}

fn reply_denied() -> Error {
    Error::forbidden("only administrators may reply to tickets")
}

fn unknown_ticket_error() -> Error {
    Error::not_found("ticket not found").with_details(json!({
        "field": "problemId",
        "code": "unknown_ticket",
    }))
}

fn already_closed_error() -> Error {
    Error::conflict("this ticket is already closed").with_details(json!({
        "field": "problemId",
        "code": "ticket_closed",
    }))
}

fn map_submission_error(err: TicketSubmissionError) -> Error {
    match err {
        TicketSubmissionError::UnknownUser { .. } => unknown_user_error(),
        TicketSubmissionError::UserStore(err) => store_failure(&err),
        TicketSubmissionError::TicketStore(err) => store_failure(&err),
    }
}

fn map_list_error(err: TicketListError) -> Error {
    match err {
        TicketListError::UnknownUser { .. } => unknown_user_error(),
        TicketListError::UserStore(err) => store_failure(&err),
        TicketListError::TicketStore(err) => store_failure(&err),
    }
}

fn map_admin_list_error(err: AdminListError) -> Error {
    match err {
        AdminListError::NotAdmin => admin_list_denied(),
        AdminListError::UserStore(err) => store_failure(&err),
        AdminListError::TicketStore(err) => store_failure(&err),
    }
}

fn map_reply_error(err: ReplyError) -> Error {
    match err {
        ReplyError::NotAdmin => reply_denied(),
        ReplyError::UnknownTicket => unknown_ticket_error(),
        ReplyError::AlreadyClosed => already_closed_error(),
        ReplyError::UserStore(err) => store_failure(&err),
        ReplyError::TicketStore(err) => store_failure(&err),
    }
}

fn store_failure(err: &dyn std::error::Error) -> Error {
    error!(error = %err, "store failure");
    Error::internal("store failure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::users::{UserResponse, login, register};
    use crate::server::build_http_state;
    use actix_web::{App, http::StatusCode, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(build_http_state())).service(
            web::scope("/api/v1")
                .service(register)
                .service(login)
                .service(submit_ticket)
                .service(list_owned)
                .service(list_all)
                .service(reply_to_ticket),
        )
    }

    async fn post_json(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        body: &Value,
    ) -> (StatusCode, Value) {
        let request = actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request();
        let response = actix_test::call_service(app, request).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response is JSON");
        (status, value)
    }

    async fn login_id(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        email: &str,
        password: &str,
    ) -> String {
        let (status, value) = post_json(
            app,
            "/api/v1/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user: UserResponse = serde_json::from_value(value).expect("user response");
        user.id
    }

    async fn submit(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        user_id: &str,
    ) -> Value {
        let (status, value) = post_json(
            app,
            "/api/v1/tickets",
            &serde_json::json!({
                "title": "No sound",
                "description": "Audio broke.",
                "category": "technical",
                "userId": user_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        value
    }

    #[actix_web::test]
    async fn submitted_tickets_are_created_open() {
        let app = actix_test::init_service(test_app()).await;
        let user = login_id(&app, "user@gmail.com", "1234567890").await;

        let ticket = submit(&app, &user).await;
        assert_eq!(ticket.get("status").and_then(Value::as_str), Some("open"));
        assert_eq!(
            ticket.get("userId").and_then(Value::as_str),
            Some(user.as_str())
        );
        assert!(ticket.get("reply").is_none());
        assert!(ticket.get("createdAt").is_some());
    }

    #[rstest]
    #[case("urgent")]
    #[case("hisob")]
    #[actix_web::test]
    async fn submission_rejects_unknown_categories(#[case] category: &str) {
        let app = actix_test::init_service(test_app()).await;
        let user = login_id(&app, "user@gmail.com", "1234567890").await;

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets",
            &serde_json::json!({
                "title": "t",
                "description": "d",
                "category": category,
                "userId": user,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let details = value.get("details").expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_category")
        );
    }

    #[rstest]
    #[case("8f2b0c1e-9f50-4b2f-9a43-0d3f5a1c7e11")]
    #[case("not-a-uuid")]
    #[actix_web::test]
    async fn submission_rejects_unknown_users(#[case] user_id: &str) {
        let app = actix_test::init_service(test_app()).await;
        let (status, value) = post_json(
            &app,
            "/api/v1/tickets",
            &serde_json::json!({
                "title": "t",
                "description": "d",
                "category": "other",
                "userId": user_id,
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let details = value.get("details").expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("unknown_user")
        );
    }

    #[actix_web::test]
    async fn owners_see_only_their_tickets_in_order() {
        let app = actix_test::init_service(test_app()).await;
        let owner = login_id(&app, "user@gmail.com", "1234567890").await;
        let other = login_id(&app, "business@gmail.com", "1234567890").await;

        let first = submit(&app, &owner).await;
        submit(&app, &other).await;
        let second = submit(&app, &owner).await;

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets/list",
            &serde_json::json!({ "userId": owner }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let listed: Vec<&str> = value
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|t| t.get("id").and_then(Value::as_str))
            .collect();
        assert_eq!(
            listed,
            vec![
                first.get("id").and_then(Value::as_str).expect("id"),
                second.get("id").and_then(Value::as_str).expect("id"),
            ]
        );
    }

    #[actix_web::test]
    async fn listing_all_requires_an_admin() {
        let app = actix_test::init_service(test_app()).await;
        let customer = login_id(&app, "user@gmail.com", "1234567890").await;

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets/all",
            &serde_json::json!({ "userId": customer }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value.get("code").and_then(Value::as_str), Some("forbidden"));
    }

    #[actix_web::test]
    async fn admins_see_every_ticket() {
        let app = actix_test::init_service(test_app()).await;
        let owner = login_id(&app, "user@gmail.com", "1234567890").await;
        let admin = login_id(&app, "admin@gmail.com", "qwerty").await;
        let ticket = submit(&app, &owner).await;

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets/all",
            &serde_json::json!({ "userId": admin }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = value
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|t| t.get("id").and_then(Value::as_str))
            .collect();
        assert!(ids.contains(&ticket.get("id").and_then(Value::as_str).expect("id")));
    }

    #[actix_web::test]
    async fn reply_is_admin_only() {
        let app = actix_test::init_service(test_app()).await;
        let owner = login_id(&app, "user@gmail.com", "1234567890").await;
        let ticket = submit(&app, &owner).await;

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets/reply",
            &serde_json::json!({
                "problemId": ticket.get("id").and_then(Value::as_str).expect("id"),
                "reply": "Try again.",
                "userId": owner,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(value.get("code").and_then(Value::as_str), Some("forbidden"));
    }

    #[actix_web::test]
    async fn replying_to_an_unknown_ticket_is_not_found() {
        let app = actix_test::init_service(test_app()).await;
        let admin = login_id(&app, "admin@gmail.com", "qwerty").await;

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets/reply",
            &serde_json::json!({
                "problemId": "4dd0b0d3-3e91-4dbb-8a4e-c4129cf36c81",
                "reply": "Hello.",
                "userId": admin,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(value.get("code").and_then(Value::as_str), Some("not_found"));
    }

    #[actix_web::test]
    async fn malformed_ticket_ids_fail_the_admin_gate_first() {
        let app = actix_test::init_service(test_app()).await;
        let customer = login_id(&app, "user@gmail.com", "1234567890").await;

        // A non-admin with a malformed problemId gets the forbidden error,
        // not the not-found one.
        let (status, _) = post_json(
            &app,
            "/api/v1/tickets/reply",
            &serde_json::json!({
                "problemId": "not-a-uuid",
                "reply": "Hello.",
                "userId": customer,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn second_reply_is_rejected_without_overwriting_the_first() {
        let app = actix_test::init_service(test_app()).await;
        let owner = login_id(&app, "user@gmail.com", "1234567890").await;
        let admin = login_id(&app, "admin@gmail.com", "qwerty").await;
        let ticket = submit(&app, &owner).await;
        let ticket_id = ticket.get("id").and_then(Value::as_str).expect("id");

        let (status, closed) = post_json(
            &app,
            "/api/v1/tickets/reply",
            &serde_json::json!({
                "problemId": ticket_id,
                "reply": "Restart the device.",
                "userId": admin,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(closed.get("status").and_then(Value::as_str), Some("closed"));
        assert_eq!(
            closed.get("reply").and_then(Value::as_str),
            Some("Restart the device.")
        );
        assert_eq!(
            closed.get("replyUserId").and_then(Value::as_str),
            Some(admin.as_str())
        );

        let (status, value) = post_json(
            &app,
            "/api/v1/tickets/reply",
            &serde_json::json!({
                "problemId": ticket_id,
                "reply": "Second answer.",
                "userId": admin,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(value.get("code").and_then(Value::as_str), Some("conflict"));

        // The owner still sees the first reply.
        let (_, listed) = post_json(
            &app,
            "/api/v1/tickets/list",
            &serde_json::json!({ "userId": owner }),
        )
        .await;
        let stored = listed
            .as_array()
            .expect("array body")
            .iter()
            .find(|t| t.get("id").and_then(Value::as_str) == Some(ticket_id))
            .expect("ticket listed");
        assert_eq!(
            stored.get("reply").and_then(Value::as_str),
            Some("Restart the device.")
        );
    }
}
