//! End-to-end support ticket workflow against a fully wired app.

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use backend::RequestLog;
use backend::inbound::http::tickets::{list_all, list_owned, reply_to_ticket, submit_ticket};
use backend::inbound::http::users::{login, register};
use backend::server::build_http_state;

fn workflow_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(build_http_state()))
        .wrap(RequestLog)
        .service(
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
    let request = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let response = test::call_service(app, request).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let value: Value = serde_json::from_slice(&bytes).expect("response is JSON");
    (status, value)
}

fn str_field<'a>(value: &'a Value, field: &str) -> &'a str {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("response field {field} present"))
}

#[actix_web::test]
async fn register_submit_reply_workflow() {
    let app = test::init_service(workflow_app()).await;

    // Register a fresh individual user.
    let (status, user) = post_json(
        &app,
        "/api/v1/register",
        &json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter2",
            "type": "individual",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password").is_none());
    let user_id = str_field(&user, "id").to_owned();

    // The new user submits a ticket.
    let (status, ticket) = post_json(
        &app,
        "/api/v1/tickets",
        &json!({
            "title": "No sound",
            "description": "Audio stopped working after the update.",
            "category": "technical",
            "userId": user_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(str_field(&ticket, "status"), "open");
    let ticket_id = str_field(&ticket, "id").to_owned();

    // The seeded admin logs in and sees the ticket in the full listing.
    let (status, admin) = post_json(
        &app,
        "/api/v1/login",
        &json!({ "email": "admin@gmail.com", "password": "qwerty" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let admin_id = str_field(&admin, "id").to_owned();

    let (status, all) = post_json(
        &app,
        "/api/v1/tickets/all",
        &json!({ "userId": admin_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed = all
        .as_array()
        .expect("array body")
        .iter()
        .find(|t| t.get("id").and_then(Value::as_str) == Some(ticket_id.as_str()))
        .expect("submitted ticket visible to admin");
    assert_eq!(str_field(listed, "status"), "open");

    // The admin replies, closing the ticket.
    let (status, closed) = post_json(
        &app,
        "/api/v1/tickets/reply",
        &json!({
            "problemId": ticket_id,
            "reply": "Reinstall the audio driver.",
            "userId": admin_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&closed, "status"), "closed");
    assert_eq!(str_field(&closed, "reply"), "Reinstall the audio driver.");
    assert_eq!(str_field(&closed, "replyUserId"), admin_id);

    // The owner sees the closed ticket with the reply attached.
    let (status, owned) = post_json(
        &app,
        "/api/v1/tickets/list",
        &json!({ "userId": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let owned = owned.as_array().expect("array body");
    assert_eq!(owned.len(), 1);
    let ticket = owned.first().expect("one ticket");
    assert_eq!(str_field(ticket, "status"), "closed");
    assert_eq!(str_field(ticket, "reply"), "Reinstall the audio driver.");
    assert!(ticket.get("replyCreatedAt").is_some());

    // A second reply to the same ticket fails and changes nothing.
    let (status, err) = post_json(
        &app,
        "/api/v1/tickets/reply",
        &json!({
            "problemId": ticket_id,
            "reply": "Second answer.",
            "userId": admin_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(str_field(&err, "code"), "conflict");

    let (_, owned) = post_json(
        &app,
        "/api/v1/tickets/list",
        &json!({ "userId": user_id }),
    )
    .await;
    let ticket = owned
        .as_array()
        .expect("array body")
        .first()
        .cloned()
        .expect("one ticket");
    assert_eq!(str_field(&ticket, "reply"), "Reinstall the audio driver.");
}

#[actix_web::test]
async fn non_admins_cannot_use_admin_operations() {
    let app = test::init_service(workflow_app()).await;

    let (_, user) = post_json(
        &app,
        "/api/v1/login",
        &json!({ "email": "business@gmail.com", "password": "1234567890" }),
    )
    .await;
    let user_id = str_field(&user, "id").to_owned();

    let (status, _) = post_json(
        &app,
        "/api/v1/tickets/all",
        &json!({ "userId": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = post_json(
        &app,
        "/api/v1/tickets/reply",
        &json!({
            "problemId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "reply": "Nope.",
            "userId": user_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn responses_carry_request_ids_on_errors() {
    let app = test::init_service(workflow_app()).await;

    let (status, err) = post_json(&app, "/api/v1/tickets/list", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err.get("requestId").and_then(Value::as_str).is_some());
}
