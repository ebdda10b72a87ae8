//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"name":"Ada","email":"ada@example.com","password":"pw","type":"individual"}
//! POST /api/v1/login {"email":"ada@example.com","password":"pw"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::domain::ports::{LoginError, Registration, RegistrationError};
use crate::domain::{Credentials, CredentialsValidationError, CustomerRole, Email, Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, require_field};

/// Registration request body for `POST /api/v1/register`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    pub name: Option<String>,
    /// Login email; must not already be registered.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// `individual` or `business`.
    #[serde(rename = "type")]
    pub account_type: Option<String>,
}

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Login email.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Account as returned to clients; the password is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserResponse {
    /// Account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role token.
    #[serde(rename = "type")]
    pub account_type: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_owned(),
            email: user.email().to_string(),
            account_type: user.role().as_token().to_owned(),
        }
    }
}

/// Create a new customer account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Missing field, invalid type, or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
        account_type,
    } = payload.into_inner();

    let name = require_field(name, FieldName::new("name"))?;
    let email = require_field(email, FieldName::new("email"))?;
    let password = require_field(password, FieldName::new("password"))?;
    let role_token = require_field(account_type, FieldName::new("type"))?;
    let role =
        CustomerRole::from_token(&role_token).ok_or_else(|| invalid_role_error(&role_token))?;

    let registration = Registration::new(name, Email::new(email), password, role);
    let user = state
        .accounts
        .register(registration)
        .await
        .map_err(map_registration_error)?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Look up the account matching the supplied credentials.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials match", body = UserResponse),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "No matching account", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials =
        Credentials::try_from_parts(email.as_deref().unwrap_or(""), password.as_deref().unwrap_or(""))
            .map_err(map_credentials_error)?;

    let user = state
        .accounts
        .login(credentials)
        .await
        .map_err(map_login_error)?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

fn invalid_role_error(value: &str) -> Error {
    Error::invalid_request("type must be either 'individual' or 'business'").with_details(json!({
        "field": "type",
        "value": value,
        "code": "invalid_account_type",
    }))
}

fn map_credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => missing_field_error(FieldName::new("email")),
        CredentialsValidationError::EmptyPassword => {
            missing_field_error(FieldName::new("password"))
        }
    }
}

fn map_registration_error(err: RegistrationError) -> Error {
    match err {
        RegistrationError::DuplicateEmail { .. } => {
            Error::conflict("this email is already registered").with_details(json!({
                "field": "email",
                "code": "duplicate_email",
            }))
        }
        RegistrationError::Store(err) => store_failure(&err),
    }
}

fn map_login_error(err: LoginError) -> Error {
    match err {
        LoginError::InvalidCredentials => Error::unauthorized("email or password is incorrect"),
        LoginError::Store(err) => store_failure(&err),
    }
}

fn store_failure(err: &dyn std::error::Error) -> Error {
    error!(error = %err, "identity store failure");
    Error::internal("identity store failure")
}
