//! Login credentials and the admin access policy.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::{Email, User};

/// Domain error returned when login payload values are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email was absent or empty.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was absent or empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` and `password` are non-empty. Neither is trimmed: lookups use
///   exact equality against stored values, so surrounding whitespace is
///   significant and must survive intact.
///
/// # Examples
/// ```
/// use backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("user@gmail.com", "1234567890").unwrap();
/// assert_eq!(creds.email().as_ref(), "user@gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        if email.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email: Email::from(email),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password exactly as provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Whether a looked-up account may perform admin-only operations.
///
/// Takes the lookup result rather than an id so the policy decision stays a
/// pure function: an unknown id and a non-admin account are both denied.
///
/// # Examples
/// ```
/// use backend::domain::is_admin;
///
/// assert!(!is_admin(None));
/// ```
pub fn is_admin(user: Option<&User>) -> bool {
    user.is_some_and(|user| user.role().is_admin())
}
