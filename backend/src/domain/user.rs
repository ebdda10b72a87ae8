//! User data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Credentials;

/// Stable user identifier stored as a UUID.
///
/// Identifiers are opaque to clients; they are generated at registration and
/// never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Email address used as the login name.
///
/// No format validation happens beyond presence checks at the handlers, so
/// this is a thin wrapper that exists for type safety, not sanitization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Wrap a raw email string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<&str> for Email {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Role attached to every account.
///
/// `Admin` accounts are pre-seeded only; registration is limited to the
/// customer roles (see [`CustomerRole`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// May list every ticket and record replies.
    Admin,
    /// A private individual customer.
    Individual,
    /// A business customer.
    Business,
}

impl UserRole {
    /// Whether this role grants access to the admin-only operations.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire token for this role.
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Individual => "individual",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Roles a caller may register with. `admin` is deliberately unrepresentable
/// here so the registration path cannot mint administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerRole {
    /// A private individual customer.
    Individual,
    /// A business customer.
    Business,
}

impl CustomerRole {
    /// Parse a wire token, rejecting `admin` and unknown values.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CustomerRole;
    ///
    /// assert_eq!(CustomerRole::from_token("business"), Some(CustomerRole::Business));
    /// assert_eq!(CustomerRole::from_token("admin"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "individual" => Some(Self::Individual),
            "business" => Some(Self::Business),
            _ => None,
        }
    }
}

impl From<CustomerRole> for UserRole {
    fn from(value: CustomerRole) -> Self {
        match value {
            CustomerRole::Individual => Self::Individual,
            CustomerRole::Business => Self::Business,
        }
    }
}

/// Application user.
///
/// The password is held in plaintext; it is never serialized and the only
/// comparison point is [`User::verifies`], so a hashed scheme can slot in
/// without touching handler logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    email: Email,
    password: String,
    role: UserRole,
}

impl User {
    /// Build a new user with a freshly generated identifier.
    pub fn create(
        name: impl Into<String>,
        email: Email,
        password: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: UserId::random(),
            name: name.into(),
            email,
            password: password.into(),
            role,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name supplied at registration.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Account role.
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Exact-equality credential check on email and plaintext password.
    ///
    /// A hashed credential scheme would replace only this method.
    pub fn verifies(&self, credentials: &Credentials) -> bool {
        self.email == *credentials.email() && self.password == credentials.password()
    }
}
