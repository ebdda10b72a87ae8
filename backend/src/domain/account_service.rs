//! Account registration and login use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{AccountService, LoginError, Registration, RegistrationError, UserRepository};
use super::{Credentials, User};

/// [`AccountService`] implementation backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountServiceImpl<R> {
    users: Arc<R>,
}

impl<R> AccountServiceImpl<R> {
    /// Create the service over the given identity store.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> AccountService for AccountServiceImpl<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: Registration) -> Result<User, RegistrationError> {
        if self.users.email_exists(registration.email()).await? {
            return Err(RegistrationError::DuplicateEmail {
                email: registration.email().clone(),
            });
        }

        let user = User::create(
            registration.name(),
            registration.email().clone(),
            registration.password(),
            registration.role().into(),
        );
        self.users.insert(&user).await?;
        debug!(user_id = %user.id(), role = %user.role(), "registered new account");
        Ok(user)
    }

    async fn login(&self, credentials: Credentials) -> Result<User, LoginError> {
        let user = self
            .users
            .find_by_credentials(&credentials)
            .await?
            .ok_or(LoginError::InvalidCredentials)?;
        debug!(user_id = %user.id(), "account logged in");
        Ok(user)
    }
}
