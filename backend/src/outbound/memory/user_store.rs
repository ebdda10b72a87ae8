//! In-memory identity store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserStoreError};
use crate::domain::{Credentials, Email, User, UserId};

/// [`UserRepository`] adapter over a mutex-guarded `Vec`.
///
/// Insertion order is preserved; all lookups are linear scans with exact
/// field equality.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given accounts.
    pub fn with_accounts(accounts: Vec<User>) -> Self {
        Self {
            users: Mutex::new(accounts),
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<User>>, UserStoreError> {
        self.users
            .lock()
            .map_err(|_| UserStoreError::access("user store mutex poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn insert(&self, user: &User) -> Result<(), UserStoreError> {
        self.guard()?.push(user.clone());
        Ok(())
    }

    async fn find_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, UserStoreError> {
        let users = self.guard()?;
        Ok(users.iter().find(|user| user.verifies(credentials)).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserStoreError> {
        let users = self.guard()?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn email_exists(&self, email: &Email) -> Result<bool, UserStoreError> {
        let users = self.guard()?;
        Ok(users.iter().any(|user| user.email() == email))
    }
}
