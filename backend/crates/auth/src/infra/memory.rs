//! In-memory Repository Implementation
//!
//! Used by tests and local tooling. Ids are assigned sequentially from 1.

use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    next_id: i64,
}

/// In-memory user store; clones share the same data
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::Persistence(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ));
        }

        inner.next_id += 1;
        let user = user.clone().into_user(UserId::new(inner.next_id));
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.user_id == user_id).cloned())
    }
}
