use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::RegistryError;
use crate::model::{seed_users, User, UserFilter, UserInput};

/// The canonical, ordered, in-memory collection of users.
///
/// Cloning is cheap and every clone shares the same list. Each operation
/// runs under a single lock acquisition, so no caller ever observes a
/// half-applied mutation.
#[derive(Clone, Debug)]
pub struct UserRegistry {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRegistry {
    /// A registry holding the six seed users.
    pub fn new() -> Self {
        Self::with_users(seed_users())
    }

    /// A registry with no records.
    pub fn empty() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    pub async fn filter(&self, filter: &UserFilter) -> Vec<User> {
        self.users
            .read()
            .await
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect()
    }

    /// First record whose id equals `id`.
    pub async fn get_by_id(&self, id: u64) -> Result<User, RegistryError> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Appends a record with `id = current count + 1`.
    ///
    /// The id is derived from the count, not the largest id, so it can
    /// repeat an existing id once a record has been deleted.
    pub async fn create(&self, input: UserInput) -> User {
        let user = {
            let mut users = self.users.write().await;
            let id = users.len() as u64 + 1;
            let user = User {
                id,
                name: input.name,
                email: input.email,
            };
            users.push(user.clone());
            user
        };
        tracing::debug!(user_id = user.id, "user created");
        user
    }

    /// Overwrites `name` and `email` only with supplied, non-empty values.
    pub async fn update(&self, id: u64, input: UserInput) -> Result<User, RegistryError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        if let Some(name) = input.name.filter(|n| !n.is_empty()) {
            user.name = Some(name);
        }
        if let Some(email) = input.email.filter(|e| !e.is_empty()) {
            user.email = Some(email);
        }
        tracing::debug!(user_id = id, "user updated");
        Ok(user.clone())
    }

    /// Removes the first record with this id, keeping the others in order.
    pub async fn delete(&self, id: u64) -> Result<(), RegistryError> {
        let mut users = self.users.write().await;
        let index = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        users.remove(index);
        tracing::debug!(user_id = id, "user deleted");
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for UserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
