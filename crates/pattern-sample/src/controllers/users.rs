//! Serves the `users` resource from an in-memory table.

use crate::model::{IdArg, NewUser, User, UserFilter};
use pattern_framework::HandlerError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct UsersController {
    users: Mutex<BTreeMap<u64, User>>,
    next_id: AtomicU64,
}

impl Default for UsersController {
    fn default() -> Self {
        Self {
            users: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl UsersController {
    #[instrument(skip(self), fields(email = %user.email))]
    pub async fn create(&self, user: NewUser) -> Result<User, HandlerError> {
        if user.name.trim().is_empty() {
            return Err(HandlerError::Invalid("name must not be empty".into()));
        }
        if !user.email.contains('@') {
            return Err(HandlerError::Invalid(format!("bad email: {}", user.email)));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            name: user.name,
            email: user.email,
        };
        self.users.lock().await.insert(id, user.clone());
        debug!(id, "User created");
        Ok(user)
    }

    pub async fn find_one(&self, arg: IdArg) -> Result<User, HandlerError> {
        self.users
            .lock()
            .await
            .get(&arg.id)
            .cloned()
            .ok_or_else(|| HandlerError::NotFound(format!("user {}", arg.id)))
    }

    pub async fn find_all(&self, filter: UserFilter) -> Result<Vec<User>, HandlerError> {
        let users = self.users.lock().await;
        Ok(users.values().filter(|u| filter.matches(u)).cloned().collect())
    }
}
