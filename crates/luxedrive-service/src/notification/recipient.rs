//! Resolves which admin account receives in-app booking notifications.

use std::sync::Arc;

use tracing::debug;

use luxedrive_core::result::AppResult;
use luxedrive_database::stores::UserStore;
use luxedrive_entity::user::User;

/// Picks the admin that owns in-app booking notifications.
#[derive(Clone)]
pub struct AdminResolver {
    users: Arc<dyn UserStore>,
    preferred_email: Option<String>,
}

impl AdminResolver {
    /// Creates a resolver preferring the staff account with `preferred_email`.
    pub fn new(users: Arc<dyn UserStore>, preferred_email: Option<String>) -> Self {
        Self {
            users,
            preferred_email: preferred_email.filter(|e| !e.trim().is_empty()),
        }
    }

    /// The configured active staff account, else the oldest active
    /// superuser, else `None`.
    pub async fn resolve(&self) -> AppResult<Option<User>> {
        if let Some(email) = &self.preferred_email {
            if let Some(user) = self.users.find_active_staff_by_email(email).await? {
                return Ok(Some(user));
            }
            debug!(email = %email, "Configured in-app admin not found, falling back to superuser");
        }

        self.users.find_active_superuser().await
    }
}
