//! In-memory user store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use luxedrive_core::error::AppError;
use luxedrive_core::result::AppResult;
use luxedrive_entity::user::{MembershipTier, NewUser, User};

use crate::stores::UserStore;

/// User store backed by a vector under a Tokio read-write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the active flag of an account.
    pub async fn set_active(&self, id: Uuid, active: bool) {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.is_active = active;
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(AppError::conflict("A user with this email already exists"));
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            membership_tier: MembershipTier::default(),
            points: 0,
            phone_number: String::new(),
            license_number: String::new(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            is_active: true,
            date_joined: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn list_customers(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut rows: Vec<User> = users.iter().filter(|u| !u.is_staff).cloned().collect();
        rows.sort_by(|a, b| b.date_joined.cmp(&a.date_joined));
        Ok(rows)
    }

    async fn find_active_staff_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.is_staff && u.is_active && u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_active_superuser(&self) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| u.is_superuser && u.is_active)
            .min_by_key(|u| u.date_joined)
            .cloned())
    }
}
