//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use luxedrive_core::error::AppError;

/// Context for the current authenticated request.
///
/// Built from the access token by the API layer and passed into service
/// methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Login email from the token.
    pub email: String,
    /// Staff flag from the token.
    pub is_staff: bool,
    /// Superuser flag from the token.
    pub is_superuser: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: String, is_staff: bool, is_superuser: bool) -> Self {
        Self {
            user_id,
            email,
            is_staff,
            is_superuser,
            request_time: Utc::now(),
        }
    }

    /// Owner filter for list queries: staff see everything, customers
    /// only their own rows.
    pub fn owner_filter(&self) -> Option<Uuid> {
        if self.is_staff { None } else { Some(self.user_id) }
    }

    /// Fail unless the caller is staff.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You do not have permission to perform this action.",
            ))
        }
    }
}
