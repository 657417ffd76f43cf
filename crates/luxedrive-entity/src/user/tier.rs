//! Membership tier enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loyalty tier of a customer account.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "membership_tier", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipTier {
    /// Entry tier assigned at registration.
    #[default]
    Silver,
    Gold,
    Platinum,
    Black,
}

impl MembershipTier {
    /// Return the tier as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
            Self::Black => "BLACK",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
