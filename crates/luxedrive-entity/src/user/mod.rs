//! User domain entities.

pub mod model;
pub mod tier;

pub use model::{NewUser, User};
pub use tier::MembershipTier;
