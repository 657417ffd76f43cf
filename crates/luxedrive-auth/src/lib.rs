//! # luxedrive-auth
//!
//! Authentication primitives for the LuxeDrive API.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordValidator};
