//! Shared security primitives for the news platform.
//!
//! - `jwt`: signed session tokens identifying a logged-in user
//! - `password`: Argon2id password hashing and verification
pub mod jwt;
pub mod password;

pub use jwt::{Claims, SessionKeys};
pub use password::{hash_password, verify_password};
