//! # Campus Security
//!
//! Signed session tokens carried in the auth cookie, and Argon2 password
//! hashing for registered users.

pub mod jwt;
pub mod password;

pub use jwt::*;
pub use password::*;
