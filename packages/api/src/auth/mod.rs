//! Password hashing and bearer-token session credentials.

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{authenticate, issue_token};
